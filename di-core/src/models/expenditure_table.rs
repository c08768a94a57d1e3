use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AgeGroup, Category, Region};

/// Baseline annual expenditure per category, by age group and by region.
///
/// Built once by a loader and only read afterwards. Missing category values
/// read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenditureTable {
    pub by_age_group: BTreeMap<AgeGroup, BTreeMap<Category, Decimal>>,
    pub by_region: BTreeMap<Region, BTreeMap<Category, Decimal>>,
    /// Mean income before taxes of the surveyed households in each age group.
    pub mean_income_by_age_group: BTreeMap<AgeGroup, Decimal>,
    /// Mean income before taxes by region. Carried for reporting; the model
    /// scales against the age-group income.
    #[serde(default)]
    pub mean_income_by_region: BTreeMap<Region, Decimal>,
}

impl ExpenditureTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_age_group_amount(
        &mut self,
        age_group: AgeGroup,
        category: Category,
        amount: Decimal,
    ) {
        self.by_age_group
            .entry(age_group)
            .or_default()
            .insert(category, amount);
    }

    pub fn set_region_amount(
        &mut self,
        region: Region,
        category: Category,
        amount: Decimal,
    ) {
        self.by_region
            .entry(region)
            .or_default()
            .insert(category, amount);
    }

    pub fn age_group_amount(
        &self,
        age_group: AgeGroup,
        category: Category,
    ) -> Decimal {
        self.by_age_group
            .get(&age_group)
            .and_then(|amounts| amounts.get(&category))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn region_amount(
        &self,
        region: Region,
        category: Category,
    ) -> Decimal {
        self.by_region
            .get(&region)
            .and_then(|amounts| amounts.get(&category))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn mean_income(
        &self,
        age_group: AgeGroup,
    ) -> Option<Decimal> {
        self.mean_income_by_age_group.get(&age_group).copied()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn missing_amounts_read_as_zero() {
        let mut table = ExpenditureTable::new();
        table.set_age_group_amount(AgeGroup::From25To34, Category::Food, dec!(9630));

        assert_eq!(table.age_group_amount(AgeGroup::From25To34, Category::Food), dec!(9630));
        assert_eq!(table.age_group_amount(AgeGroup::From25To34, Category::Housing), dec!(0));
        assert_eq!(table.age_group_amount(AgeGroup::Under25, Category::Food), dec!(0));
        assert_eq!(table.region_amount(Region::West, Category::Food), dec!(0));
    }

    #[test]
    fn mean_income_is_optional() {
        let mut table = ExpenditureTable::new();
        table
            .mean_income_by_age_group
            .insert(AgeGroup::From35To44, dec!(135000));

        assert_eq!(table.mean_income(AgeGroup::From35To44), Some(dec!(135000)));
        assert_eq!(table.mean_income(AgeGroup::From75), None);
    }

    #[test]
    fn serializes_with_labels_as_keys() {
        let mut table = ExpenditureTable::new();
        table.set_region_amount(Region::South, Category::Healthcare, dec!(6012));

        let json = serde_json::to_value(&table).unwrap();

        assert_eq!(json["by_region"]["South"]["Healthcare"], "6012");
    }
}
