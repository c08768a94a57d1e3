use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ParseLabelError;
use super::demographics::impl_label_conversions;

/// BLS Consumer Expenditure Survey spending categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Food,
    Housing,
    Utilities,
    HouseholdOperations,
    HousekeepingSupplies,
    HouseholdFurnishings,
    Apparel,
    Transportation,
    Healthcare,
    Entertainment,
    PersonalCare,
    Education,
    Miscellaneous,
    PersonalInsurance,
}

impl Category {
    /// All categories in BLS table order.
    pub const ALL: [Category; 14] = [
        Self::Food,
        Self::Housing,
        Self::Utilities,
        Self::HouseholdOperations,
        Self::HousekeepingSupplies,
        Self::HouseholdFurnishings,
        Self::Apparel,
        Self::Transportation,
        Self::Healthcare,
        Self::Entertainment,
        Self::PersonalCare,
        Self::Education,
        Self::Miscellaneous,
        Self::PersonalInsurance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Housing => "Housing",
            Self::Utilities => "Utilities, fuel, public services",
            Self::HouseholdOperations => "Household operations",
            Self::HousekeepingSupplies => "Housekeeping supplies",
            Self::HouseholdFurnishings => "Household furnishings and equipment",
            Self::Apparel => "Apparel and services",
            Self::Transportation => "Transportation",
            Self::Healthcare => "Healthcare",
            Self::Entertainment => "Entertainment",
            Self::PersonalCare => "Personal care",
            Self::Education => "Education",
            Self::Miscellaneous => "Miscellaneous",
            Self::PersonalInsurance => "Personal insurance",
        }
    }

    /// Parses a category label, ignoring ASCII case and surrounding whitespace.
    ///
    /// The BLS source sheet spells one line item "Household furnishings and
    /// equipement"; that spelling is accepted as well.
    pub fn parse(s: &str) -> Result<Self, ParseLabelError> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("Household furnishings and equipement") {
            return Ok(Self::HouseholdFurnishings);
        }
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLabelError::Category(s.to_string()))
    }
}

impl_label_conversions!(Category);

/// Calibration pair for one spending category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCoefficients {
    /// Fraction of category spending that is non-discretionary (α, in [0, 1]).
    pub essential_fraction: Decimal,

    /// Engel-curve income elasticity (β).
    pub income_elasticity: Decimal,
}

impl CategoryCoefficients {
    pub const fn new(
        essential_fraction: Decimal,
        income_elasticity: Decimal,
    ) -> Self {
        Self {
            essential_fraction,
            income_elasticity,
        }
    }
}
