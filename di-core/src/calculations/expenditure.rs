//! Essential living expenses from BLS Consumer Expenditure Survey baselines.
//!
//! For each spending category `c`:
//!
//! ```text
//! E_base(c)   = 0.6 × E_age(c) + 0.4 × E_region(c)
//! E_scaled(c) = E_base(c) × (salary / reference_income) ^ β(c)
//! E_ess(c)    = α(c) × E_scaled(c)
//! ```
//!
//! `reference_income` is the survey's mean income before taxes for the
//! person's age group, so the baselines are scaled relative to the income at
//! which they were observed. β is the category's income elasticity and α its
//! essential (non-discretionary) share.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::calculations::common::{ratio_or_zero, round_half_up};
use crate::calibration::Calibration;
use crate::models::{AgeGroup, Category, CategoryCoefficients, ExpenditureTable, Region, State};

/// Errors that can occur during expenditure calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpenditureError {
    #[error("age {0} is out of range (0-999)")]
    OutOfRange(i32),

    #[error("unknown jurisdiction '{0}'")]
    UnknownJurisdiction(String),

    /// Neither the expenditure table nor the calibration has a reference
    /// income for the age group.
    #[error("no reference income for age group '{0}'")]
    MissingReferenceIncome(AgeGroup),

    #[error(
        "scaling a baseline of {baseline} from {reference_income} to {salary} overflows"
    )]
    ScalingOverflow {
        baseline: Decimal,
        salary: Decimal,
        reference_income: Decimal,
    },
}

/// Per-category detail of the expenditure calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: Category,

    /// Survey baseline for the age group.
    pub baseline_age: Decimal,

    /// Survey baseline for the region.
    pub baseline_region: Decimal,

    /// Weighted blend of the two baselines.
    pub baseline_blended: Decimal,

    /// Blended baseline scaled to the salary along the Engel curve.
    pub scaled: Decimal,

    /// Essential share of the scaled amount.
    pub essential: Decimal,

    pub essential_fraction: Decimal,
    pub income_elasticity: Decimal,
}

/// Result of the expenditure calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenditureResult {
    /// One entry per category, in canonical category order.
    pub by_category: Vec<CategoryBreakdown>,

    /// Sum of essential amounts, rounded to cents.
    pub total_essential: Decimal,

    /// Sum of scaled amounts, rounded to cents.
    pub total_all: Decimal,

    pub age_group: AgeGroup,
    pub region: Region,

    /// Income the baselines were scaled from.
    pub reference_income: Decimal,

    /// Salary relative to the reference income (1 when the reference is not
    /// positive).
    pub income_ratio: Decimal,
}

impl ExpenditureResult {
    /// Essential amount for each category.
    pub fn essential_breakdown(&self) -> Vec<(Category, Decimal)> {
        self.by_category
            .iter()
            .map(|line| (line.category, line.essential))
            .collect()
    }
}

/// Maps an age to its survey age band.
///
/// # Errors
///
/// Returns [`ExpenditureError::OutOfRange`] for ages outside 0..=999.
pub fn resolve_age_group(age: i32) -> Result<AgeGroup, ExpenditureError> {
    AgeGroup::ALL
        .into_iter()
        .find(|group| {
            let (low, high) = group.bounds();
            (low..=high).contains(&age)
        })
        .ok_or(ExpenditureError::OutOfRange(age))
}

/// Maps a state label (e.g. `"New York"`) to its census region.
///
/// # Errors
///
/// Returns [`ExpenditureError::UnknownJurisdiction`] if the label is not a
/// state or the District of Columbia.
pub fn resolve_region(state: &str) -> Result<Region, ExpenditureError> {
    State::parse(state)
        .map(|state| state.region())
        .map_err(|_| ExpenditureError::UnknownJurisdiction(state.to_string()))
}

/// Scales a baseline expenditure to `salary` with a constant-elasticity
/// Engel curve: `baseline × (salary / reference_income) ^ elasticity`.
///
/// A non-positive salary or reference income leaves the baseline unscaled,
/// as does a salary equal to the reference income.
///
/// # Errors
///
/// Returns [`ExpenditureError::ScalingOverflow`] if the scaled amount cannot
/// be represented.
pub fn scale_by_income(
    baseline: Decimal,
    salary: Decimal,
    reference_income: Decimal,
    elasticity: Decimal,
) -> Result<Decimal, ExpenditureError> {
    if reference_income <= Decimal::ZERO || salary <= Decimal::ZERO || salary == reference_income {
        return Ok(baseline);
    }

    let overflow = || ExpenditureError::ScalingOverflow {
        baseline,
        salary,
        reference_income,
    };

    let ratio = salary
        .checked_div(reference_income)
        .and_then(|ratio| ratio.to_f64())
        .ok_or_else(overflow)?;
    let exponent = elasticity.to_f64().ok_or_else(overflow)?;

    // powf is the only step outside decimal arithmetic
    let factor = Decimal::from_f64(ratio.powf(exponent)).ok_or_else(overflow)?;

    baseline.checked_mul(factor).ok_or_else(overflow)
}

/// Calculator for essential expenses.
#[derive(Debug, Clone)]
pub struct ExpenditureModel<'a> {
    calibration: &'a Calibration,
    table: &'a ExpenditureTable,
}

impl<'a> ExpenditureModel<'a> {
    pub fn new(
        calibration: &'a Calibration,
        table: &'a ExpenditureTable,
    ) -> Self {
        Self { calibration, table }
    }

    /// Calculates scaled and essential expenses for every category.
    ///
    /// With `blend_regional` off, baselines come from the age group alone.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenditureError`] if the age is out of range, no reference
    /// income exists for the age group, or scaling overflows.
    pub fn calculate(
        &self,
        salary: Decimal,
        age: i32,
        state: State,
        blend_regional: bool,
    ) -> Result<ExpenditureResult, ExpenditureError> {
        let age_group = resolve_age_group(age)?;
        let region = state.region();
        let reference_income = self.reference_income(age_group)?;
        let (age_weight, region_weight) = self.blend_weights(blend_regional);

        let mut by_category = Vec::with_capacity(Category::ALL.len());
        let mut total_essential = Decimal::ZERO;
        let mut total_all = Decimal::ZERO;

        for category in Category::ALL {
            let CategoryCoefficients {
                essential_fraction,
                income_elasticity,
            } = self.coefficients(category);

            let baseline_age = self.table.age_group_amount(age_group, category);
            let baseline_region = self.table.region_amount(region, category);
            let baseline_blended = age_weight * baseline_age + region_weight * baseline_region;

            let scaled =
                scale_by_income(baseline_blended, salary, reference_income, income_elasticity)?;

            let overflow = || ExpenditureError::ScalingOverflow {
                baseline: baseline_blended,
                salary,
                reference_income,
            };
            let essential = scaled.checked_mul(essential_fraction).ok_or_else(overflow)?;
            total_essential = total_essential.checked_add(essential).ok_or_else(overflow)?;
            total_all = total_all.checked_add(scaled).ok_or_else(overflow)?;

            by_category.push(CategoryBreakdown {
                category,
                baseline_age,
                baseline_region,
                baseline_blended,
                scaled,
                essential,
                essential_fraction,
                income_elasticity,
            });
        }

        let income_ratio = if reference_income > Decimal::ZERO {
            ratio_or_zero(salary, reference_income)
        } else {
            Decimal::ONE
        };

        Ok(ExpenditureResult {
            by_category,
            total_essential: round_half_up(total_essential),
            total_all: round_half_up(total_all),
            age_group,
            region,
            reference_income,
            income_ratio,
        })
    }

    /// Survey mean income for the age group, or the calibration's fallback
    /// when the table has none.
    fn reference_income(
        &self,
        age_group: AgeGroup,
    ) -> Result<Decimal, ExpenditureError> {
        if let Some(income) = self.table.mean_income(age_group) {
            return Ok(income);
        }

        let fallback = self
            .calibration
            .fallback_income(age_group)
            .ok_or(ExpenditureError::MissingReferenceIncome(age_group))?;
        warn!(
            age_group = %age_group,
            fallback = %fallback,
            "No survey mean income for age group; using fallback reference income"
        );
        Ok(fallback)
    }

    fn blend_weights(
        &self,
        blend_regional: bool,
    ) -> (Decimal, Decimal) {
        if blend_regional {
            let weights = self.calibration.blend_weights;
            (weights.age_group, weights.region)
        } else {
            (Decimal::ONE, Decimal::ZERO)
        }
    }

    /// A category without coefficients is scaled linearly and treated as
    /// fully discretionary.
    fn coefficients(
        &self,
        category: Category,
    ) -> CategoryCoefficients {
        self.calibration
            .coefficients(category)
            .unwrap_or(CategoryCoefficients::new(Decimal::ZERO, Decimal::ONE))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::test_support::init_test_tracing;

    /// Every category at 1,000 for 25-34 and 500 in the South, Food and
    /// Housing set explicitly.
    fn sample_table() -> ExpenditureTable {
        let mut table = ExpenditureTable::new();
        for category in Category::ALL {
            table.set_age_group_amount(AgeGroup::From25To34, category, dec!(1000));
            table.set_region_amount(Region::South, category, dec!(500));
        }
        table.set_age_group_amount(AgeGroup::From25To34, Category::Food, dec!(10000));
        table.set_region_amount(Region::South, Category::Food, dec!(5000));
        table.set_age_group_amount(AgeGroup::From25To34, Category::Housing, dec!(20000));
        table.set_region_amount(Region::South, Category::Housing, dec!(25000));
        table
            .mean_income_by_age_group
            .insert(AgeGroup::From25To34, dec!(100000));
        table
    }

    fn line(
        result: &ExpenditureResult,
        category: Category,
    ) -> &CategoryBreakdown {
        result
            .by_category
            .iter()
            .find(|line| line.category == category)
            .unwrap()
    }

    // =========================================================================
    // resolve_age_group tests
    // =========================================================================

    #[test]
    fn resolve_age_group_band_edges() {
        assert_eq!(resolve_age_group(0), Ok(AgeGroup::Under25));
        assert_eq!(resolve_age_group(23), Ok(AgeGroup::Under25));
        assert_eq!(resolve_age_group(24), Ok(AgeGroup::Under25));
        assert_eq!(resolve_age_group(25), Ok(AgeGroup::From25To34));
        assert_eq!(resolve_age_group(35), Ok(AgeGroup::From35To44));
        assert_eq!(resolve_age_group(64), Ok(AgeGroup::From55To64));
        assert_eq!(resolve_age_group(74), Ok(AgeGroup::From65To74));
        assert_eq!(resolve_age_group(75), Ok(AgeGroup::From75));
        assert_eq!(resolve_age_group(200), Ok(AgeGroup::From75));
        assert_eq!(resolve_age_group(999), Ok(AgeGroup::From75));
    }

    #[test]
    fn resolve_age_group_out_of_range() {
        assert_eq!(resolve_age_group(-1), Err(ExpenditureError::OutOfRange(-1)));
        assert_eq!(resolve_age_group(1000), Err(ExpenditureError::OutOfRange(1000)));
    }

    // =========================================================================
    // resolve_region tests
    // =========================================================================

    #[test]
    fn resolve_region_known_states() {
        assert_eq!(resolve_region("Texas"), Ok(Region::South));
        assert_eq!(resolve_region("New York"), Ok(Region::Northeast));
        assert_eq!(resolve_region("Illinois"), Ok(Region::Midwest));
        assert_eq!(resolve_region("California"), Ok(Region::West));
        assert_eq!(resolve_region("District of Columbia"), Ok(Region::South));
    }

    #[test]
    fn resolve_region_unknown_state() {
        let result = resolve_region("Atlantis");

        assert_eq!(
            result,
            Err(ExpenditureError::UnknownJurisdiction("Atlantis".to_string()))
        );
    }

    // =========================================================================
    // scale_by_income tests
    // =========================================================================

    #[test]
    fn scale_by_income_identity_at_reference() {
        let result = scale_by_income(dec!(8000), dec!(62000), dec!(62000), dec!(0.55));

        assert_eq!(result, Ok(dec!(8000)));
    }

    #[test]
    fn scale_by_income_unit_elasticity_is_proportional() {
        let result = scale_by_income(dec!(1500), dec!(120000), dec!(60000), dec!(1.0));

        assert_eq!(result, Ok(dec!(3000)));
    }

    #[test]
    fn scale_by_income_zero_elasticity_is_flat() {
        let result = scale_by_income(dec!(1500), dec!(120000), dec!(60000), dec!(0));

        assert_eq!(result, Ok(dec!(1500)));
    }

    #[test]
    fn scale_by_income_sublinear_elasticity() {
        let scaled = scale_by_income(dec!(1000), dec!(400000), dec!(100000), dec!(0.5)).unwrap();

        assert_eq!(round_half_up(scaled), dec!(2000.00));
    }

    #[test]
    fn scale_by_income_non_positive_inputs_leave_baseline() {
        assert_eq!(
            scale_by_income(dec!(1000), dec!(0), dec!(60000), dec!(0.7)),
            Ok(dec!(1000))
        );
        assert_eq!(
            scale_by_income(dec!(1000), dec!(60000), dec!(0), dec!(0.7)),
            Ok(dec!(1000))
        );
        assert_eq!(
            scale_by_income(dec!(1000), dec!(60000), dec!(-5), dec!(0.7)),
            Ok(dec!(1000))
        );
    }

    #[test]
    fn scale_by_income_reports_overflow() {
        let result = scale_by_income(Decimal::MAX, dec!(1000000), dec!(1), dec!(2));

        assert!(matches!(result, Err(ExpenditureError::ScalingOverflow { .. })));
    }

    // =========================================================================
    // ExpenditureModel::calculate tests
    // =========================================================================

    #[test]
    fn calculate_blends_age_and_region_baselines() {
        let calibration = Calibration::default();
        let table = sample_table();
        let model = ExpenditureModel::new(&calibration, &table);

        // Salary at the reference income, so nothing is scaled
        let result = model.calculate(dec!(100000), 30, State::Texas, true).unwrap();

        let food = line(&result, Category::Food);
        assert_eq!(food.baseline_age, dec!(10000));
        assert_eq!(food.baseline_region, dec!(5000));
        assert_eq!(food.baseline_blended, dec!(8000));
        assert_eq!(food.scaled, dec!(8000));
        assert_eq!(food.essential, dec!(5600));
        assert_eq!(result.age_group, AgeGroup::From25To34);
        assert_eq!(result.region, Region::South);
        assert_eq!(result.income_ratio, dec!(1));
    }

    #[test]
    fn calculate_without_blend_uses_age_baseline() {
        let calibration = Calibration::default();
        let table = sample_table();
        let model = ExpenditureModel::new(&calibration, &table);

        let result = model.calculate(dec!(100000), 30, State::Texas, false).unwrap();

        let housing = line(&result, Category::Housing);
        assert_eq!(housing.baseline_blended, dec!(20000));
        assert_eq!(housing.essential, dec!(20000));
    }

    #[test]
    fn calculate_totals_at_reference_income() {
        let calibration = Calibration::default();
        let table = sample_table();
        let model = ExpenditureModel::new(&calibration, &table);

        let result = model.calculate(dec!(100000), 30, State::Texas, true).unwrap();

        // Food 8,000 + Housing 22,000 + 12 other categories at 800
        assert_eq!(result.total_all, dec!(39600.00));
        // Food 5,600 + Housing 22,000 + 800 × Σα over the other twelve (6.15)
        assert_eq!(result.total_essential, dec!(32520.00));
    }

    #[test]
    fn calculate_scales_with_income() {
        let calibration = Calibration::default();
        let table = sample_table();
        let model = ExpenditureModel::new(&calibration, &table);

        let result = model.calculate(dec!(200000), 30, State::Texas, true).unwrap();

        // Miscellaneous has unit elasticity
        assert_eq!(line(&result, Category::Miscellaneous).scaled, dec!(1600));
        assert_eq!(line(&result, Category::Miscellaneous).essential, dec!(0));
        assert_eq!(result.income_ratio, dec!(2));
        assert!(result.total_all > dec!(39600));
    }

    #[test]
    fn calculate_lists_categories_in_canonical_order() {
        let calibration = Calibration::default();
        let table = sample_table();
        let model = ExpenditureModel::new(&calibration, &table);

        let result = model.calculate(dec!(50000), 30, State::Georgia, true).unwrap();

        let categories: Vec<Category> = result.by_category.iter().map(|l| l.category).collect();
        assert_eq!(categories, Category::ALL.to_vec());
        assert_eq!(result.essential_breakdown().len(), 14);
    }

    #[test]
    fn calculate_missing_values_read_as_zero() {
        let calibration = Calibration::default();
        let table = sample_table();
        let model = ExpenditureModel::new(&calibration, &table);

        // No West row in the sample table
        let result = model.calculate(dec!(100000), 30, State::California, true).unwrap();

        let food = line(&result, Category::Food);
        assert_eq!(food.baseline_region, dec!(0));
        assert_eq!(food.baseline_blended, dec!(6000));
    }

    #[test]
    fn calculate_falls_back_to_calibration_income() {
        let (_guard, logs) = init_test_tracing();
        let calibration = Calibration::default();
        let table = sample_table();
        let model = ExpenditureModel::new(&calibration, &table);

        let result = model.calculate(dec!(58000), 70, State::Florida, true).unwrap();

        assert_eq!(result.age_group, AgeGroup::From65To74);
        assert_eq!(result.reference_income, dec!(58000));
        assert_eq!(result.income_ratio, dec!(1));

        let output = logs.contents();
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("using fallback reference income"), "{output}");
        assert!(output.contains("age_group=65-74"), "{output}");
        assert!(output.contains("fallback=58000"), "{output}");
    }

    #[test]
    fn calculate_with_survey_income_does_not_warn() {
        let (_guard, logs) = init_test_tracing();
        let calibration = Calibration::default();
        let table = sample_table();
        let model = ExpenditureModel::new(&calibration, &table);

        model.calculate(dec!(60000), 30, State::Texas, true).unwrap();

        assert_eq!(logs.contents(), "");
    }

    #[test]
    fn calculate_reports_overflowing_totals() {
        let huge = Decimal::MAX - Decimal::ONE;
        let mut table = ExpenditureTable::new();
        table.set_age_group_amount(AgeGroup::From25To34, Category::Food, huge);
        table.set_age_group_amount(AgeGroup::From25To34, Category::Housing, huge);
        table.mean_income_by_age_group.insert(AgeGroup::From25To34, dec!(60000));
        let calibration = Calibration::default();
        let model = ExpenditureModel::new(&calibration, &table);

        // Each category scales to itself; only the running totals overflow.
        let result = model.calculate(dec!(60000), 30, State::Texas, false);

        assert_eq!(
            result,
            Err(ExpenditureError::ScalingOverflow {
                baseline: huge,
                salary: dec!(60000),
                reference_income: dec!(60000),
            })
        );
    }

    #[test]
    fn calculate_missing_reference_income_is_an_error() {
        let mut calibration = Calibration::default();
        calibration.fallback_income_by_age_group.clear();
        let table = sample_table();
        let model = ExpenditureModel::new(&calibration, &table);

        let result = model.calculate(dec!(58000), 70, State::Florida, true);

        assert_eq!(
            result,
            Err(ExpenditureError::MissingReferenceIncome(AgeGroup::From65To74))
        );
    }

    #[test]
    fn calculate_rejects_out_of_range_age() {
        let calibration = Calibration::default();
        let table = sample_table();
        let model = ExpenditureModel::new(&calibration, &table);

        let result = model.calculate(dec!(58000), -3, State::Florida, true);

        assert_eq!(result, Err(ExpenditureError::OutOfRange(-3)));
    }

    // =========================================================================
    // properties
    // =========================================================================

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(256))]

        #[test]
        fn prop_engel_identity(
            baseline in 0u32..100_000,
            income in 1u32..1_000_000,
            beta_pct in 0u32..200,
        ) {
            let baseline = Decimal::from(baseline);
            let income = Decimal::from(income);
            let beta = Decimal::new(i64::from(beta_pct), 2);

            let scaled = scale_by_income(baseline, income, income, beta).unwrap();

            prop_assert_eq!(scaled, baseline);
        }

        #[test]
        fn prop_essential_never_exceeds_total(salary in 0u32..1_000_000, age in 25i32..35) {
            let calibration = Calibration::default();
            let table = sample_table();
            let model = ExpenditureModel::new(&calibration, &table);

            let result = model
                .calculate(Decimal::from(salary), age, State::Texas, true)
                .unwrap();

            for line in &result.by_category {
                prop_assert!(line.essential <= line.scaled);
            }
            prop_assert!(result.total_essential <= result.total_all);
        }
    }
}
