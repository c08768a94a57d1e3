//! Sanity checks on a loaded expenditure table.

use di_core::{AgeGroup, Category, ExpenditureTable, Region};
use rust_decimal::Decimal;
use thiserror::Error;

/// Categories every age group and region must report with a positive amount.
pub const REQUIRED_CATEGORIES: [Category; 4] = [
    Category::Food,
    Category::Housing,
    Category::Transportation,
    Category::Healthcare,
];

/// Errors describing why an expenditure table is unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpenditureTableError {
    #[error("no expenditure data for age group '{0}'")]
    MissingAgeGroup(AgeGroup),

    #[error("no expenditure data for region '{0}'")]
    MissingRegion(Region),

    /// `group` is the age-group or region label.
    #[error("'{category}' is missing for '{group}'")]
    MissingAmount { group: String, category: Category },

    #[error("'{category}' must be positive for '{group}', got {amount}")]
    NonPositiveAmount {
        group: String,
        category: Category,
        amount: Decimal,
    },
}

/// Checks that every age group and region is present and reports positive
/// amounts for [`REQUIRED_CATEGORIES`].
///
/// # Errors
///
/// Returns the first [`ExpenditureTableError`] found, age groups first.
pub fn validate(table: &ExpenditureTable) -> Result<(), ExpenditureTableError> {
    for age_group in AgeGroup::ALL {
        let amounts = table
            .by_age_group
            .get(&age_group)
            .ok_or(ExpenditureTableError::MissingAgeGroup(age_group))?;
        check_required(age_group.label(), |category| amounts.get(&category).copied())?;
    }

    for region in Region::ALL {
        let amounts = table
            .by_region
            .get(&region)
            .ok_or(ExpenditureTableError::MissingRegion(region))?;
        check_required(region.label(), |category| amounts.get(&category).copied())?;
    }

    Ok(())
}

fn check_required(
    group: &str,
    amount_for: impl Fn(Category) -> Option<Decimal>,
) -> Result<(), ExpenditureTableError> {
    for category in REQUIRED_CATEGORIES {
        let amount = amount_for(category).ok_or_else(|| ExpenditureTableError::MissingAmount {
            group: group.to_string(),
            category,
        })?;
        if amount <= Decimal::ZERO {
            return Err(ExpenditureTableError::NonPositiveAmount {
                group: group.to_string(),
                category,
                amount,
            });
        }
    }
    Ok(())
}
