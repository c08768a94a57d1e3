//! Loading and orchestration shared by the CLI subcommands.

use std::path::Path;

use anyhow::Context;
use di_core::calculations::{TaxCalculator, TaxError, TaxResult};
use di_core::calibration::Calibration;
use di_core::{ExpenditureTable, State};
use di_data::{ExpenditureLoader, validate};
use rust_decimal::Decimal;
use tracing::{debug, info};

/// Loads a calibration file, or the built-in 2025 defaults when `path` is
/// `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails validation.
pub fn load_calibration(path: Option<&Path>) -> anyhow::Result<Calibration> {
    match path {
        Some(path) => {
            let calibration = Calibration::load(path)
                .with_context(|| format!("loading calibration from {}", path.display()))?;
            info!(
                path = %path.display(),
                tax_year = calibration.tax_year,
                "loaded calibration"
            );
            Ok(calibration)
        }
        None => {
            debug!("using built-in tax year 2025 calibration");
            Ok(Calibration::tax_year_2025())
        }
    }
}

/// Loads and validates the BLS expenditure table.
///
/// # Errors
///
/// Returns an error if the CSV cannot be parsed or the table is incomplete.
pub fn load_expenditure_table(path: &Path) -> anyhow::Result<ExpenditureTable> {
    let table = ExpenditureLoader::load(path)
        .with_context(|| format!("loading expenditure table from {}", path.display()))?;
    validate(&table).with_context(|| format!("validating {}", path.display()))?;

    info!(
        path = %path.display(),
        age_groups = table.by_age_group.len(),
        regions = table.by_region.len(),
        "loaded expenditure table"
    );
    Ok(table)
}

/// Taxes at `income` for every state with a schedule, in label order.
///
/// # Errors
///
/// Returns [`TaxError`] if a listed state has no schedule.
pub fn tax_rates(
    calibration: &Calibration,
    income: Decimal,
) -> Result<Vec<(State, TaxResult)>, TaxError> {
    let calculator = TaxCalculator::new(calibration);
    calculator
        .supported_states()
        .into_iter()
        .map(|state| Ok((state, calculator.calculate(income, state)?)))
        .collect()
}
