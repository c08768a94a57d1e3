//! Disposable income: gross salary less taxes and essential expenses.
//!
//! ```text
//! DI = gross_income − total_tax − total_essential_expenses
//! ```
//!
//! A negative result is a valid answer: the salary does not cover modeled
//! taxes and essential living costs for that age group and region.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use di_core::{AgeGroup, Category, ExpenditureTable, Region, State};
//! use di_core::calculations::DisposableIncomeCalculator;
//! use di_core::calibration::Calibration;
//!
//! let mut table = ExpenditureTable::new();
//! table.set_age_group_amount(AgeGroup::From25To34, Category::Housing, dec!(20000));
//! table.set_region_amount(Region::South, Category::Housing, dec!(20000));
//! table.mean_income_by_age_group.insert(AgeGroup::From25To34, dec!(100000));
//!
//! let calibration = Calibration::tax_year_2025();
//! let calculator = DisposableIncomeCalculator::new(&calibration, &table);
//! let result = calculator.calculate(dec!(100000), 30, State::Texas, true).unwrap();
//!
//! // 100,000 − (13,614 + 7,650) − 20,000
//! assert_eq!(result.disposable_income, dec!(58736.00));
//! assert_eq!(result.di_fraction, dec!(0.5874));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{group_thousands, ratio_or_zero, round_fraction, round_half_up};
use crate::calculations::expenditure::{ExpenditureError, ExpenditureModel, ExpenditureResult};
use crate::calculations::tax::{TaxCalculator, TaxError, TaxResult};
use crate::calibration::Calibration;
use crate::models::{AgeGroup, ExpenditureTable, Region, State};

/// Oldest age accepted by the calculator.
pub const MAX_AGE: i32 = 120;

/// Broad classification of a [`DisposableIncomeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed an income or age outside the accepted domain.
    InvalidInput,
    /// The state has no tax schedule or is not recognized.
    UnknownJurisdiction,
    /// A value fell outside what the models can represent.
    OutOfRange,
    /// The calibration lacks data the calculation needs.
    MissingData,
}

/// Errors that can occur while calculating disposable income.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DisposableIncomeError {
    #[error("gross income must be non-negative, got {0}")]
    InvalidIncome(Decimal),

    #[error("age must be between 0 and 120, got {0}")]
    InvalidAge(i32),

    #[error(transparent)]
    Tax(#[from] TaxError),

    #[error(transparent)]
    Expenditure(#[from] ExpenditureError),
}

impl DisposableIncomeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidIncome(_) | Self::InvalidAge(_) => ErrorKind::InvalidInput,
            Self::Tax(TaxError::UnknownJurisdiction(_)) => ErrorKind::UnknownJurisdiction,
            Self::Expenditure(err) => match err {
                ExpenditureError::UnknownJurisdiction(_) => ErrorKind::UnknownJurisdiction,
                ExpenditureError::OutOfRange(_) | ExpenditureError::ScalingOverflow { .. } => {
                    ErrorKind::OutOfRange
                }
                ExpenditureError::MissingReferenceIncome(_) => ErrorKind::MissingData,
            },
        }
    }
}

/// Full breakdown of a disposable income calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisposableIncomeResult {
    pub gross_income: Decimal,
    pub age: i32,
    pub state: State,

    pub taxes: TaxResult,
    pub total_tax: Decimal,
    pub effective_tax_rate: Decimal,

    pub expenses: ExpenditureResult,
    pub total_essential: Decimal,
    pub total_all_expenses: Decimal,

    /// Gross income less taxes and essential expenses, rounded to cents.
    pub disposable_income: Decimal,

    /// Disposable income over gross income, to four places (0 for a zero
    /// income).
    pub di_fraction: Decimal,

    pub age_group: AgeGroup,
    pub region: Region,
    pub income_ratio: Decimal,

    /// Modeling assumptions behind the figures.
    pub assumptions: Vec<String>,
}

/// Calculator combining the tax and expenditure models.
#[derive(Debug, Clone)]
pub struct DisposableIncomeCalculator<'a> {
    calibration: &'a Calibration,
    table: &'a ExpenditureTable,
}

impl<'a> DisposableIncomeCalculator<'a> {
    pub fn new(
        calibration: &'a Calibration,
        table: &'a ExpenditureTable,
    ) -> Self {
        Self { calibration, table }
    }

    /// Calculates disposable income for one person.
    ///
    /// # Errors
    ///
    /// Returns [`DisposableIncomeError`] if the income is negative, the age is
    /// outside 0..=120, the state has no tax schedule, or the expenditure
    /// model fails.
    pub fn calculate(
        &self,
        gross_income: Decimal,
        age: i32,
        state: State,
        blend_regional: bool,
    ) -> Result<DisposableIncomeResult, DisposableIncomeError> {
        if gross_income < Decimal::ZERO {
            return Err(DisposableIncomeError::InvalidIncome(gross_income));
        }
        if !(0..=MAX_AGE).contains(&age) {
            return Err(DisposableIncomeError::InvalidAge(age));
        }

        let taxes = TaxCalculator::new(self.calibration).calculate(gross_income, state)?;
        let expenses = ExpenditureModel::new(self.calibration, self.table).calculate(
            gross_income,
            age,
            state,
            blend_regional,
        )?;

        let disposable = gross_income - taxes.total - expenses.total_essential;

        Ok(DisposableIncomeResult {
            gross_income,
            age,
            state,
            total_tax: taxes.total,
            effective_tax_rate: taxes.effective_total_rate,
            total_essential: expenses.total_essential,
            total_all_expenses: expenses.total_all,
            disposable_income: round_half_up(disposable),
            di_fraction: round_fraction(ratio_or_zero(disposable, gross_income)),
            age_group: expenses.age_group,
            region: expenses.region,
            income_ratio: expenses.income_ratio,
            assumptions: self.assumptions(),
            taxes,
            expenses,
        })
    }

    fn assumptions(&self) -> Vec<String> {
        vec![
            format!(
                "Single filer, standard deduction (${}, IRS {})",
                group_thousands(self.calibration.standard_deduction),
                self.calibration.tax_year
            ),
            "Salary is sole income source".to_string(),
            "State rates: 2025 effective rates at income level (Tax Foundation)".to_string(),
            "BLS CES 2024 household expenditure, treated as individual".to_string(),
            "Engel curve: constant elasticity (power law) approximation of QUAIDS".to_string(),
            "No 401(k)/IRA deductions; voluntary savings treated as disposable".to_string(),
            "Static model: no career progression or inflation".to_string(),
        ]
    }
}
