//! Federal, payroll and state income tax for a single filer.
//!
//! # Components
//!
//! | Tax | Method |
//! |-----|--------|
//! | Federal income tax | Progressive brackets applied to gross income less the standard deduction |
//! | Social Security | Flat rate on wages up to the wage base |
//! | Medicare | Flat rate on all wages, plus a surcharge above the threshold |
//! | State income tax | Effective rate interpolated from the state's schedule, applied to gross income |
//!
//! Salary is assumed to be the only income, and no pre-tax deductions
//! (401(k), HSA, ...) are taken.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use di_core::State;
//! use di_core::calculations::TaxCalculator;
//! use di_core::calibration::Calibration;
//!
//! let calibration = Calibration::tax_year_2025();
//! let calculator = TaxCalculator::new(&calibration);
//!
//! let result = calculator.calculate(dec!(100000), State::Texas).unwrap();
//!
//! assert_eq!(result.federal, dec!(13614.00));
//! assert_eq!(result.fica.total, dec!(7650.00));
//! assert_eq!(result.state, dec!(0.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::State;
use crate::calculations::common::{max, min, ratio_or_zero, round_half_up};
use crate::calibration::Calibration;

/// Errors that can occur during tax calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxError {
    /// No state tax schedule is configured for the requested state.
    #[error("no state tax schedule for {0}")]
    UnknownJurisdiction(State),
}

/// Employee share of payroll taxes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FicaResult {
    pub social_security: Decimal,

    /// Medicare at the base rate on all wages.
    pub medicare_base: Decimal,

    /// Additional Medicare tax on wages above the threshold.
    pub medicare_surcharge: Decimal,

    /// Base plus surcharge.
    pub medicare_total: Decimal,

    /// Social Security plus total Medicare.
    pub total: Decimal,
}

/// All taxes owed on a gross salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub federal: Decimal,
    pub fica: FicaResult,
    pub state: Decimal,

    /// Federal + FICA + state.
    pub total: Decimal,

    /// Federal tax as a fraction of gross income (0 for a zero income).
    pub effective_federal_rate: Decimal,

    /// State tax as a fraction of gross income (0 for a zero income).
    pub effective_state_rate: Decimal,

    /// Total tax as a fraction of gross income (0 for a zero income).
    pub effective_total_rate: Decimal,
}

/// Calculator for the tax side of the model.
#[derive(Debug, Clone)]
pub struct TaxCalculator<'a> {
    calibration: &'a Calibration,
}

impl<'a> TaxCalculator<'a> {
    pub fn new(calibration: &'a Calibration) -> Self {
        Self { calibration }
    }

    /// Calculates federal, FICA and state tax on `gross_income`.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::UnknownJurisdiction`] if `state` has no schedule.
    pub fn calculate(
        &self,
        gross_income: Decimal,
        state: State,
    ) -> Result<TaxResult, TaxError> {
        let federal = self.federal_tax(gross_income);
        let fica = self.fica(gross_income);
        let state = self.state_tax(gross_income, state)?;
        let total = round_half_up(federal + fica.total + state);

        Ok(TaxResult {
            federal,
            state,
            total,
            effective_federal_rate: ratio_or_zero(federal, gross_income),
            effective_state_rate: ratio_or_zero(state, gross_income),
            effective_total_rate: ratio_or_zero(total, gross_income),
            fica,
        })
    }

    /// Federal income tax, rounded to cents.
    ///
    /// Each bracket taxes the slice of taxable income between the previous
    /// bracket's upper bound and its own.
    pub fn federal_tax(
        &self,
        gross_income: Decimal,
    ) -> Decimal {
        let taxable = self.taxable_income(gross_income);

        let mut tax = Decimal::ZERO;
        let mut previous_upper = Decimal::ZERO;

        for bracket in &self.calibration.federal_brackets {
            match bracket.upper_bound {
                Some(upper) => {
                    let slice = max(min(taxable, upper) - previous_upper, Decimal::ZERO);
                    tax += slice * bracket.rate;
                    if taxable <= upper {
                        break;
                    }
                    previous_upper = upper;
                }
                None => {
                    tax += max(taxable - previous_upper, Decimal::ZERO) * bracket.rate;
                    break;
                }
            }
        }

        round_half_up(tax)
    }

    /// Social Security and Medicare, each component rounded to cents.
    pub fn fica(
        &self,
        gross_income: Decimal,
    ) -> FicaResult {
        let params = &self.calibration.fica;

        let social_security = round_half_up(min(gross_income, params.ss_wage_base) * params.ss_rate);
        let medicare_base = round_half_up(gross_income * params.medicare_rate);
        let medicare_surcharge = if gross_income > params.medicare_surcharge_threshold {
            round_half_up(
                (gross_income - params.medicare_surcharge_threshold) * params.medicare_surcharge_rate,
            )
        } else {
            Decimal::ZERO
        };
        let medicare_total = round_half_up(medicare_base + medicare_surcharge);

        FicaResult {
            social_security,
            medicare_base,
            medicare_surcharge,
            medicare_total,
            total: round_half_up(social_security + medicare_total),
        }
    }

    /// State income tax: gross income times the interpolated effective rate.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::UnknownJurisdiction`] if `state` has no schedule.
    pub fn state_tax(
        &self,
        gross_income: Decimal,
        state: State,
    ) -> Result<Decimal, TaxError> {
        let rate = self.state_effective_rate(gross_income, state)?;
        Ok(round_half_up(gross_income * rate))
    }

    /// The state's effective rate at `gross_income`.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::UnknownJurisdiction`] if `state` has no schedule.
    pub fn state_effective_rate(
        &self,
        gross_income: Decimal,
        state: State,
    ) -> Result<Decimal, TaxError> {
        let schedule = self
            .calibration
            .state_schedule(state)
            .ok_or(TaxError::UnknownJurisdiction(state))?;
        Ok(schedule.effective_rate(gross_income))
    }

    /// States with a configured schedule, in label order.
    pub fn supported_states(&self) -> Vec<State> {
        let mut states: Vec<State> = self.calibration.state_schedules.keys().copied().collect();
        states.sort_by_key(|state| state.label());
        states
    }

    fn taxable_income(
        &self,
        gross_income: Decimal,
    ) -> Decimal {
        max(gross_income - self.calibration.standard_deduction, Decimal::ZERO)
    }
}
