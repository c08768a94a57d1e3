//! Calibration constants for the tax and expenditure models.
//!
//! A [`Calibration`] is built once at startup, either from the built-in 2025
//! tables ([`Calibration::tax_year_2025`]) or from a TOML file, and then
//! passed by reference into every calculator. Nothing mutates it afterwards.
//!
//! # File format
//!
//! ```toml
//! tax_year = 2025
//! standard_deduction = "15000"
//! federal_brackets = [
//!     { upper_bound = "11925", rate = "0.10" },
//!     { rate = "0.12" },
//! ]
//!
//! [fica]
//! ss_rate = "0.062"
//! ss_wage_base = "176100"
//! medicare_rate = "0.0145"
//! medicare_surcharge_rate = "0.009"
//! medicare_surcharge_threshold = "200000"
//!
//! [state_schedules]
//! Texas = [{ income = "0", rate = "0" }]
//! "New York" = [{ income = "0", rate = "0" }, { income = "20000", rate = "0.03" }]
//!
//! [category_coefficients.Food]
//! essential_fraction = "0.70"
//! income_elasticity = "0.55"
//! # ... one table per category
//!
//! [fallback_income_by_age_group]
//! "Under 25" = "42000"
//! # ... one entry per age group
//!
//! [blend_weights]
//! age_group = "0.6"
//! region = "0.4"
//! ```
//!
//! State, category and age-group keys must be canonical labels; anything else
//! fails deserialization.

mod defaults;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::models::{AgeGroup, Category, CategoryCoefficients, State, StateTaxSchedule, TaxBracket};

/// Errors raised while loading or validating a calibration.
#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("cannot read calibration file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid calibration file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("no federal tax brackets provided")]
    NoFederalBrackets,

    #[error("the last federal bracket must be unbounded")]
    MissingTopBracket,

    #[error("federal bracket bounds must strictly increase, found {0} out of order")]
    NonIncreasingBracketBound(Decimal),

    /// A bounded bracket appears after the unbounded one.
    #[error("only the last federal bracket may be unbounded")]
    UnboundedBracketNotLast,

    #[error("{field} must be between 0 and 1, got {rate}")]
    RateOutOfRange { field: String, rate: Decimal },

    #[error("{field} must be {requirement}, got {amount}")]
    InvalidAmount {
        field: &'static str,
        requirement: &'static str,
        amount: Decimal,
    },

    #[error("state schedule for {0} is empty")]
    EmptyStateSchedule(State),

    #[error("state schedule for {state} must start at income 0, starts at {income}")]
    ScheduleMustStartAtZero { state: State, income: Decimal },

    #[error("state schedule for {state} has a decreasing threshold at {income}")]
    DecreasingThreshold { state: State, income: Decimal },

    #[error("no coefficients for category '{0}'")]
    MissingCoefficients(Category),

    #[error("no fallback income for age group '{0}'")]
    MissingFallbackIncome(AgeGroup),

    #[error("blend weights must sum to 1, got {age_group} + {region}")]
    InvalidBlendWeights { age_group: Decimal, region: Decimal },
}

/// Payroll tax parameters (employee share).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FicaParameters {
    pub ss_rate: Decimal,
    /// Annual earnings cap for Social Security.
    pub ss_wage_base: Decimal,
    pub medicare_rate: Decimal,
    /// Additional Medicare rate on wages above the threshold.
    pub medicare_surcharge_rate: Decimal,
    pub medicare_surcharge_threshold: Decimal,
}

/// Weights used to blend age-group and regional baselines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlendWeights {
    pub age_group: Decimal,
    pub region: Decimal,
}

/// Every constant the models depend on, for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Calibration {
    pub tax_year: i32,
    /// Single-filer standard deduction.
    pub standard_deduction: Decimal,
    /// Single-filer brackets, ascending, ending with an unbounded bracket.
    pub federal_brackets: Vec<TaxBracket>,
    pub fica: FicaParameters,
    pub state_schedules: BTreeMap<State, StateTaxSchedule>,
    pub category_coefficients: BTreeMap<Category, CategoryCoefficients>,
    /// Reference income used when the expenditure table lacks one for an
    /// age group.
    pub fallback_income_by_age_group: BTreeMap<AgeGroup, Decimal>,
    pub blend_weights: BlendWeights,
}

impl Default for Calibration {
    fn default() -> Self {
        Self::tax_year_2025()
    }
}

impl Calibration {
    /// Built-in constants for tax year 2025.
    pub fn tax_year_2025() -> Self {
        defaults::tax_year_2025()
    }

    /// Parses and validates a TOML calibration.
    pub fn from_toml_str(input: &str) -> Result<Self, CalibrationError> {
        let calibration: Calibration = toml::from_str(input)?;
        calibration.validate()?;
        Ok(calibration)
    }

    /// Reads, parses and validates a TOML calibration file.
    pub fn load(path: &Path) -> Result<Self, CalibrationError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CalibrationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn state_schedule(
        &self,
        state: State,
    ) -> Option<&StateTaxSchedule> {
        self.state_schedules.get(&state)
    }

    pub fn coefficients(
        &self,
        category: Category,
    ) -> Option<CategoryCoefficients> {
        self.category_coefficients.get(&category).copied()
    }

    pub fn fallback_income(
        &self,
        age_group: AgeGroup,
    ) -> Option<Decimal> {
        self.fallback_income_by_age_group.get(&age_group).copied()
    }

    /// Checks the structural invariants the calculators rely on.
    ///
    /// Zero-width segments in a state schedule (two breakpoints at the same
    /// income) are accepted and logged as a data-quality warning.
    ///
    /// # Errors
    ///
    /// Returns the first [`CalibrationError`] found.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        self.validate_federal()?;
        self.validate_fica()?;
        self.validate_states()?;
        self.validate_categories()?;

        for age_group in AgeGroup::ALL {
            if self.fallback_income(age_group).is_none() {
                return Err(CalibrationError::MissingFallbackIncome(age_group));
            }
        }

        let BlendWeights { age_group, region } = self.blend_weights;
        if age_group < Decimal::ZERO || region < Decimal::ZERO || age_group + region != Decimal::ONE
        {
            return Err(CalibrationError::InvalidBlendWeights { age_group, region });
        }

        Ok(())
    }

    fn validate_federal(&self) -> Result<(), CalibrationError> {
        if self.standard_deduction < Decimal::ZERO {
            return Err(CalibrationError::InvalidAmount {
                field: "standard_deduction",
                requirement: "non-negative",
                amount: self.standard_deduction,
            });
        }

        let Some((top, lower)) = self.federal_brackets.split_last() else {
            return Err(CalibrationError::NoFederalBrackets);
        };
        if top.upper_bound.is_some() {
            return Err(CalibrationError::MissingTopBracket);
        }

        let mut previous = Decimal::ZERO;
        for bracket in lower {
            let Some(upper) = bracket.upper_bound else {
                return Err(CalibrationError::UnboundedBracketNotLast);
            };
            if upper <= previous {
                return Err(CalibrationError::NonIncreasingBracketBound(upper));
            }
            previous = upper;
        }

        for bracket in &self.federal_brackets {
            check_rate("federal bracket rate", bracket.rate)?;
        }
        Ok(())
    }

    fn validate_fica(&self) -> Result<(), CalibrationError> {
        let fica = &self.fica;
        check_rate("ss_rate", fica.ss_rate)?;
        check_rate("medicare_rate", fica.medicare_rate)?;
        check_rate("medicare_surcharge_rate", fica.medicare_surcharge_rate)?;

        if fica.ss_wage_base <= Decimal::ZERO {
            return Err(CalibrationError::InvalidAmount {
                field: "ss_wage_base",
                requirement: "positive",
                amount: fica.ss_wage_base,
            });
        }
        if fica.medicare_surcharge_threshold < Decimal::ZERO {
            return Err(CalibrationError::InvalidAmount {
                field: "medicare_surcharge_threshold",
                requirement: "non-negative",
                amount: fica.medicare_surcharge_threshold,
            });
        }
        Ok(())
    }

    fn validate_states(&self) -> Result<(), CalibrationError> {
        for (&state, schedule) in &self.state_schedules {
            let points = schedule.breakpoints();
            let Some(first) = points.first() else {
                return Err(CalibrationError::EmptyStateSchedule(state));
            };
            if first.income != Decimal::ZERO {
                return Err(CalibrationError::ScheduleMustStartAtZero {
                    state,
                    income: first.income,
                });
            }
            for pair in points.windows(2) {
                if pair[1].income < pair[0].income {
                    return Err(CalibrationError::DecreasingThreshold {
                        state,
                        income: pair[1].income,
                    });
                }
            }
            for point in points {
                check_rate(&format!("{state} effective rate"), point.rate)?;
            }
            for threshold in schedule.zero_width_thresholds() {
                warn!(
                    state = %state,
                    threshold = %threshold,
                    "State schedule has a zero-width segment; the lower breakpoint's rate applies"
                );
            }
        }
        Ok(())
    }

    fn validate_categories(&self) -> Result<(), CalibrationError> {
        for category in Category::ALL {
            let coefficients = self
                .coefficients(category)
                .ok_or(CalibrationError::MissingCoefficients(category))?;
            check_rate(
                &format!("essential fraction for '{category}'"),
                coefficients.essential_fraction,
            )?;
        }
        Ok(())
    }
}

fn check_rate(
    field: &str,
    rate: Decimal,
) -> Result<(), CalibrationError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(CalibrationError::RateOutOfRange {
            field: field.to_string(),
            rate,
        });
    }
    Ok(())
}
