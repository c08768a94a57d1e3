//! Demonstration profiles covering the range of ages, salaries and tax
//! regimes the model supports.

use di_core::State;
use di_core::calculations::{
    DisposableIncomeCalculator, DisposableIncomeError, DisposableIncomeResult,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::debug;

use crate::utils::format_dollars;

/// One demonstration person.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoProfile {
    pub label: &'static str,
    pub age: i32,
    pub salary: Decimal,
    pub state: State,
    pub archetype: &'static str,
}

impl DemoProfile {
    /// Report heading, e.g. `P1: Age 23, $42,000, Texas - Entry-level, no state tax`.
    pub fn title(&self) -> String {
        format!(
            "{}: Age {}, ${}, {} - {}",
            self.label,
            self.age,
            format_dollars(self.salary),
            self.state,
            self.archetype
        )
    }
}

pub const DEMO_PROFILES: [DemoProfile; 8] = [
    DemoProfile {
        label: "P1",
        age: 23,
        salary: dec!(42000),
        state: State::Texas,
        archetype: "Entry-level, no state tax",
    },
    DemoProfile {
        label: "P2",
        age: 28,
        salary: dec!(65000),
        state: State::Illinois,
        archetype: "Young professional, flat tax",
    },
    DemoProfile {
        label: "P3",
        age: 40,
        salary: dec!(85000),
        state: State::Georgia,
        archetype: "Mid-career, South",
    },
    DemoProfile {
        label: "P4",
        age: 32,
        salary: dec!(145000),
        state: State::California,
        archetype: "Tech worker, high tax",
    },
    DemoProfile {
        label: "P5",
        age: 50,
        salary: dec!(210000),
        state: State::NewYork,
        archetype: "Senior professional, high tax",
    },
    DemoProfile {
        label: "P6",
        age: 60,
        salary: dec!(75000),
        state: State::Florida,
        archetype: "Pre-retirement, no state tax",
    },
    DemoProfile {
        label: "P7",
        age: 67,
        salary: dec!(48000),
        state: State::Georgia,
        archetype: "Early retiree",
    },
    DemoProfile {
        label: "P8",
        age: 22,
        salary: dec!(28000),
        state: State::Texas,
        archetype: "Low-income",
    },
];

/// A profile's calculation tagged with its label and archetype.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResult {
    pub label: &'static str,
    pub archetype: &'static str,
    #[serde(flatten)]
    pub result: DisposableIncomeResult,
}

/// Runs every demonstration profile, with regional blending.
///
/// # Errors
///
/// Returns the first [`DisposableIncomeError`] encountered.
pub fn run_all(
    calculator: &DisposableIncomeCalculator<'_>,
) -> Result<Vec<ProfileResult>, DisposableIncomeError> {
    DEMO_PROFILES
        .iter()
        .map(|profile| {
            debug!(profile = profile.label, "calculating demo profile");
            let result = calculator.calculate(profile.salary, profile.age, profile.state, true)?;
            Ok(ProfileResult {
                label: profile.label,
                archetype: profile.archetype,
                result,
            })
        })
        .collect()
}
