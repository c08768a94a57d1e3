//! 2025 calibration constants.
//!
//! Sources:
//! - IRS Rev. Proc. 2024-61: 2025 single-filer brackets and standard deduction
//! - SSA 2025: Social Security wage base
//! - Tax Foundation 2025: state effective-rate schedules (single filer)
//! - BLS CES 2024: essential fractions
//! - Banks, Blundell & Lewbel (1997): income elasticities
//! - BLS CPS Table A-9 (2024): annualized median earnings by age group

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{BlendWeights, Calibration, FicaParameters};
use crate::models::{
    AgeGroup, Category, CategoryCoefficients, RateBreakpoint, State, StateTaxSchedule, TaxBracket,
};

pub(super) fn tax_year_2025() -> Calibration {
    Calibration {
        tax_year: 2025,
        standard_deduction: dec!(15000),
        federal_brackets: federal_brackets_single(),
        fica: FicaParameters {
            ss_rate: dec!(0.062),
            ss_wage_base: dec!(176100),
            medicare_rate: dec!(0.0145),
            medicare_surcharge_rate: dec!(0.009),
            medicare_surcharge_threshold: dec!(200000),
        },
        state_schedules: state_schedules(),
        category_coefficients: category_coefficients(),
        fallback_income_by_age_group: fallback_income_by_age_group(),
        blend_weights: BlendWeights {
            age_group: dec!(0.6),
            region: dec!(0.4),
        },
    }
}

fn federal_brackets_single() -> Vec<TaxBracket> {
    vec![
        TaxBracket::bounded(dec!(11925), dec!(0.10)),
        TaxBracket::bounded(dec!(48475), dec!(0.12)),
        TaxBracket::bounded(dec!(103350), dec!(0.22)),
        TaxBracket::bounded(dec!(197300), dec!(0.24)),
        TaxBracket::bounded(dec!(250525), dec!(0.32)),
        TaxBracket::bounded(dec!(626350), dec!(0.35)),
        TaxBracket::unbounded(dec!(0.37)),
    ]
}

fn schedule(points: &[(Decimal, Decimal)]) -> StateTaxSchedule {
    StateTaxSchedule::new(
        points
            .iter()
            .map(|&(income, rate)| RateBreakpoint::new(income, rate))
            .collect(),
    )
}

fn state_schedules() -> BTreeMap<State, StateTaxSchedule> {
    let mut schedules = BTreeMap::new();

    // No wage income tax
    for state in [
        State::Texas,
        State::Florida,
        State::Nevada,
        State::Washington,
        State::Wyoming,
        State::Tennessee,
    ] {
        schedules.insert(state, StateTaxSchedule::flat(Decimal::ZERO));
    }

    // Flat rates
    schedules.insert(State::Pennsylvania, StateTaxSchedule::flat(dec!(0.0307)));
    schedules.insert(State::Michigan, StateTaxSchedule::flat(dec!(0.0425)));
    schedules.insert(State::NorthCarolina, StateTaxSchedule::flat(dec!(0.045)));
    schedules.insert(State::Colorado, StateTaxSchedule::flat(dec!(0.044)));
    schedules.insert(State::Arizona, StateTaxSchedule::flat(dec!(0.025)));
    schedules.insert(State::Massachusetts, StateTaxSchedule::flat(dec!(0.050)));

    // 4.95% flat, with the exemption credit lowering low-income effective rates
    schedules.insert(
        State::Illinois,
        schedule(&[
            (dec!(0), dec!(0.020)),
            (dec!(30000), dec!(0.040)),
            (dec!(50000), dec!(0.046)),
            (dec!(75000), dec!(0.048)),
            (dec!(100000), dec!(0.049)),
            (dec!(200000), dec!(0.049)),
        ]),
    );

    schedules.insert(
        State::Georgia,
        schedule(&[
            (dec!(0), dec!(0.00)),
            (dec!(20000), dec!(0.025)),
            (dec!(40000), dec!(0.038)),
            (dec!(60000), dec!(0.042)),
            (dec!(85000), dec!(0.044)),
            (dec!(150000), dec!(0.047)),
            (dec!(300000), dec!(0.049)),
        ]),
    );

    // State tax only, NYC city tax excluded
    schedules.insert(
        State::NewYork,
        schedule(&[
            (dec!(0), dec!(0.00)),
            (dec!(20000), dec!(0.030)),
            (dec!(40000), dec!(0.045)),
            (dec!(65000), dec!(0.055)),
            (dec!(100000), dec!(0.060)),
            (dec!(150000), dec!(0.065)),
            (dec!(300000), dec!(0.070)),
            (dec!(500000), dec!(0.080)),
            (dec!(1000000), dec!(0.090)),
        ]),
    );

    schedules.insert(
        State::California,
        schedule(&[
            (dec!(0), dec!(0.00)),
            (dec!(20000), dec!(0.030)),
            (dec!(40000), dec!(0.052)),
            (dec!(65000), dec!(0.068)),
            (dec!(100000), dec!(0.078)),
            (dec!(150000), dec!(0.085)),
            (dec!(300000), dec!(0.095)),
            (dec!(500000), dec!(0.105)),
            (dec!(1000000), dec!(0.120)),
        ]),
    );

    schedules.insert(
        State::Ohio,
        schedule(&[
            (dec!(0), dec!(0.00)),
            (dec!(26050), dec!(0.025)),
            (dec!(100000), dec!(0.033)),
            (dec!(115300), dec!(0.040)),
        ]),
    );

    // The repeated 17,001 threshold is in the published table; kept as-is.
    schedules.insert(
        State::Virginia,
        schedule(&[
            (dec!(0), dec!(0.00)),
            (dec!(17000), dec!(0.020)),
            (dec!(17001), dec!(0.030)),
            (dec!(17001), dec!(0.050)),
            (dec!(50000), dec!(0.055)),
            (dec!(100000), dec!(0.057)),
            (dec!(200000), dec!(0.058)),
        ]),
    );

    schedules
}

fn category_coefficients() -> BTreeMap<Category, CategoryCoefficients> {
    [
        (Category::Food, dec!(0.70), dec!(0.55)),
        (Category::Housing, dec!(1.00), dec!(0.70)),
        (Category::Utilities, dec!(1.00), dec!(0.60)),
        (Category::HouseholdOperations, dec!(0.50), dec!(0.90)),
        (Category::HousekeepingSupplies, dec!(0.70), dec!(0.75)),
        (Category::HouseholdFurnishings, dec!(0.20), dec!(1.10)),
        (Category::Apparel, dec!(0.60), dec!(0.85)),
        (Category::Transportation, dec!(0.75), dec!(0.80)),
        (Category::Healthcare, dec!(1.00), dec!(0.65)),
        (Category::Entertainment, dec!(0.00), dec!(1.20)),
        (Category::PersonalCare, dec!(0.80), dec!(0.75)),
        (Category::Education, dec!(0.50), dec!(0.90)),
        (Category::Miscellaneous, dec!(0.00), dec!(1.00)),
        // Only life/health premiums; pensions and SS contributions are out.
        (Category::PersonalInsurance, dec!(0.10), dec!(0.95)),
    ]
    .into_iter()
    .map(|(category, alpha, beta)| (category, CategoryCoefficients::new(alpha, beta)))
    .collect()
}

fn fallback_income_by_age_group() -> BTreeMap<AgeGroup, Decimal> {
    BTreeMap::from([
        (AgeGroup::Under25, dec!(42000)),
        (AgeGroup::From25To34, dec!(62000)),
        (AgeGroup::From35To44, dec!(83000)),
        (AgeGroup::From45To54, dec!(88000)),
        (AgeGroup::From55To64, dec!(80000)),
        (AgeGroup::From65To74, dec!(58000)),
        (AgeGroup::From75, dec!(44000)),
    ])
}
