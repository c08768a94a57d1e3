use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An (income, effective rate) point on a state schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBreakpoint {
    pub income: Decimal,
    pub rate: Decimal,
}

impl RateBreakpoint {
    pub const fn new(
        income: Decimal,
        rate: Decimal,
    ) -> Self {
        Self { income, rate }
    }
}

/// Effective state income tax rate as a piecewise-linear function of gross
/// income.
///
/// Breakpoints are in ascending income order and the first one sits at zero.
/// A schedule with a single breakpoint is a flat rate (this is also how
/// states without an income tax are encoded, with a rate of zero).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateTaxSchedule {
    breakpoints: Vec<RateBreakpoint>,
}

impl StateTaxSchedule {
    pub fn new(breakpoints: Vec<RateBreakpoint>) -> Self {
        Self { breakpoints }
    }

    /// A one-point schedule applying `rate` at every income level.
    pub fn flat(rate: Decimal) -> Self {
        Self::new(vec![RateBreakpoint::new(Decimal::ZERO, rate)])
    }

    pub fn breakpoints(&self) -> &[RateBreakpoint] {
        &self.breakpoints
    }

    pub fn is_flat(&self) -> bool {
        self.breakpoints.len() == 1
    }

    /// Thresholds where two consecutive breakpoints share the same income.
    pub fn zero_width_thresholds(&self) -> Vec<Decimal> {
        self.breakpoints
            .windows(2)
            .filter(|pair| pair[0].income == pair[1].income)
            .map(|pair| pair[0].income)
            .collect()
    }

    /// Effective rate at `income`.
    ///
    /// Linearly interpolates between the first pair of adjacent breakpoints
    /// that brackets `income` (inclusive at both ends). A zero-width pair
    /// yields the lower breakpoint's rate. Incomes past the last breakpoint
    /// use the last rate; there is no extrapolation.
    pub fn effective_rate(
        &self,
        income: Decimal,
    ) -> Decimal {
        let points = match self.breakpoints.as_slice() {
            [] => return Decimal::ZERO,
            [only] => return only.rate,
            points => points,
        };

        for pair in points.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if lo.income <= income && income <= hi.income {
                if hi.income == lo.income {
                    return lo.rate;
                }
                let fraction = (income - lo.income) / (hi.income - lo.income);
                return lo.rate + fraction * (hi.rate - lo.rate);
            }
        }

        points[points.len() - 1].rate
    }
}
