use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One bracket of a progressive federal schedule.
///
/// A schedule is an ordered slice of brackets with strictly increasing
/// `upper_bound`; the last bracket has no upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Top of the bracket in taxable income. `None` for the top bracket.
    pub upper_bound: Option<Decimal>,
    /// Marginal rate applied to income inside the bracket.
    pub rate: Decimal,
}

impl TaxBracket {
    pub const fn bounded(
        upper_bound: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    pub const fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }
}
