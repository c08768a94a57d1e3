//! Income model calculations.
//!
//! The tax and expenditure models run independently over the same inputs;
//! [`DisposableIncomeCalculator`] composes them into a single result.

pub mod common;
pub mod disposable;
pub mod expenditure;
pub mod tax;

pub use disposable::{
    DisposableIncomeCalculator, DisposableIncomeError, DisposableIncomeResult, ErrorKind, MAX_AGE,
};
pub use expenditure::{
    CategoryBreakdown, ExpenditureError, ExpenditureModel, ExpenditureResult, resolve_age_group,
    resolve_region, scale_by_income,
};
pub use tax::{FicaResult, TaxCalculator, TaxError, TaxResult};
