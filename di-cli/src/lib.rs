//! Command-line front end for the disposable income estimator.

pub mod app;
pub mod logging;
pub mod profiles;
pub mod report;
pub mod utils;
