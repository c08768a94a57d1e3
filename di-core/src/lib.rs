pub mod calculations;
pub mod calibration;
pub mod models;

#[cfg(test)]
mod test_support;

pub use calibration::{Calibration, CalibrationError};
pub use models::*;
