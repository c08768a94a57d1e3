mod category;
mod demographics;
mod expenditure_table;
mod state_tax_schedule;
mod tax_bracket;

pub use category::{Category, CategoryCoefficients};
pub use demographics::{AgeGroup, ParseLabelError, Region, State};
pub use expenditure_table::ExpenditureTable;
pub use state_tax_schedule::{RateBreakpoint, StateTaxSchedule};
pub use tax_bracket::TaxBracket;
