pub mod loader;
pub mod validate;

pub use loader::{ExpenditureLoader, ExpenditureLoaderError};
pub use validate::{ExpenditureTableError, validate};
