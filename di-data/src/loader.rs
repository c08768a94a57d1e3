//! Loader for BLS Consumer Expenditure Survey tables.
//!
//! ## CSV Format
//!
//! A CSV export of the survey's "Expenditures (U.S.)" sheet. The first column
//! holds the line item label; the remaining columns are headed by age-group
//! and region labels. Column order does not matter and unrecognized columns
//! are ignored, but all seven age groups and four regions must be present.
//!
//! | Row label | Used as |
//! |-----------|---------|
//! | `Mean income before taxes` | Reference income per age group and region |
//! | One of the 14 category labels | Baseline expenditure for the category |
//! | Anything else (`All expenditures`, section headings, ...) | Skipped |
//!
//! Cells may carry `$` signs and thousands separators. Empty cells are
//! treated as missing.
//!
//! ### Example
//!
//! ```csv
//! Item,Under 25,25-34,35-44,45-54,55-64,65-74,75 and older,Northeast,Midwest,South,West
//! Mean income before taxes,"$48,514","$98,745",...
//! Food,"7,215","9,630",...
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

use di_core::{AgeGroup, Category, ExpenditureTable, Region};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

/// Label of the row holding mean income before taxes.
pub const MEAN_INCOME_ROW: &str = "Mean income before taxes";

/// Errors that can occur while loading expenditure data.
#[derive(Debug, Error)]
pub enum ExpenditureLoaderError {
    /// The underlying CSV reader failed (I/O, malformed quoting, ...).
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// A required age-group or region column is absent from the header.
    #[error("missing column '{0}'")]
    MissingColumn(String),

    /// An age-group or region column appears more than once in the header.
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    /// A cell could not be read as a number. `row` is the 1-based line
    /// number in the file.
    #[error("invalid number '{value}' on row {row}, column '{column}'")]
    InvalidNumber {
        row: u64,
        column: String,
        value: String,
    },
}

/// Where a data column's values go.
#[derive(Debug, Clone, Copy)]
enum Column {
    AgeGroup(AgeGroup),
    Region(Region),
}

impl Column {
    fn label(&self) -> &'static str {
        match self {
            Self::AgeGroup(age_group) => age_group.label(),
            Self::Region(region) => region.label(),
        }
    }
}

/// What a data row holds.
enum RowKind {
    MeanIncome,
    Category(Category),
}

/// Loader for expenditure tables.
pub struct ExpenditureLoader;

impl ExpenditureLoader {
    /// Parse an expenditure table from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or a
    /// byte slice.
    ///
    /// # Errors
    ///
    /// * [`ExpenditureLoaderError::Csv`] if the CSV is structurally invalid.
    /// * [`ExpenditureLoaderError::MissingColumn`] if an age-group or region
    ///   column is absent.
    /// * [`ExpenditureLoaderError::DuplicateColumn`] if an age-group or region
    ///   column is repeated.
    /// * [`ExpenditureLoaderError::InvalidNumber`] if a cell in a used row is
    ///   not a number.
    pub fn parse<R: Read>(reader: R) -> Result<ExpenditureTable, ExpenditureLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = Self::map_columns(csv_reader.headers()?)?;
        let mut table = ExpenditureTable::new();

        for result in csv_reader.records() {
            let record = result?;
            let row = record.position().map_or(0, |position| position.line());
            let label = record.get(0).unwrap_or_default();

            let kind = if label.eq_ignore_ascii_case(MEAN_INCOME_ROW) {
                RowKind::MeanIncome
            } else {
                match Category::parse(label) {
                    Ok(category) => RowKind::Category(category),
                    Err(_) => {
                        debug!(row, label, "Skipping unrecognized row");
                        continue;
                    }
                }
            };

            for (&index, &column) in &columns {
                let Some(amount) = parse_amount(record.get(index).unwrap_or_default())
                    .map_err(|value| ExpenditureLoaderError::InvalidNumber {
                        row,
                        column: column.label().to_string(),
                        value,
                    })?
                else {
                    continue;
                };

                match (&kind, column) {
                    (RowKind::MeanIncome, Column::AgeGroup(age_group)) => {
                        table.mean_income_by_age_group.insert(age_group, amount);
                    }
                    (RowKind::MeanIncome, Column::Region(region)) => {
                        table.mean_income_by_region.insert(region, amount);
                    }
                    (RowKind::Category(category), Column::AgeGroup(age_group)) => {
                        table.set_age_group_amount(age_group, *category, amount);
                    }
                    (RowKind::Category(category), Column::Region(region)) => {
                        table.set_region_amount(region, *category, amount);
                    }
                }
            }
        }

        Ok(table)
    }

    /// Parse an expenditure table from a CSV file on disk.
    ///
    /// # Errors
    ///
    /// See [`ExpenditureLoader::parse`]; failing to open the file is reported
    /// as [`ExpenditureLoaderError::Csv`].
    pub fn load(path: &Path) -> Result<ExpenditureTable, ExpenditureLoaderError> {
        let file = std::fs::File::open(path).map_err(csv::Error::from)?;
        Self::parse(file)
    }

    /// Maps header positions to age groups and regions, skipping the label
    /// column.
    fn map_columns(
        headers: &csv::StringRecord
    ) -> Result<BTreeMap<usize, Column>, ExpenditureLoaderError> {
        let mut columns = BTreeMap::new();
        let mut seen = BTreeSet::new();

        for (index, header) in headers.iter().enumerate().skip(1) {
            let column = if let Ok(age_group) = AgeGroup::parse(header) {
                Column::AgeGroup(age_group)
            } else if let Ok(region) = Region::parse(header) {
                Column::Region(region)
            } else {
                debug!(header, "Ignoring unrecognized column");
                continue;
            };

            if !seen.insert(column.label()) {
                return Err(ExpenditureLoaderError::DuplicateColumn(
                    column.label().to_string(),
                ));
            }
            columns.insert(index, column);
        }

        let required = AgeGroup::ALL
            .into_iter()
            .map(Column::AgeGroup)
            .chain(Region::ALL.into_iter().map(Column::Region));
        for column in required {
            if !seen.contains(column.label()) {
                return Err(ExpenditureLoaderError::MissingColumn(
                    column.label().to_string(),
                ));
            }
        }

        Ok(columns)
    }
}

/// Parses a cell like `"$1,234.50"`. Empty cells yield `None`; anything else
/// unparseable is returned as the error value.
fn parse_amount(cell: &str) -> Result<Option<Decimal>, String> {
    let cleaned: String = cell
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return Ok(None);
    }
    cleaned
        .parse::<Decimal>()
        .map(Some)
        .map_err(|_| cell.to_string())
}
