//! Tabular Cleaning Pipeline Library
//!
//! Loads delimited text into an immutable [`Table`], describes it, and applies
//! cleaning operations, built on Polars.
//!
//! # Overview
//!
//! - **Loading**: CSV bytes to a typed table, with missing markers normalised
//!   and each column inferred as integer, float, boolean or text
//! - **Profiling**: count / mean / std / quartiles for numeric columns,
//!   count / unique / top / freq for the rest
//! - **Cleaning**: drop incomplete rows or columns, best-fit type coercion
//! - **Outliers**: IQR fence filtering on a numeric column
//! - **Serialisation**: table back to CSV bytes
//!
//! Every operation takes a table by reference and returns a new one, so the
//! caller decides which intermediate results to keep.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use columbus::{describe, drop_empty_rows, filter_outliers, load, serialize_csv};
//!
//! let table = load(&std::fs::read("data.csv")?)?;
//! let summary = describe(&table)?;
//! println!("{}", summary.to_dataframe()?);
//!
//! let complete = drop_empty_rows(&table)?;
//! let filtered = filter_outliers(&complete.table, "price")?;
//! if let Some(warning) = filtered.warning {
//!     println!("Warning: {}", warning);
//! }
//!
//! std::fs::write("cleaned.csv", serialize_csv(&filtered.table)?)?;
//! ```
//!
//! # Configuration
//!
//! The free functions use [`ExplorerConfig::default()`]. Use an [`Explorer`]
//! for a custom delimiter, missing markers or IQR multiplier:
//!
//! ```rust,ignore
//! use columbus::{Explorer, ExplorerConfig};
//!
//! let config = ExplorerConfig::builder()
//!     .delimiter(b';')
//!     .missing_markers(["-", "?"])
//!     .iqr_multiplier(3.0)
//!     .build()?;
//!
//! let explorer = Explorer::builder().config(config).build()?;
//! let table = explorer.load(&bytes)?;
//! ```

pub mod cleaner;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod pipeline;
pub mod profiler;
pub mod table;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::{DataCleaner, TypeCorrector};
pub use config::{ConfigValidationError, ExplorerConfig, ExplorerConfigBuilder};
pub use error::{ExplorerError, Result as ExplorerResult, ResultExt};
pub use io::{CsvLoader, CsvSerializer};
pub use logging::init_logging;
pub use pipeline::{Explorer, ExplorerBuilder, OutlierHandler};
pub use profiler::DataProfiler;
pub use table::Table;
pub use types::{
    CategoricalSummary, CleaningOutcome, CoercionOutcome, ColumnDescriptor, EmptyResultWarning,
    NumericSummary, OutlierBounds, SemanticType, Summary, TypeConversion,
};

use error::Result;

/// Parse CSV bytes into a typed table using the default configuration.
pub fn load(bytes: &[u8]) -> Result<Table> {
    Explorer::default().load(bytes)
}

/// Summary statistics for every column of `table`.
pub fn describe(table: &Table) -> Result<Summary> {
    DataProfiler::describe(table)
}

/// Remove every row that contains a missing value.
pub fn drop_empty_rows(table: &Table) -> Result<CleaningOutcome> {
    DataCleaner.drop_empty_rows(table)
}

/// Remove every column that contains a missing value.
pub fn drop_empty_columns(table: &Table) -> Result<CleaningOutcome> {
    DataCleaner.drop_empty_columns(table)
}

/// Convert each column to its best-fit type using the default missing markers.
pub fn coerce_best_fit_types(table: &Table) -> Result<CoercionOutcome> {
    Explorer::default().coerce_best_fit_types(table)
}

/// Keep only rows whose `column` value lies within `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]`.
pub fn filter_outliers(table: &Table, column: &str) -> Result<CleaningOutcome> {
    OutlierHandler::default().filter_outliers(table, column)
}

/// The fences [`filter_outliers`] applies to `column`; `None` without values.
pub fn outlier_bounds(table: &Table, column: &str) -> Result<Option<OutlierBounds>> {
    OutlierHandler::default().bounds(table, column)
}

/// Serialise `table` as comma-separated text with a header row.
pub fn serialize_csv(table: &Table) -> Result<Vec<u8>> {
    Explorer::default().serialize_csv(table)
}
