//! The `Explorer` façade and its builder.
//!
//! An [`Explorer`] binds every pipeline operation to one validated
//! [`ExplorerConfig`]. It holds no table state: callers pass the table they
//! want to operate on and keep whichever results they need.

use tracing::debug;

use crate::cleaner::{DataCleaner, TypeCorrector};
use crate::config::ExplorerConfig;
use crate::error::Result;
use crate::io::{CsvLoader, CsvSerializer};
use crate::pipeline::OutlierHandler;
use crate::profiler::DataProfiler;
use crate::table::Table;
use crate::types::{CleaningOutcome, CoercionOutcome, OutlierBounds, Summary};

/// Entry point for loading, inspecting and cleaning tables.
///
/// Use [`Explorer::builder()`] to create one with a custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use columbus::{Explorer, ExplorerConfig};
///
/// let explorer = Explorer::builder()
///     .config(ExplorerConfig::builder().delimiter(b';').build()?)
///     .build()?;
///
/// let table = explorer.load(&bytes)?;
/// let cleaned = explorer.drop_empty_rows(&table)?;
/// let filtered = explorer.filter_outliers(&cleaned.table, "price")?;
/// let csv = explorer.serialize_csv(&filtered.table)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Explorer {
    config: ExplorerConfig,
}

// Hosts move the explorer and its tables across threads
static_assertions::assert_impl_all!(Explorer: Send, Sync);
static_assertions::assert_impl_all!(Table: Send, Sync);

impl Explorer {
    /// Create a new explorer builder.
    pub fn builder() -> ExplorerBuilder {
        ExplorerBuilder::default()
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Parse delimited bytes into a typed table.
    pub fn load(&self, bytes: &[u8]) -> Result<Table> {
        CsvLoader::new(&self.config).load(bytes)
    }

    /// Summary statistics for every column.
    pub fn describe(&self, table: &Table) -> Result<Summary> {
        DataProfiler::describe(table)
    }

    /// Remove every row with a missing value.
    pub fn drop_empty_rows(&self, table: &Table) -> Result<CleaningOutcome> {
        DataCleaner.drop_empty_rows(table)
    }

    /// Remove every column with a missing value.
    pub fn drop_empty_columns(&self, table: &Table) -> Result<CleaningOutcome> {
        DataCleaner.drop_empty_columns(table)
    }

    /// Convert each column to its best-fit type.
    pub fn coerce_best_fit_types(&self, table: &Table) -> Result<CoercionOutcome> {
        TypeCorrector::new(&self.config).coerce_best_fit_types(table)
    }

    /// Keep only rows whose `column` value lies within the IQR fences.
    pub fn filter_outliers(&self, table: &Table, column: &str) -> Result<CleaningOutcome> {
        self.outlier_handler().filter_outliers(table, column)
    }

    /// The fences `filter_outliers` would apply to `column`.
    pub fn outlier_bounds(&self, table: &Table, column: &str) -> Result<Option<OutlierBounds>> {
        self.outlier_handler().bounds(table, column)
    }

    /// Serialise `table` as delimited text.
    pub fn serialize_csv(&self, table: &Table) -> Result<Vec<u8>> {
        CsvSerializer::new(&self.config).serialize(table)
    }

    fn outlier_handler(&self) -> OutlierHandler {
        OutlierHandler::new(self.config.iqr_multiplier)
    }
}

/// Builder for [`Explorer`].
#[derive(Debug, Default)]
pub struct ExplorerBuilder {
    config: Option<ExplorerConfig>,
}

impl ExplorerBuilder {
    /// Set the explorer configuration.
    pub fn config(mut self, config: ExplorerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the explorer.
    ///
    /// Returns [`ExplorerError::InvalidConfig`](crate::ExplorerError::InvalidConfig)
    /// if the configuration is invalid.
    pub fn build(self) -> Result<Explorer> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        debug!("Built explorer with {:?}", config);

        Ok(Explorer { config })
    }
}
