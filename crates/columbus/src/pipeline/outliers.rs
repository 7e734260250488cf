//! Outlier handling module.
//!
//! Filters rows whose value in a numeric column falls outside the Tukey
//! fences `Q1 - k*IQR` and `Q3 + k*IQR`. Quartiles are computed with linear
//! interpolation over the sorted non-missing values of the input table, so a
//! second pass recomputes the fences from the already-filtered rows.

use polars::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{ExplorerError, Result};
use crate::profiler::statistics::quantile;
use crate::table::Table;
use crate::types::{CleaningOutcome, OutlierBounds};
use crate::utils::{numeric_values, semantic_type_of, sorted_numeric_values};

/// Handles outlier detection and removal.
pub struct OutlierHandler {
    multiplier: f64,
}

impl OutlierHandler {
    pub fn new(multiplier: f64) -> Self {
        Self { multiplier }
    }

    /// Quartiles and fences for `column`; `None` when it has no values.
    pub fn bounds(&self, table: &Table, column: &str) -> Result<Option<OutlierBounds>> {
        let series = numeric_series(table, column)?;
        let sorted = sorted_numeric_values(series)?;

        let (Some(q1), Some(q3)) = (quantile(&sorted, 0.25), quantile(&sorted, 0.75)) else {
            return Ok(None);
        };
        let iqr = q3 - q1;

        Ok(Some(OutlierBounds {
            q1,
            q3,
            iqr,
            lower: q1 - self.multiplier * iqr,
            upper: q3 + self.multiplier * iqr,
        }))
    }

    /// Keep only rows whose `column` value lies within the fences.
    ///
    /// Rows with a missing value in `column` are dropped as well.
    pub fn filter_outliers(&self, table: &Table, column: &str) -> Result<CleaningOutcome> {
        let bounds = self.bounds(table, column)?;
        let series = numeric_series(table, column)?;
        let original_rows = table.height();

        let mask_values: Vec<bool> = match bounds {
            Some(bounds) => {
                debug!(
                    "Column '{}': Q1={}, Q3={}, IQR={}, fences=[{}, {}]",
                    column, bounds.q1, bounds.q3, bounds.iqr, bounds.lower, bounds.upper
                );
                numeric_values(series)?
                    .into_iter()
                    .map(|value| value.is_some_and(|v| bounds.contains(v)))
                    .collect()
            }
            None => vec![false; original_rows],
        };

        let mask = BooleanChunked::from_slice("mask".into(), &mask_values);
        let filtered = table.as_dataframe().filter(&mask)?;

        let rows_removed = original_rows - filtered.height();
        let action = if rows_removed > 0 {
            format!(
                "Removed {} rows with outlying or missing '{}' values",
                rows_removed, column
            )
        } else {
            format!("No outliers found in '{}'", column)
        };
        debug!("{}", action);

        let outcome =
            CleaningOutcome::new(Table::from_dataframe(filtered), rows_removed, 0, action);
        if outcome.is_empty_result() {
            warn!("Outlier filter on '{}' left no rows", column);
        }
        info!("Filtered outliers in '{}': {:?}", column, outcome.table.shape());

        Ok(outcome)
    }
}

impl Default for OutlierHandler {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_IQR_MULTIPLIER)
    }
}

/// Look up `column` and require it to be integer or float.
fn numeric_series<'a>(table: &'a Table, column: &str) -> Result<&'a Series> {
    let series = table.series(column)?;
    let found = semantic_type_of(series.dtype());
    if !found.is_numeric() {
        return Err(ExplorerError::Type {
            column: column.to_string(),
            expected: "numeric",
            found,
        });
    }
    Ok(series)
}
