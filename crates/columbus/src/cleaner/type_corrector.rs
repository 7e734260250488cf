//! Best-fit type coercion.

use polars::prelude::*;
use tracing::{debug, info};

use super::converters::{best_fit_series, narrow_to_integers};
use super::sanitizers::normalized_text_values;
use crate::config::ExplorerConfig;
use crate::error::Result;
use crate::table::Table;
use crate::types::{CoercionOutcome, SemanticType, TypeConversion};
use crate::utils::{numeric_values, semantic_type_of};

/// Converts columns to the most specific type that accepts all their values.
pub struct TypeCorrector<'a> {
    config: &'a ExplorerConfig,
}

impl<'a> TypeCorrector<'a> {
    pub fn new(config: &'a ExplorerConfig) -> Self {
        Self { config }
    }

    /// Coerce every column of `table` to its best-fit type.
    ///
    /// - Text columns have their missing markers normalised, then become
    ///   integer, float or boolean when every present value parses as one.
    /// - Float columns holding only whole numbers become integer.
    /// - Integer, boolean and other columns are left alone.
    pub fn coerce_best_fit_types(&self, table: &Table) -> Result<CoercionOutcome> {
        let mut df = table.as_dataframe().clone();
        let mut conversions = Vec::new();

        debug!("Analyzing column types for coercion...");

        for col in table.as_dataframe().get_columns() {
            let series = col.as_materialized_series();
            let from = semantic_type_of(series.dtype());

            let corrected = match from {
                SemanticType::Text => Some(self.infer_text_column(series)?),
                SemanticType::Float => narrow_float_column(series)?,
                _ => None,
            };

            let Some(corrected) = corrected else {
                continue;
            };

            let to = semantic_type_of(corrected.dtype());
            let name = series.name().to_string();
            df.replace(&name, corrected)?;

            if to != from {
                debug!("  Coerced '{}' from {} to {}", name, from, to);
                conversions.push(TypeConversion {
                    column: name,
                    from,
                    to,
                });
            }
        }

        info!(
            "Type coercion converted {} of {} columns",
            conversions.len(),
            df.width()
        );

        Ok(CoercionOutcome {
            table: Table::from_dataframe(df),
            conversions,
        })
    }

    /// Re-type a text column: normalise missing markers, then pick the
    /// best-fit type.
    pub(crate) fn infer_text_column(&self, series: &Series) -> PolarsResult<Series> {
        let values = normalized_text_values(series, self.config)?;
        Ok(best_fit_series(series.name().clone(), &values))
    }
}

/// Integer version of a float column, if every present value is whole.
fn narrow_float_column(series: &Series) -> PolarsResult<Option<Series>> {
    let values = numeric_values(series)?;
    if values.iter().all(Option::is_none) {
        return Ok(None);
    }

    Ok(narrow_to_integers(&values).map(|integers| Series::new(series.name().clone(), integers)))
}
