//! Missing-value normalisation.

use polars::prelude::*;

use crate::config::ExplorerConfig;
use crate::utils::text_values;

/// Text values of `series`, with empty fields and missing markers as `None`.
pub(crate) fn normalized_text_values(
    series: &Series,
    config: &ExplorerConfig,
) -> PolarsResult<Vec<Option<String>>> {
    Ok(text_values(series)?
        .into_iter()
        .map(|value| value.filter(|v| !config.is_missing(v)))
        .collect())
}
