//! Shared helpers for mapping polars dtypes and extracting column values.

use polars::prelude::*;

use crate::types::SemanticType;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    is_integer_dtype(dtype) || matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Check if a DataType is a signed or unsigned integer.
#[inline]
pub fn is_integer_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Map a polars dtype onto the explorer's semantic type.
pub fn semantic_type_of(dtype: &DataType) -> SemanticType {
    if is_integer_dtype(dtype) {
        SemanticType::Integer
    } else if is_numeric_dtype(dtype) {
        SemanticType::Float
    } else if matches!(dtype, DataType::Boolean) {
        SemanticType::Boolean
    } else if matches!(dtype, DataType::String | DataType::Categorical(_, _)) {
        SemanticType::Text
    } else {
        SemanticType::Other
    }
}

// =============================================================================
// Value Extraction
// =============================================================================

/// Values of a numeric series as `f64`, with nulls and NaN as `None`.
pub fn numeric_values(series: &Series) -> PolarsResult<Vec<Option<f64>>> {
    let float_series = series.cast(&DataType::Float64)?;
    let values = float_series
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    Ok(values)
}

/// Non-missing values of a numeric series, sorted ascending.
pub fn sorted_numeric_values(series: &Series) -> PolarsResult<Vec<f64>> {
    let mut values: Vec<f64> = numeric_values(series)?.into_iter().flatten().collect();
    values.sort_by(|a, b| a.total_cmp(b));
    Ok(values)
}

/// Per-row missing flags: null, or NaN in a float column.
pub fn missing_mask(series: &Series) -> PolarsResult<Vec<bool>> {
    if matches!(series.dtype(), DataType::Float32 | DataType::Float64) {
        return Ok(numeric_values(series)?
            .iter()
            .map(Option::is_none)
            .collect());
    }
    Ok(series
        .is_null()
        .into_iter()
        .map(|is_null| is_null.unwrap_or(false))
        .collect())
}

/// Number of missing values, counting float NaN as missing.
pub fn missing_count(series: &Series) -> PolarsResult<usize> {
    Ok(missing_mask(series)?.into_iter().filter(|&missing| missing).count())
}

/// Values of any series rendered as text, nulls kept as `None`.
///
/// Booleans render as `true`/`false`, numbers in their shortest form.
pub fn text_values(series: &Series) -> PolarsResult<Vec<Option<String>>> {
    let str_series = series.cast(&DataType::String)?;
    let values = str_series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect();
    Ok(values)
}
