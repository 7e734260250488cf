//! Serialisable value types shared by the pipeline operations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::table::Table;

/// Semantic type of a column, as the explorer presents it.
///
/// Every semantic type is missing-capable: a column may hold nulls
/// regardless of its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    /// Any signed or unsigned integer dtype.
    Integer,
    /// Float32 or Float64.
    Float,
    Boolean,
    /// String or categorical values.
    Text,
    /// Anything else a caller handed in (dates, durations, nested types).
    Other,
}

impl SemanticType {
    /// Integer and float columns are numeric; booleans are not.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Text => "text",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name, type and missing count of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub semantic_type: SemanticType,
    /// Underlying polars dtype, for display.
    pub dtype: String,
    pub missing_count: usize,
}

/// Non-fatal flag raised when an operation leaves nothing behind.
///
/// Carried on the outcome rather than returned as an error so the caller can
/// warn the user and still keep (or discard) the empty table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyResultWarning {
    /// Zero rows remain.
    NoRows,
    /// Zero columns remain.
    NoColumns,
}

impl fmt::Display for EmptyResultWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRows => f.write_str("operation left no rows"),
            Self::NoColumns => f.write_str("operation left no columns"),
        }
    }
}

/// Result of a row- or column-removing cleaning operation.
#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    /// The new table. The input table is never modified.
    pub table: Table,
    pub rows_removed: usize,
    pub columns_removed: usize,
    /// Human-readable description of what was done.
    pub action: String,
    pub warning: Option<EmptyResultWarning>,
}

impl CleaningOutcome {
    pub(crate) fn new(
        table: Table,
        rows_removed: usize,
        columns_removed: usize,
        action: String,
    ) -> Self {
        let warning = if table.width() == 0 {
            Some(EmptyResultWarning::NoColumns)
        } else if table.height() == 0 {
            Some(EmptyResultWarning::NoRows)
        } else {
            None
        };

        Self {
            table,
            rows_removed,
            columns_removed,
            action,
            warning,
        }
    }

    /// Whether the caller should warn the user about an empty result.
    pub fn is_empty_result(&self) -> bool {
        self.warning.is_some()
    }
}

/// One column whose type was changed by coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeConversion {
    pub column: String,
    pub from: SemanticType,
    pub to: SemanticType,
}

/// Result of best-fit type coercion.
#[derive(Debug, Clone)]
pub struct CoercionOutcome {
    pub table: Table,
    /// Columns that changed type, in column order.
    pub conversions: Vec<TypeConversion>,
}

/// Quartiles and fences computed for the outlier filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierBounds {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl OutlierBounds {
    /// Whether `value` lies inside the closed interval `[lower, upper]`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Descriptive statistics for a numeric column.
///
/// Statistics other than `count` are `None` when the column has no
/// non-missing values; `std` also needs at least two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub column: String,
    pub semantic_type: SemanticType,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub q1: Option<f64>,
    #[serde(rename = "50%")]
    pub median: Option<f64>,
    #[serde(rename = "75%")]
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

/// Descriptive statistics for a non-numeric column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    pub column: String,
    pub semantic_type: SemanticType,
    pub count: usize,
    pub unique: usize,
    /// Most frequent value, rendered as text.
    pub top: Option<String>,
    /// Occurrences of `top`.
    pub freq: usize,
}

/// Output of `describe`: numeric and non-numeric summaries, each in table
/// column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub rows: usize,
    pub numeric: Vec<NumericSummary>,
    pub categorical: Vec<CategoricalSummary>,
}
