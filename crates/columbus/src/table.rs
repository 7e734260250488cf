//! The in-memory table passed between pipeline operations.

use polars::prelude::*;

use crate::error::{ExplorerError, Result};
use crate::types::{ColumnDescriptor, SemanticType};
use crate::utils::{missing_count, semantic_type_of};

/// An ordered set of named, equal-length columns.
///
/// A `Table` is an immutable value: every pipeline operation takes a table by
/// reference and returns a new one, so a caller keeping the previous value
/// gets undo for free. Column names are unique and all columns have the same
/// length; both are guaranteed by the underlying polars frame.
#[derive(Debug, Clone)]
pub struct Table {
    df: DataFrame,
}

impl Table {
    /// Wrap a polars frame.
    pub fn from_dataframe(df: DataFrame) -> Self {
        Self { df }
    }

    /// A table with no columns and no rows.
    pub fn empty() -> Self {
        Self {
            df: DataFrame::empty(),
        }
    }

    pub fn as_dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn into_dataframe(self) -> DataFrame {
        self.df
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        self.df.shape()
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn width(&self) -> usize {
        self.df.width()
    }

    /// True when the table has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.height() == 0 || self.width() == 0
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Semantic type of the named column.
    pub fn column_type(&self, name: &str) -> Result<SemanticType> {
        Ok(semantic_type_of(self.series(name)?.dtype()))
    }

    /// Name, semantic type and missing count of every column.
    ///
    /// NaN in a float column counts as missing.
    pub fn descriptors(&self) -> Result<Vec<ColumnDescriptor>> {
        self.df
            .get_columns()
            .iter()
            .map(|col| {
                let series = col.as_materialized_series();
                Ok(ColumnDescriptor {
                    name: series.name().to_string(),
                    semantic_type: semantic_type_of(series.dtype()),
                    dtype: series.dtype().to_string(),
                    missing_count: missing_count(series)?,
                })
            })
            .collect()
    }

    /// The first `n` rows (the whole table if it is shorter).
    pub fn head(&self, n: usize) -> Table {
        Table::from_dataframe(self.df.head(Some(n)))
    }

    /// A new table holding only `columns`, in the requested order.
    pub fn select(&self, columns: &[&str]) -> Result<Table> {
        for name in columns {
            self.series(name)?;
        }
        let df = self.df.select(columns.iter().copied())?;
        Ok(Table::from_dataframe(df))
    }

    pub(crate) fn series(&self, name: &str) -> Result<&Series> {
        self.df
            .column(name)
            .map(|col| col.as_materialized_series())
            .map_err(|_| ExplorerError::ColumnNotFound(name.to_string()))
    }
}

impl From<DataFrame> for Table {
    fn from(df: DataFrame) -> Self {
        Table::from_dataframe(df)
    }
}

/// Tables are equal when names, dtypes and values (missing included) match.
impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.df.schema() == other.df.schema() && self.df.equals_missing(&other.df)
    }
}
