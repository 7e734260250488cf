//! Data cleaning operations.
//!
//! This module provides:
//! - Removing rows that contain missing values
//! - Removing columns that contain missing values
//! - Best-fit type coercion
//!
//! Every operation returns a new [`Table`]; the input is never modified.

mod converters;
mod sanitizers;
mod type_corrector;

pub use type_corrector::TypeCorrector;

use polars::prelude::*;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::table::Table;
use crate::types::CleaningOutcome;
use crate::utils::{missing_count, missing_mask};

/// Removes incomplete rows or columns.
pub struct DataCleaner;

impl DataCleaner {
    /// Remove every row that has a missing value in any column.
    ///
    /// NaN in a float column counts as missing.
    ///
    /// Retained rows keep their original order.
    pub fn drop_empty_rows(&self, table: &Table) -> Result<CleaningOutcome> {
        let df = table.as_dataframe();
        let before_rows = df.height();

        let mut keep = vec![true; before_rows];
        for col in df.get_columns() {
            let missing = missing_mask(col.as_materialized_series())?;
            for (flag, is_missing) in keep.iter_mut().zip(missing) {
                if is_missing {
                    *flag = false;
                }
            }
        }

        let mask = BooleanChunked::from_slice("mask".into(), &keep);
        let cleaned = df.filter(&mask)?;

        let rows_removed = before_rows - cleaned.height();
        let action = if rows_removed > 0 {
            let pct = (rows_removed as f64 / before_rows as f64) * 100.0;
            format!(
                "Removed {} rows with missing values ({:.1}%)",
                rows_removed, pct
            )
        } else {
            "No rows with missing values found".to_string()
        };
        debug!("{}", action);

        let outcome =
            CleaningOutcome::new(Table::from_dataframe(cleaned), rows_removed, 0, action);
        if outcome.is_empty_result() && before_rows > 0 {
            warn!("Every row contained a missing value; no rows remain");
        }
        info!("Dropped empty rows: {:?}", outcome.table.shape());

        Ok(outcome)
    }

    /// Remove every column that has at least one missing value.
    pub fn drop_empty_columns(&self, table: &Table) -> Result<CleaningOutcome> {
        let df = table.as_dataframe();

        let mut incomplete_cols: Vec<PlSmallStr> = Vec::new();
        for col in df.get_columns() {
            let series = col.as_materialized_series();
            if missing_count(series)? > 0 {
                incomplete_cols.push(series.name().clone());
            }
        }

        let columns_removed = incomplete_cols.len();
        let action = if columns_removed > 0 {
            let action = format!(
                "Removed {} columns with missing values: {:?}",
                columns_removed, incomplete_cols
            );
            debug!("{}", action);
            action
        } else {
            "No columns with missing values found".to_string()
        };

        let cleaned = if columns_removed == df.width() {
            DataFrame::empty()
        } else {
            df.drop_many(incomplete_cols)
        };

        let outcome =
            CleaningOutcome::new(Table::from_dataframe(cleaned), 0, columns_removed, action);
        if outcome.is_empty_result() && columns_removed > 0 {
            warn!("Every column contained a missing value; no columns remain");
        }
        info!("Dropped empty columns: {:?}", outcome.table.shape());

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EmptyResultWarning;
    use pretty_assertions::assert_eq;

    fn table_with_gaps() -> Table {
        Table::from_dataframe(
            df![
                "id" => [1i64, 2, 3, 4],
                "name" => [Some("a"), None, Some("c"), Some("d")],
                "score" => [Some(1.0), Some(2.0), Some(3.0), None],
            ]
            .unwrap(),
        )
    }

    #[test]
    fn test_drop_empty_rows_keeps_complete_rows_in_order() {
        let outcome = DataCleaner.drop_empty_rows(&table_with_gaps()).unwrap();

        assert_eq!(outcome.rows_removed, 2);
        assert_eq!(outcome.warning, None);
        let ids: Vec<Option<i64>> = outcome
            .table
            .series("id")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(ids, vec![Some(1), Some(3)]);
        assert!(
            outcome
                .table
                .descriptors()
                .unwrap()
                .iter()
                .all(|d| d.missing_count == 0)
        );
    }

    #[test]
    fn test_drop_empty_rows_does_not_mutate_input() {
        let table = table_with_gaps();
        let _ = DataCleaner.drop_empty_rows(&table).unwrap();
        assert_eq!(table.height(), 4);
    }

    #[test]
    fn test_drop_empty_rows_complete_table_unchanged() {
        let table = Table::from_dataframe(df!["x" => [1i64, 2]].unwrap());
        let outcome = DataCleaner.drop_empty_rows(&table).unwrap();
        assert_eq!(outcome.rows_removed, 0);
        assert_eq!(outcome.table, table);
        assert_eq!(outcome.action, "No rows with missing values found");
    }

    #[test]
    fn test_drop_empty_rows_all_incomplete_warns() {
        let table = Table::from_dataframe(
            df![
                "a" => [None, Some(1i64)],
                "b" => [Some("x"), None],
            ]
            .unwrap(),
        );
        let outcome = DataCleaner.drop_empty_rows(&table).unwrap();
        assert_eq!(outcome.table.height(), 0);
        assert_eq!(outcome.table.width(), 2);
        assert_eq!(outcome.warning, Some(EmptyResultWarning::NoRows));
    }

    #[test]
    fn test_nan_counts_as_missing() {
        let table = Table::from_dataframe(
            df![
                "x" => [Some(1.0), Some(f64::NAN), Some(3.0)],
                "y" => ["a", "b", "c"],
            ]
            .unwrap(),
        );

        let rows = DataCleaner.drop_empty_rows(&table).unwrap();
        assert_eq!(rows.rows_removed, 1);
        assert_eq!(rows.table.height(), 2);

        let columns = DataCleaner.drop_empty_columns(&table).unwrap();
        assert_eq!(columns.table.column_names(), vec!["y"]);
    }

    #[test]
    fn test_drop_empty_columns() {
        let outcome = DataCleaner.drop_empty_columns(&table_with_gaps()).unwrap();

        assert_eq!(outcome.columns_removed, 2);
        assert_eq!(outcome.table.column_names(), vec!["id"]);
        assert_eq!(outcome.table.height(), 4);
        assert_eq!(outcome.warning, None);
    }

    #[test]
    fn test_drop_empty_columns_all_incomplete_warns() {
        let table = Table::from_dataframe(
            df![
                "a" => [None, Some(1i64)],
                "b" => [Some("x"), None],
            ]
            .unwrap(),
        );
        let outcome = DataCleaner.drop_empty_columns(&table).unwrap();
        assert_eq!(outcome.table.width(), 0);
        assert_eq!(outcome.columns_removed, 2);
        assert_eq!(outcome.warning, Some(EmptyResultWarning::NoColumns));
        assert!(outcome.is_empty_result());
    }
}
