//! Summary statistics for a table.
//!
//! [`DataProfiler::describe`] produces, per numeric column, count / mean /
//! std / min / quartiles / max and, per non-numeric column, count / unique /
//! top / freq.

pub(crate) mod statistics;

use polars::prelude::*;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::error::Result;
use crate::table::Table;
use crate::types::{CategoricalSummary, NumericSummary, SemanticType, Summary};
use crate::utils::{semantic_type_of, sorted_numeric_values, text_values};
use statistics::{mean, mode, quantile, sample_std};

/// Computes descriptive statistics.
pub struct DataProfiler;

impl DataProfiler {
    /// Describe every column of `table`.
    pub fn describe(table: &Table) -> Result<Summary> {
        let mut numeric = Vec::new();
        let mut categorical = Vec::new();

        for col in table.as_dataframe().get_columns() {
            let series = col.as_materialized_series();
            let semantic_type = semantic_type_of(series.dtype());

            if semantic_type.is_numeric() {
                numeric.push(Self::describe_numeric(series, semantic_type)?);
            } else {
                categorical.push(Self::describe_categorical(series, semantic_type)?);
            }
        }

        info!(
            "Described {} numeric and {} non-numeric columns",
            numeric.len(),
            categorical.len()
        );

        Ok(Summary {
            rows: table.height(),
            numeric,
            categorical,
        })
    }

    fn describe_numeric(series: &Series, semantic_type: SemanticType) -> Result<NumericSummary> {
        let sorted = sorted_numeric_values(series)?;
        debug!("Column '{}': {} numeric values", series.name(), sorted.len());

        Ok(NumericSummary {
            column: series.name().to_string(),
            semantic_type,
            count: sorted.len(),
            mean: mean(&sorted),
            std: sample_std(&sorted),
            min: sorted.first().copied(),
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted.last().copied(),
        })
    }

    fn describe_categorical(
        series: &Series,
        semantic_type: SemanticType,
    ) -> Result<CategoricalSummary> {
        let values = text_values(series)?;
        let present: Vec<&str> = values.iter().flatten().map(String::as_str).collect();

        let unique = present.iter().collect::<HashSet<_>>().len();
        let top = mode(present.iter().copied());

        Ok(CategoricalSummary {
            column: series.name().to_string(),
            semantic_type,
            count: present.len(),
            unique,
            freq: top.as_ref().map_or(0, |(_, freq)| *freq),
            top: top.map(|(value, _)| value),
        })
    }
}

impl Summary {
    /// Numeric statistics as a frame with one row per column and one column
    /// per statistic, ready for tabular display.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let pick = |f: fn(&NumericSummary) -> Option<f64>| -> Vec<Option<f64>> {
            self.numeric.iter().map(f).collect()
        };

        let columns: Vec<String> = self.numeric.iter().map(|s| s.column.clone()).collect();
        let counts: Vec<u64> = self.numeric.iter().map(|s| s.count as u64).collect();

        let df = df![
            "column" => columns,
            "count" => counts,
            "mean" => pick(|s| s.mean),
            "std" => pick(|s| s.std),
            "min" => pick(|s| s.min),
            "25%" => pick(|s| s.q1),
            "50%" => pick(|s| s.median),
            "75%" => pick(|s| s.q3),
            "max" => pick(|s| s.max),
        ]?;

        Ok(df)
    }

    /// Summary of the named column, if it was described as numeric.
    pub fn numeric_column(&self, name: &str) -> Option<&NumericSummary> {
        self.numeric.iter().find(|s| s.column == name)
    }

    /// Summary of the named column, if it was described as non-numeric.
    pub fn categorical_column(&self, name: &str) -> Option<&CategoricalSummary> {
        self.categorical.iter().find(|s| s.column == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Table {
        Table::from_dataframe(
            df![
                "x" => [Some(1i64), Some(2), Some(3), Some(4), Some(100), None],
                "ratio" => [Some(0.5), Some(1.5), None, None, None, None],
                "city" => [Some("Porto"), Some("Lisbon"), Some("Porto"), None, Some("Faro"), Some("Lisbon")],
                "flag" => [true, false, true, true, false, true],
            ]
            .unwrap(),
        )
    }

    #[test]
    fn test_describe_numeric() {
        let summary = DataProfiler::describe(&sample()).unwrap();
        assert_eq!(summary.rows, 6);

        let x = summary.numeric_column("x").unwrap();
        assert_eq!(x.semantic_type, SemanticType::Integer);
        assert_eq!(x.count, 5);
        assert_eq!(x.mean, Some(22.0));
        assert_eq!(x.min, Some(1.0));
        assert_eq!(x.q1, Some(2.0));
        assert_eq!(x.median, Some(3.0));
        assert_eq!(x.q3, Some(4.0));
        assert_eq!(x.max, Some(100.0));
        let std = x.std.unwrap();
        assert!((std - 1902.5f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_describe_sparse_numeric() {
        let summary = DataProfiler::describe(&sample()).unwrap();
        let ratio = summary.numeric_column("ratio").unwrap();
        assert_eq!(ratio.count, 2);
        assert_eq!(ratio.mean, Some(1.0));
        assert_eq!(ratio.q1, Some(0.75));
    }

    #[test]
    fn test_describe_categorical() {
        let summary = DataProfiler::describe(&sample()).unwrap();

        let city = summary.categorical_column("city").unwrap();
        assert_eq!(city.count, 5);
        assert_eq!(city.unique, 3);
        assert_eq!(city.top.as_deref(), Some("Porto"));
        assert_eq!(city.freq, 2);

        // Booleans are summarised as categories, not numbers
        let flag = summary.categorical_column("flag").unwrap();
        assert_eq!(flag.semantic_type, SemanticType::Boolean);
        assert_eq!(flag.unique, 2);
        assert_eq!(flag.top.as_deref(), Some("true"));
        assert_eq!(flag.freq, 4);
        assert!(summary.numeric_column("flag").is_none());
    }

    #[test]
    fn test_describe_all_missing_column() {
        let table = Table::from_dataframe(df!["x" => [None::<f64>, None]].unwrap());
        let summary = DataProfiler::describe(&table).unwrap();
        let x = summary.numeric_column("x").unwrap();
        assert_eq!(x.count, 0);
        assert_eq!(x.mean, None);
        assert_eq!(x.std, None);
        assert_eq!(x.min, None);
    }

    #[test]
    fn test_summary_to_dataframe() {
        let summary = DataProfiler::describe(&sample()).unwrap();
        let df = summary.to_dataframe().unwrap();

        assert_eq!(df.shape(), (2, 9));
        let names: Vec<&str> = df.get_column_names().iter().map(|s| s.as_str()).collect();
        assert_eq!(
            names,
            vec!["column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"]
        );
    }

    #[test]
    fn test_summary_serializes_quartile_names() {
        let summary = DataProfiler::describe(&sample()).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["numeric"][0]["25%"], serde_json::json!(2.0));
    }
}
