//! Value parsers and best-fit series construction.

use polars::prelude::*;

/// Parse an integer, ignoring surrounding whitespace.
pub(crate) fn parse_integer(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Parse a float, ignoring surrounding whitespace.
pub(crate) fn parse_float(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

/// Parse `true`/`false` in any letter case.
pub(crate) fn parse_boolean(value: &str) -> Option<bool> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Convert a whole-number float to an integer when it fits in `i64`.
pub(crate) fn float_to_integer(value: f64) -> Option<i64> {
    // 2^63; the upper end is exclusive because i64::MAX is not representable.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if value.is_finite() && value.fract() == 0.0 && (-LIMIT..LIMIT).contains(&value) {
        Some(value as i64)
    } else {
        None
    }
}

/// Apply `parse` to every present value; `None` if any of them fails.
fn parse_all<T>(
    values: &[Option<String>],
    parse: fn(&str) -> Option<T>,
) -> Option<Vec<Option<T>>> {
    values
        .iter()
        .map(|value| match value {
            Some(s) => parse(s).map(Some),
            None => Some(None),
        })
        .collect()
}

/// Build the most specific series for text values whose missing entries are
/// already `None`.
///
/// Tries integer, then float, then boolean; a type is taken only if every
/// present value parses. Columns with no present values stay text. Parsed
/// NaN is stored as missing.
pub(crate) fn best_fit_series(name: PlSmallStr, values: &[Option<String>]) -> Series {
    if values.iter().all(Option::is_none) {
        return Series::new(name, values.to_vec());
    }

    if let Some(integers) = parse_all(values, parse_integer) {
        return Series::new(name, integers);
    }

    if let Some(floats) = parse_all(values, parse_float) {
        let floats: Vec<Option<f64>> = floats
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        return Series::new(name, floats);
    }

    if let Some(booleans) = parse_all(values, parse_boolean) {
        return Series::new(name, booleans);
    }

    Series::new(name, values.to_vec())
}

/// Narrow float values to integers when every present value is whole.
pub(crate) fn narrow_to_integers(values: &[Option<f64>]) -> Option<Vec<Option<i64>>> {
    values
        .iter()
        .map(|value| match value {
            Some(v) => float_to_integer(*v).map(Some),
            None => Some(None),
        })
        .collect()
}
