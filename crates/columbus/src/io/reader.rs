//! Delimited text loading.
//!
//! Every field is first read as text so that missing markers can be
//! normalised before any type is chosen; each column is then re-typed with the
//! same best-fit rules used by `coerce_best_fit_types`.

use std::collections::HashSet;
use std::io::Cursor;

use polars::prelude::*;
use tracing::{debug, info};

use crate::cleaner::TypeCorrector;
use crate::config::ExplorerConfig;
use crate::error::{ExplorerError, Result, ResultExt};
use crate::table::Table;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Parses uploaded CSV bytes into a [`Table`].
pub struct CsvLoader<'a> {
    config: &'a ExplorerConfig,
}

impl<'a> CsvLoader<'a> {
    pub fn new(config: &'a ExplorerConfig) -> Self {
        Self { config }
    }

    /// Parse `bytes` into a typed table.
    ///
    /// Fails with [`ExplorerError::InputTooLarge`] above the configured size
    /// limit and with [`ExplorerError::Parse`] when the input is empty, not
    /// UTF-8, or not well-formed delimited text.
    pub fn load(&self, bytes: &[u8]) -> Result<Table> {
        check_input_size(bytes.len() as u64, self.config.max_input_bytes)?;

        let text = decode_utf8(bytes)?;
        let content = drop_blank_lines(text, self.config.quote_char);
        if content.trim().is_empty() {
            return Err(ExplorerError::Parse("input is empty".to_string()));
        }

        let raw = self.read_raw(content)?;
        debug!("Read {} raw rows x {} columns", raw.height(), raw.width());

        let table = self.build_table(&raw)?;
        info!("Loaded table: {:?}", table.shape());

        Ok(table)
    }

    /// Read every field (header row included) as text.
    fn read_raw(&self, content: String) -> Result<DataFrame> {
        let parse_options = CsvParseOptions::default()
            .with_separator(self.config.delimiter)
            .with_quote_char(self.config.quote_char);

        CsvReadOptions::default()
            .with_has_header(false)
            .with_infer_schema_length(Some(0))
            .with_parse_options(parse_options)
            .into_reader_with_file_handle(Cursor::new(content))
            .finish()
            .map_err(|e| ExplorerError::Parse(e.to_string()))
    }

    /// Take column names from the first row and type the remaining rows.
    fn build_table(&self, raw: &DataFrame) -> Result<Table> {
        if raw.height() == 0 {
            return Err(ExplorerError::Parse("no header row".to_string()));
        }

        let names = header_names(raw)?;
        let body_len = raw.height() - 1;
        let corrector = TypeCorrector::new(self.config);

        let mut columns = Vec::with_capacity(raw.width());
        for (col, name) in raw.get_columns().iter().zip(names) {
            let mut body = col.as_materialized_series().slice(1, body_len);
            body.rename(name.into());
            let typed = corrector
                .infer_text_column(&body)
                .context(format!("Failed to type column '{}'", body.name()))?;
            debug!("  Column '{}' loaded as {}", typed.name(), typed.dtype());
            columns.push(Column::from(typed));
        }

        let df = DataFrame::new(columns).map_err(|e| ExplorerError::Parse(e.to_string()))?;
        Ok(Table::from_dataframe(df))
    }
}

/// Reject input above `max_size` bytes.
fn check_input_size(size: u64, max_size: u64) -> Result<()> {
    if size > max_size {
        return Err(ExplorerError::InputTooLarge { size, max_size });
    }
    Ok(())
}

/// Decode `bytes` as UTF-8, dropping a leading byte-order mark.
fn decode_utf8(bytes: &[u8]) -> Result<&str> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(ExplorerError::Parse(
            "unsupported encoding UTF-16 LE".to_string(),
        ));
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(ExplorerError::Parse(
            "unsupported encoding UTF-16 BE".to_string(),
        ));
    }

    let bytes = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
    std::str::from_utf8(bytes)
        .map_err(|e| ExplorerError::Parse(format!("input is not valid UTF-8: {}", e)))
}

/// Drop whitespace-only lines, except those inside a quoted field.
fn drop_blank_lines(text: &str, quote_char: Option<u8>) -> String {
    let mut kept = String::with_capacity(text.len());
    let mut in_quotes = false;

    for line in text.split_inclusive('\n') {
        if !in_quotes && line.trim().is_empty() {
            continue;
        }
        // An escaped quote is doubled, so only an odd count flips the state
        if let Some(quote) = quote_char
            && line.bytes().filter(|&b| b == quote).count() % 2 == 1
        {
            in_quotes = !in_quotes;
        }
        kept.push_str(line);
    }

    kept
}

/// Column names from the first raw row.
///
/// Empty or whitespace-only cells become `Unnamed: {index}`; repeated names
/// get a `.{n}` suffix.
fn header_names(raw: &DataFrame) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut names = Vec::with_capacity(raw.width());

    for (index, col) in raw.get_columns().iter().enumerate() {
        let cell = col
            .as_materialized_series()
            .str()
            .context("Header row is not text")?
            .get(0);
        let base = match cell {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => format!("Unnamed: {}", index),
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SemanticType;
    use pretty_assertions::assert_eq;

    fn load(content: &[u8]) -> Result<Table> {
        CsvLoader::new(&ExplorerConfig::default()).load(content)
    }

    #[test]
    fn test_load_infers_types() {
        let table = load(b"id,price,active,city\n1,9.5,true,Lisbon\n2,10,FALSE,Porto\n").unwrap();

        assert_eq!(table.shape(), (2, 4));
        assert_eq!(table.column_names(), vec!["id", "price", "active", "city"]);
        assert_eq!(table.column_type("id").unwrap(), SemanticType::Integer);
        assert_eq!(table.column_type("price").unwrap(), SemanticType::Float);
        assert_eq!(table.column_type("active").unwrap(), SemanticType::Boolean);
        assert_eq!(table.column_type("city").unwrap(), SemanticType::Text);
    }

    #[test]
    fn test_load_normalizes_missing_markers() {
        let table = load(b"x,y\n1,a\nNA,\n3,N/A\n").unwrap();

        assert_eq!(table.column_type("x").unwrap(), SemanticType::Integer);
        let missing: Vec<usize> = table
            .descriptors()
            .unwrap()
            .iter()
            .map(|d| d.missing_count)
            .collect();
        assert_eq!(missing, vec![1, 2]);
    }

    #[test]
    fn test_load_strips_utf8_bom() {
        let table = load(b"\xEF\xBB\xBFa,b\n1,2\n").unwrap();
        assert_eq!(table.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_load_rejects_utf16() {
        let err = load(&[0xFF, 0xFE, b'a', 0x00]).unwrap_err();
        assert!(matches!(err, ExplorerError::Parse(msg) if msg.contains("UTF-16 LE")));
    }

    #[test]
    fn test_load_rejects_invalid_utf8() {
        let err = load(b"a,b\n\xC3\x28,1\n").unwrap_err();
        assert_eq!(err.error_code(), "PARSE_ERROR");
    }

    #[test]
    fn test_load_rejects_empty_input() {
        assert!(matches!(load(b""), Err(ExplorerError::Parse(_))));
        assert!(matches!(load(b"  \n\n \n"), Err(ExplorerError::Parse(_))));
    }

    #[test]
    fn test_load_rejects_oversized_input() {
        let config = ExplorerConfig::builder().max_input_bytes(8).build().unwrap();
        let err = CsvLoader::new(&config).load(b"a,b\n1,2\n3,4\n").unwrap_err();

        assert!(matches!(
            err,
            ExplorerError::InputTooLarge {
                size: 12,
                max_size: 8
            }
        ));
    }

    #[test]
    fn test_load_skips_leading_blank_lines() {
        let table = load(b"\n  \na,b\n1,2\n").unwrap();
        assert_eq!(table.shape(), (1, 2));
    }

    #[test]
    fn test_load_skips_blank_lines_between_rows() {
        let table = load(b"a,b\n1,2\n\n3,4\n").unwrap();
        assert_eq!(table.shape(), (2, 2));

        let single = load(b"a\n1\n  \n3\n").unwrap();
        assert_eq!(single.shape(), (2, 1));
        assert_eq!(single.descriptors().unwrap()[0].missing_count, 0);
    }

    #[test]
    fn test_load_skips_trailing_blank_lines() {
        let table = load(b"a,b\n1,2\n3,4\n\n\n").unwrap();
        assert_eq!(table.shape(), (2, 2));
        let descriptors = table.descriptors().unwrap();
        assert!(descriptors.iter().all(|d| d.missing_count == 0));
    }

    #[test]
    fn test_load_keeps_blank_line_inside_quoted_field() {
        let table = load(b"note,n\n\"first\n\nsecond\",1\n2nd,2\n").unwrap();

        assert_eq!(table.shape(), (2, 2));
        let note = table.series("note").unwrap();
        assert_eq!(note.str().unwrap().get(0), Some("first\n\nsecond"));
    }

    #[test]
    fn test_drop_blank_lines() {
        assert_eq!(drop_blank_lines("a\n\n \nb\n\n", Some(b'"')), "a\nb\n");
        assert_eq!(drop_blank_lines("\"x\n\ny\"\n", Some(b'"')), "\"x\n\ny\"\n");
        assert_eq!(drop_blank_lines("\"x\n\ny\n", None), "\"x\ny\n");
    }

    #[test]
    fn test_load_header_only() {
        let table = load(b"a,b\n").unwrap();
        assert_eq!(table.shape(), (0, 2));
        assert_eq!(table.column_type("a").unwrap(), SemanticType::Text);
    }

    #[test]
    fn test_load_names_unnamed_and_duplicate_headers() {
        let table = load(b",value,value\n0,1,2\n1,3,4\n").unwrap();
        assert_eq!(
            table.column_names(),
            vec!["Unnamed: 0", "value", "value.1"]
        );
    }

    #[test]
    fn test_load_names_whitespace_header_cell() {
        let table = load(b"  ,value\n0,1\n").unwrap();
        assert_eq!(table.column_names(), vec!["Unnamed: 0", "value"]);
    }

    #[test]
    fn test_load_custom_delimiter() {
        let config = ExplorerConfig::builder().delimiter(b';').build().unwrap();
        let table = CsvLoader::new(&config).load(b"a;b\n1,5;x\n").unwrap();

        assert_eq!(table.shape(), (1, 2));
        assert_eq!(table.column_type("a").unwrap(), SemanticType::Text);
    }

    #[test]
    fn test_load_quoted_fields() {
        let table = load(b"name,note\n\"Smith, J\",\"said \"\"hi\"\"\"\n").unwrap();
        let note = table.series("note").unwrap();
        assert_eq!(note.str().unwrap().get(0), Some("said \"hi\""));
        let name = table.series("name").unwrap();
        assert_eq!(name.str().unwrap().get(0), Some("Smith, J"));
    }

    #[test]
    fn test_check_input_size_boundary() {
        assert!(check_input_size(10, 10).is_ok());
        assert!(check_input_size(11, 10).is_err());
    }
}
