//! CSV serialisation.

use polars::prelude::*;
use tracing::debug;

use crate::config::ExplorerConfig;
use crate::error::{Result, ResultExt};
use crate::table::Table;

/// Writes a [`Table`] back to delimited text.
pub struct CsvSerializer<'a> {
    config: &'a ExplorerConfig,
}

impl<'a> CsvSerializer<'a> {
    pub fn new(config: &'a ExplorerConfig) -> Self {
        Self { config }
    }

    /// Header row first, columns in table order, no index column.
    ///
    /// Missing values become empty fields and booleans are written as
    /// `true`/`false`. A table without columns serialises to no bytes.
    ///
    /// Text that is empty, whitespace-only or equal to a missing marker is
    /// written verbatim but reads back as missing.
    pub fn serialize(&self, table: &Table) -> Result<Vec<u8>> {
        if table.width() == 0 {
            return Ok(Vec::new());
        }

        let mut df = table.as_dataframe().clone();
        let mut buffer = Vec::new();

        {
            let writer = CsvWriter::new(&mut buffer)
                .include_header(true)
                .with_separator(self.config.delimiter);
            let mut writer = match self.config.quote_char {
                Some(quote) => writer.with_quote_char(quote),
                None => writer.with_quote_style(QuoteStyle::Never),
            };
            writer.finish(&mut df).context("Failed to write CSV")?;
        }

        debug!("Serialized {:?} table to {} bytes", table.shape(), buffer.len());
        Ok(buffer)
    }
}
