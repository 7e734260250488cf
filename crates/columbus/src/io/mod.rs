//! Conversion between delimited text and [`Table`](crate::table::Table).

mod reader;
mod writer;

pub use reader::CsvLoader;
pub use writer::CsvSerializer;
