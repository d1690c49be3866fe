//! CSV row sources and sinks.
//!
//! [`CsvSource`] streams rows as a row source for schema casting and
//! inference; [`read_csv_table`] loads a whole file; [`write_csv`] emits
//! encoded rows back to CSV.

pub mod csv_source;
pub mod csv_table;
pub mod error;

pub use csv_source::{CsvOptions, CsvSource};
pub use csv_table::{CsvTable, read_csv_table, write_csv};
pub use error::{IngestError, Result};
