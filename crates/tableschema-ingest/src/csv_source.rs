//! Streaming CSV row source.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Options for reading CSV input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter. Defaults to `,`.
    pub delimiter: u8,

    /// Whether the first record holds the column names.
    /// Defaults to true.
    pub has_headers: bool,

    /// Trim surrounding whitespace from headers and cells.
    /// Defaults to false, so cells reach the schema as written.
    pub trim: bool,

    /// Quote character. Defaults to `"`.
    pub quote: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            trim: false,
            quote: b'"',
        }
    }
}

impl CsvOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    fn reader_builder(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .quote(self.quote)
            .has_headers(self.has_headers)
            .flexible(true)
            .trim(if self.trim { Trim::All } else { Trim::None });
        builder
    }
}

/// Rows of a CSV input, read one record at a time.
///
/// Record lengths are not checked here; a ragged row surfaces as a length
/// error from whatever consumes the source.
pub struct CsvSource<R> {
    reader: csv::Reader<R>,
    headers: Vec<String>,
    record: StringRecord,
}

impl CsvSource<File> {
    pub fn from_path(path: impl AsRef<Path>, options: &CsvOptions) -> Result<Self> {
        let path = path.as_ref();
        let reader = options
            .reader_builder()
            .from_path(path)
            .map_err(|source| IngestError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), "opened csv source");
        Self::new(reader, options)
    }
}

impl<R: Read> CsvSource<R> {
    pub fn from_reader(reader: R, options: &CsvOptions) -> Result<Self> {
        Self::new(options.reader_builder().from_reader(reader), options)
    }

    fn new(mut reader: csv::Reader<R>, options: &CsvOptions) -> Result<Self> {
        let headers = if options.has_headers {
            reader.headers()?.iter().map(normalize_header).collect()
        } else {
            Vec::new()
        };
        Ok(Self {
            reader,
            headers,
            record: StringRecord::new(),
        })
    }

    /// Column names from the header record; empty without one.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl<R: Read> Iterator for CsvSource<R> {
    type Item = std::result::Result<Vec<String>, csv::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(true) => Some(Ok(self.record.iter().map(str::to_string).collect())),
            Ok(false) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_headers_and_rows() {
        let data = "\u{feff}ID,Name\n1,Ada\n2,Bob\n";
        let source = CsvSource::from_reader(data.as_bytes(), &CsvOptions::default())
            .expect("source");
        assert_eq!(source.headers(), ["ID", "Name"]);
        let rows: Vec<Vec<String>> = source.map(|row| row.expect("row")).collect();
        assert_eq!(rows, vec![vec!["1", "Ada"], vec!["2", "Bob"]]);
    }

    #[test]
    fn ragged_rows_pass_through() {
        let data = "A,B\n1\n1,2,3\n";
        let rows: Vec<Vec<String>> = CsvSource::from_reader(data.as_bytes(), &CsvOptions::default())
            .expect("source")
            .map(|row| row.expect("row"))
            .collect();
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[1].len(), 3);
    }

    #[test]
    fn delimiter_trim_and_headerless() {
        let options = CsvOptions::default()
            .with_delimiter(b';')
            .with_trim(true)
            .with_headers(false);
        let source = CsvSource::from_reader(" 1 ; x \n".as_bytes(), &options).expect("source");
        assert!(source.headers().is_empty());
        let rows: Vec<Vec<String>> = source.map(|row| row.expect("row")).collect();
        assert_eq!(rows, vec![vec!["1", "x"]]);
    }
}
