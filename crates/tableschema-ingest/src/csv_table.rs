use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use tracing::debug;

use crate::csv_source::{CsvOptions, CsvSource};
use crate::error::Result;

/// A CSV file loaded into memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn read_csv_table(path: &Path, options: &CsvOptions) -> Result<CsvTable> {
    let source = CsvSource::from_path(path, options)?;
    let headers = source.headers().to_vec();
    let rows = source.collect::<std::result::Result<Vec<_>, _>>()?;
    debug!(path = %path.display(), rows = rows.len(), "read csv table");
    Ok(CsvTable { headers, rows })
}

/// Writes a header record followed by every row. An empty `headers` slice
/// writes rows only.
pub fn write_csv<W, H, I, R>(writer: W, headers: &[H], rows: I) -> Result<()>
where
    W: Write,
    H: AsRef<str>,
    I: IntoIterator<Item = R>,
    R: AsRef<[String]>,
{
    let mut writer = WriterBuilder::new().flexible(true).from_writer(writer);
    if !headers.is_empty() {
        writer.write_record(headers.iter().map(|header| -> &str { header.as_ref() }))?;
    }
    for row in rows {
        writer.write_record(row.as_ref())?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_cells_that_need_it() {
        let mut out = Vec::new();
        write_csv(
            &mut out,
            &["ID", "Note"],
            [vec!["1".to_string(), "a,b".to_string()]],
        )
        .expect("write");
        assert_eq!(String::from_utf8(out).expect("utf8"), "ID,Note\n1,\"a,b\"\n");
    }
}
