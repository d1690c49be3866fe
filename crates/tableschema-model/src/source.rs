//! Row source boundary.
//!
//! A row source is any `IntoIterator<Item = Result<Vec<String>, E>>` whose
//! error converts into [`SourceError`]. Errors from the source are passed
//! through unchanged and abort whatever operation is pulling rows.

use std::convert::Infallible;

/// Opaque I/O-level failure reported by a row source.
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Adapts in-memory rows into an infallible row source.
pub fn rows<I, R, S>(rows: I) -> impl Iterator<Item = Result<Vec<String>, Infallible>>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = S>,
    S: Into<String>,
{
    rows.into_iter()
        .map(|row| Ok(row.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_rows_never_fail() {
        let collected: Vec<Vec<String>> = rows([["a", "b"], ["c", "d"]])
            .map(|row| row.expect("infallible"))
            .collect();
        assert_eq!(collected, vec![vec!["a", "b"], vec!["c", "d"]]);
    }
}
