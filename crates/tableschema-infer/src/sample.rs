use tracing::debug;

use tableschema_model::SourceError;

use crate::error::{InferError, Result};

/// Pulls up to `limit` rows from a source (`None` = all rows).
///
/// A source error aborts sampling and is returned unchanged.
pub fn sample<I, E>(source: I, limit: Option<usize>) -> Result<Vec<Vec<String>>>
where
    I: IntoIterator<Item = std::result::Result<Vec<String>, E>>,
    E: Into<SourceError>,
{
    let rows = source
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|row| row.map_err(|e| InferError::Source(e.into())))
        .collect::<Result<Vec<_>>>()?;
    debug!(rows = rows.len(), ?limit, "sampled rows");
    Ok(rows)
}
