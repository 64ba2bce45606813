use crate::{Result, StatisticsEntry};

/// Parse a statistics response body.
///
/// The body must be a JSON array of `{date, stats}` objects. Order is kept as
/// the server sent it.
pub fn parse_statistics(body: &str) -> Result<Vec<StatisticsEntry>> {
    Ok(serde_json::from_str(body)?)
}
