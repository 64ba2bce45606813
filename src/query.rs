//! Request path and query string construction.

use crate::{AggregateBy, DateRange};
use url::form_urlencoded;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Builds `"{path}?{query}"` for a statistics endpoint.
///
/// Parameters are emitted in insertion order: the date range first, then
/// `aggregated_by` (if any), then filters.
#[derive(Debug, Clone)]
pub(crate) struct StatsQuery {
    path: &'static str,
    params: Vec<(&'static str, String)>,
}

impl StatsQuery {
    pub(crate) fn new(path: &'static str, range: DateRange, aggregate: AggregateBy) -> Self {
        let mut params = vec![
            ("start_date", range.start.format(DATE_FORMAT).to_string()),
            ("end_date", range.end.format(DATE_FORMAT).to_string()),
        ];
        if let Some(value) = aggregate.as_query_value() {
            params.push(("aggregated_by", value.to_string()));
        }
        Self { path, params }
    }

    /// Append one `key=value` pair per element, repeating the key.
    pub(crate) fn filter<S: AsRef<str>>(mut self, key: &'static str, values: &[S]) -> Self {
        self.params
            .extend(values.iter().map(|v| (key, v.as_ref().to_string())));
        self
    }

    /// Append `key=value` when a value is given.
    pub(crate) fn optional(mut self, key: &'static str, value: Option<&str>) -> Self {
        if let Some(v) = value {
            self.params.push((key, v.to_string()));
        }
        self
    }

    pub(crate) fn build(&self) -> String {
        let query = self
            .params
            .iter()
            .map(|(key, value)| {
                let encoded: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
                format!("{key}={encoded}")
            })
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}
