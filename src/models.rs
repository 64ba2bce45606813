//! Data types returned by the statistics endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Inclusive range of calendar days to report on.
///
/// `start <= end` is expected but not checked; the server decides what an
/// inverted range means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

/// Server-side bucketing of the reported days.
///
/// [`AggregateBy::None`] returns one entry per day and leaves the
/// `aggregated_by` parameter off the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AggregateBy {
    #[default]
    None,
    Day,
    Week,
    Month,
}

impl AggregateBy {
    /// Query value for `aggregated_by`, or `None` when the parameter is omitted.
    pub fn as_query_value(self) -> Option<&'static str> {
        match self {
            AggregateBy::None => None,
            AggregateBy::Day => Some("day"),
            AggregateBy::Week => Some("week"),
            AggregateBy::Month => Some("month"),
        }
    }
}

impl fmt::Display for AggregateBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value().unwrap_or("none"))
    }
}

/// Statistics reported for a single day (or aggregation bucket).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsEntry {
    /// First day covered by this entry.
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    /// One block for global stats, one per group for grouped stats.
    pub stats: Vec<StatBlock>,
}

/// Metrics for one group on one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    #[serde(default)]
    pub metrics: Metrics,
    /// Group label, e.g. a category or browser name. Absent for global stats.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Grouping dimension: `category`, `subuser`, `country`, `device`,
    /// `client`, `esp` or `browser`. Absent for global stats.
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
}

/// Delivery and engagement counters.
///
/// Each endpoint reports its own subset; counters the server leaves out are
/// zero. Device and client stats only carry `opens` and `unique_opens`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    pub blocks: u64,
    pub bounce_drops: u64,
    pub bounces: u64,
    pub clicks: u64,
    pub deferred: u64,
    pub delivered: u64,
    /// Mailbox provider stats only.
    pub drops: u64,
    pub invalid_emails: u64,
    pub opens: u64,
    pub processed: u64,
    pub requests: u64,
    pub spam_report_drops: u64,
    pub spam_reports: u64,
    pub unique_clicks: u64,
    pub unique_opens: u64,
    pub unsubscribe_drops: u64,
    pub unsubscribes: u64,
}

// The API sometimes pads the separators ("2015 - 01 - 01").
fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let compact: String = raw.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    NaiveDate::parse_from_str(&compact, "%Y-%m-%d")
        .map_err(|e| serde::de::Error::custom(format!("invalid date {raw:?}: {e}")))
}
