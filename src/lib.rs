//! # SendGrid Statistics Client
//! Asynchronous wrapper around the SendGrid statistics HTTP endpoints: global, category, subuser, geographic, device, email client, mailbox provider, and browser stats, returned as typed per-day records ([`StatisticsEntry`]).
//!
//! ## Audience and uses
//! For Rust services and scripts that need delivery and engagement numbers from SendGrid: configure a [`Client`] with [`ClientBuilder`], pick a [`DateRange`] and [`AggregateBy`] mode, then call one of the [`Statistics`] methods.
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`. Every call takes a [`CancellationToken`](tokio_util::sync::CancellationToken); cancelling it drops the in-flight request.
//!
//! ## Out of scope
//! Mail send, templates, webhooks and the rest of the SendGrid API. No retries: a failed call is reported once and left to the caller.
//!
//! ## Errors
//! Transport failures surface as [`Error::Request`], non-2xx statuses as [`Error::Status`], unexpected bodies as [`Error::Json`], and cancellation as [`Error::Cancelled`]. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Custom transports
//! [`Statistics`] works over anything implementing [`Transport`], so the request building and parsing can be driven by another HTTP stack or a test double.
//!
//! ## Example
//! ```no_run
//! use chrono::NaiveDate;
//! use sendgrid_stats::{AggregateBy, Client, DateRange};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sendgrid_stats::Error> {
//!     let client = Client::builder().api_key("SG.xxxx").build()?;
//!     let range = DateRange::new(
//!         NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2015, 1, 31).unwrap(),
//!     );
//!
//!     let days = client
//!         .statistics()
//!         .global(range, AggregateBy::Week, &CancellationToken::new())
//!         .await?;
//!     for day in days {
//!         for block in &day.stats {
//!             println!("{}: {} delivered", day.date, block.metrics.delivered);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod models;
mod parse;
mod query;
mod statistics;
mod transport;

pub use client::{Client, ClientBuilder};
pub use error::Error;
pub use models::{AggregateBy, DateRange, Metrics, StatBlock, StatisticsEntry};
pub use parse::parse_statistics;
pub use statistics::Statistics;
pub use transport::{RawResponse, Transport};

/// Result type alias for statistics operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
