//! HTTP seam between the statistics resource and the network.

use crate::Result;
use std::future::Future;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs GET requests for the statistics resource.
///
/// `path_and_query` is relative to the API root, e.g.
/// `/stats?start_date=2015-01-01&end_date=2015-01-02`. Implementations report
/// connection-level failures as errors and hand every answered request back as
/// a [`RawResponse`], whatever its status. Dropping the returned future must
/// abort the request; cancellation relies on it.
pub trait Transport: Send + Sync {
    fn get(&self, path_and_query: &str) -> impl Future<Output = Result<RawResponse>> + Send;
}
