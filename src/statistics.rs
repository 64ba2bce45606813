//! Statistics resource: one method per reporting endpoint.

use crate::parse::parse_statistics;
use crate::query::StatsQuery;
use crate::transport::Transport;
use crate::{AggregateBy, DateRange, Error, Result, StatisticsEntry};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const GLOBAL_PATH: &str = "/stats";
const CATEGORIES_PATH: &str = "/categories/stats";
const SUBUSERS_PATH: &str = "/subusers/stats";
const GEO_PATH: &str = "/geo/stats";
const DEVICES_PATH: &str = "/devices/stats";
const CLIENTS_PATH: &str = "/clients/stats";
const MAILBOX_PROVIDERS_PATH: &str = "/mailbox_providers/stats";
const BROWSERS_PATH: &str = "/browsers/stats";

/// Access to the statistics endpoints over any [`Transport`].
///
/// Every call is independent: one request, one parse. If `cancel` fires
/// before the response arrives the request is dropped and the call returns
/// [`Error::Cancelled`].
///
/// # Examples
/// ```no_run
/// # use sendgrid_stats::{AggregateBy, Client, DateRange};
/// # use chrono::NaiveDate;
/// # use tokio_util::sync::CancellationToken;
/// # #[tokio::main]
/// # async fn main() -> Result<(), sendgrid_stats::Error> {
/// let client = Client::builder().api_key("SG.xxxx").build()?;
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2015, 1, 2).unwrap(),
/// );
/// let days = client
///     .statistics()
///     .categories(&["newsletter"], range, AggregateBy::None, &CancellationToken::new())
///     .await?;
/// for day in days {
///     println!("{}: {} groups", day.date, day.stats.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Statistics<'a, T> {
    transport: &'a T,
}

impl<T> Clone for Statistics<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Statistics<'_, T> {}

impl<'a, T: Transport> Statistics<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Account-wide stats from `/stats`.
    pub async fn global(
        &self,
        range: DateRange,
        aggregate: AggregateBy,
        cancel: &CancellationToken,
    ) -> Result<Vec<StatisticsEntry>> {
        self.fetch(StatsQuery::new(GLOBAL_PATH, range, aggregate), cancel)
            .await
    }

    /// Stats per category, one block per requested category and day.
    pub async fn categories<S: AsRef<str>>(
        &self,
        categories: &[S],
        range: DateRange,
        aggregate: AggregateBy,
        cancel: &CancellationToken,
    ) -> Result<Vec<StatisticsEntry>> {
        let query =
            StatsQuery::new(CATEGORIES_PATH, range, aggregate).filter("categories", categories);
        self.fetch(query, cancel).await
    }

    /// Stats per subuser.
    pub async fn subusers<S: AsRef<str>>(
        &self,
        subusers: &[S],
        range: DateRange,
        aggregate: AggregateBy,
        cancel: &CancellationToken,
    ) -> Result<Vec<StatisticsEntry>> {
        let query = StatsQuery::new(SUBUSERS_PATH, range, aggregate).filter("subusers", subusers);
        self.fetch(query, cancel).await
    }

    /// Geographic stats, optionally narrowed to one country code (`US`, `CA`).
    pub async fn country(
        &self,
        country: Option<&str>,
        range: DateRange,
        aggregate: AggregateBy,
        cancel: &CancellationToken,
    ) -> Result<Vec<StatisticsEntry>> {
        let query = StatsQuery::new(GEO_PATH, range, aggregate).optional("country", country);
        self.fetch(query, cancel).await
    }

    /// Opens by device type. Only `opens` and `unique_opens` are populated.
    pub async fn device_types(
        &self,
        range: DateRange,
        aggregate: AggregateBy,
        cancel: &CancellationToken,
    ) -> Result<Vec<StatisticsEntry>> {
        self.fetch(StatsQuery::new(DEVICES_PATH, range, aggregate), cancel)
            .await
    }

    /// Opens by email client. Only `opens` and `unique_opens` are populated.
    pub async fn client_types(
        &self,
        range: DateRange,
        aggregate: AggregateBy,
        cancel: &CancellationToken,
    ) -> Result<Vec<StatisticsEntry>> {
        self.fetch(StatsQuery::new(CLIENTS_PATH, range, aggregate), cancel)
            .await
    }

    /// Stats per inbox provider (blocks, bounces, deliveries, drops...).
    pub async fn inbox_providers<S: AsRef<str>>(
        &self,
        providers: &[S],
        range: DateRange,
        aggregate: AggregateBy,
        cancel: &CancellationToken,
    ) -> Result<Vec<StatisticsEntry>> {
        let query = StatsQuery::new(MAILBOX_PROVIDERS_PATH, range, aggregate)
            .filter("mailbox_providers", providers);
        self.fetch(query, cancel).await
    }

    /// Clicks per browser.
    pub async fn browsers<S: AsRef<str>>(
        &self,
        browsers: &[S],
        range: DateRange,
        aggregate: AggregateBy,
        cancel: &CancellationToken,
    ) -> Result<Vec<StatisticsEntry>> {
        let query = StatsQuery::new(BROWSERS_PATH, range, aggregate).filter("browsers", browsers);
        self.fetch(query, cancel).await
    }

    /// Common fetch-and-parse path for every endpoint.
    async fn fetch(
        &self,
        query: StatsQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<StatisticsEntry>> {
        let path = query.build();
        debug!(%path, "requesting statistics");

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(%path, "statistics request cancelled");
                return Err(Error::Cancelled);
            }
            response = self.transport.get(&path) => response?,
        };

        if !response.is_success() {
            warn!(%path, status = response.status, "statistics request rejected");
            return Err(Error::Status {
                status: response.status,
                body: response.body,
            });
        }

        debug!(
            %path,
            status = response.status,
            bytes = response.body.len(),
            "received statistics"
        );
        parse_statistics(&response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::RawResponse;
    use crate::Metrics;
    use chrono::NaiveDate;
    use std::future::Future;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records every requested path and answers with a canned response.
    struct RecordingTransport {
        response: RawResponse,
        requests: Mutex<Vec<String>>,
    }

    impl RecordingTransport {
        fn ok(body: &str) -> Self {
            Self::with_status(200, body)
        }

        fn with_status(status: u16, body: &str) -> Self {
            Self {
                response: RawResponse {
                    status,
                    body: body.to_string(),
                },
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for RecordingTransport {
        fn get(&self, path_and_query: &str) -> impl Future<Output = Result<RawResponse>> + Send {
            let path = path_and_query.to_string();
            async move {
                self.requests.lock().unwrap().push(path);
                Ok(self.response.clone())
            }
        }
    }

    /// Never answers.
    struct HangingTransport;

    impl Transport for HangingTransport {
        fn get(&self, _: &str) -> impl Future<Output = Result<RawResponse>> + Send {
            std::future::pending()
        }
    }

    fn range(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        )
    }

    const GLOBAL_BODY: &str = r#"[
        {"date": "2015 - 01 - 01", "stats": [{"metrics": {"blocks": 1, "delivered": 1, "opens": 1, "processed": 2, "requests": 3}}]},
        {"date": "2015-01-02", "stats": [{"metrics": {"requests": 0}}]}
    ]"#;

    #[tokio::test]
    async fn global_stats() {
        let transport = RecordingTransport::ok(GLOBAL_BODY);
        let result = Statistics::new(&transport)
            .global(
                range((2015, 1, 1), (2015, 1, 2)),
                AggregateBy::None,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(
            transport.requests(),
            ["/stats?start_date=2015-01-01&end_date=2015-01-02"]
        );
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].stats.len(), 1);
        assert_eq!(result[0].stats[0].metrics.requests, 3);
        assert_eq!(result[1].stats[0].metrics, Metrics::default());
    }

    #[tokio::test]
    async fn grouped_endpoints_build_their_urls() {
        let transport = RecordingTransport::ok("[]");
        let stats = Statistics::new(&transport);
        let cancel = CancellationToken::new();
        let r = range((2014, 10, 1), (2014, 10, 2));
        let none = AggregateBy::None;

        stats.categories(&["cat1", "cat2"], r, none, &cancel).await.unwrap();
        stats.subusers(&["user1", "user2"], r, none, &cancel).await.unwrap();
        stats.country(Some("US"), r, none, &cancel).await.unwrap();
        stats.country(None, r, none, &cancel).await.unwrap();
        stats.device_types(r, none, &cancel).await.unwrap();
        stats.client_types(r, none, &cancel).await.unwrap();
        stats
            .inbox_providers(&["Gmail", "Hotmail"], r, none, &cancel)
            .await
            .unwrap();
        stats
            .browsers(&["Chrome", "Firefox"], r, AggregateBy::Month, &cancel)
            .await
            .unwrap();

        let dates = "start_date=2014-10-01&end_date=2014-10-02";
        assert_eq!(
            transport.requests(),
            [
                format!("/categories/stats?{dates}&categories=cat1&categories=cat2"),
                format!("/subusers/stats?{dates}&subusers=user1&subusers=user2"),
                format!("/geo/stats?{dates}&country=US"),
                format!("/geo/stats?{dates}"),
                format!("/devices/stats?{dates}"),
                format!("/clients/stats?{dates}"),
                format!(
                    "/mailbox_providers/stats?{dates}&mailbox_providers=Gmail&mailbox_providers=Hotmail"
                ),
                format!("/browsers/stats?{dates}&aggregated_by=month&browsers=Chrome&browsers=Firefox"),
            ]
        );
    }

    #[tokio::test]
    async fn empty_filter_list_is_passed_through() {
        let transport = RecordingTransport::ok("[]");
        let none: &[String] = &[];
        Statistics::new(&transport)
            .categories(
                none,
                range((2015, 1, 1), (2015, 1, 1)),
                AggregateBy::None,
                &CancellationToken::new(),
            )
            .await
            .unwrap();
        assert_eq!(
            transport.requests(),
            ["/categories/stats?start_date=2015-01-01&end_date=2015-01-01"]
        );
    }

    #[tokio::test]
    async fn category_groups_are_labelled() {
        let body = r#"[
            {"date": "2015-01-01", "stats": [
                {"metrics": {}, "name": "cat1", "type": "category"},
                {"metrics": {}, "name": "cat2", "type": "category"}
            ]},
            {"date": "2015-01-02", "stats": [
                {"metrics": {"blocks": 10, "requests": 10}, "name": "cat1", "type": "category"},
                {"metrics": {"clicks": 6, "delivered": 5}, "name": "cat2", "type": "category"}
            ]}
        ]"#;
        let transport = RecordingTransport::ok(body);
        let result = Statistics::new(&transport)
            .categories(
                &["cat1", "cat2"],
                range((2015, 1, 1), (2015, 1, 2)),
                AggregateBy::None,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].stats.len(), 2);
        assert_eq!(result[0].stats[0].name.as_deref(), Some("cat1"));
        assert_eq!(result[0].stats[0].kind.as_deref(), Some("category"));
        assert_eq!(result[1].stats[0].metrics.requests, 10);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let transport = RecordingTransport::with_status(401, r#"{"errors":[{"message":"bad key"}]}"#);
        let err = Statistics::new(&transport)
            .global(
                range((2015, 1, 1), (2015, 1, 2)),
                AggregateBy::None,
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(401));
        match err {
            Error::Status { body, .. } => assert!(body.contains("bad key")),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let transport = RecordingTransport::ok(r#"{"date": "2015-01-01"}"#);
        let err = Statistics::new(&transport)
            .device_types(
                range((2015, 1, 1), (2015, 1, 2)),
                AggregateBy::None,
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[tokio::test]
    async fn cancelled_token_skips_the_request() {
        let transport = RecordingTransport::ok(GLOBAL_BODY);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = Statistics::new(&transport)
            .global(range((2015, 1, 1), (2015, 1, 2)), AggregateBy::None, &cancel)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn cancellation_aborts_in_flight_request() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            Statistics::new(&HangingTransport).browsers(
                &["Chrome"],
                range((2014, 10, 1), (2014, 10, 2)),
                AggregateBy::None,
                &cancel,
            ),
        )
        .await
        .expect("cancellation did not interrupt the request");

        assert!(matches!(result, Err(Error::Cancelled)));
    }
}
