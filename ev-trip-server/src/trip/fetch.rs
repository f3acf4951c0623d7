//! Concurrent fan-out over (sample point × provider) with a single-writer merge.
//!
//! Calls run through `buffer_unordered`, so at most `max_in_flight` are
//! outstanding. Each finished call is sent over an mpsc channel to one
//! consumer that owns the [`StationMerger`]; nothing else touches the
//! accumulating result.

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::{LatLng, Source, Station};
use crate::poi::{PoiProvider, ProviderError, ProviderRecord};

use super::config::TripConfig;
use super::merge::StationMerger;

/// Decimal places used to drop repeated sample points before querying.
const QUERY_PRECISION: i32 = 3;

/// A provider call that failed after all retries.
#[derive(Debug, Clone)]
pub struct FetchFailure {
    pub provider: Source,
    pub point: LatLng,
    pub error: ProviderError,
}

/// Merged stations plus what went wrong getting them.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    pub stations: Vec<Station>,
    pub failures: Vec<FetchFailure>,
    /// Provider calls made, retries included.
    pub provider_calls: usize,
}

/// Result of one (point, provider) job.
struct FetchOutcome {
    calls: usize,
    result: Result<Vec<Station>, FetchFailure>,
}

/// Remove points that quantize to one already seen, keeping order.
pub(super) fn distinct_points(points: &[LatLng]) -> Vec<LatLng> {
    let mut seen = std::collections::HashSet::new();
    points
        .iter()
        .copied()
        .filter(|p| seen.insert(p.quantize(QUERY_PRECISION)))
        .collect()
}

/// Query every provider at every point and merge the results.
///
/// Failed calls are recorded and contribute no stations. Dropping the
/// returned future cancels all in-flight calls.
pub(super) async fn fetch_and_merge<P: PoiProvider>(
    providers: &[P],
    points: &[LatLng],
    config: &TripConfig,
) -> FetchReport {
    // Boxed up front; the stream must not hold a closure over `&P`.
    let calls: Vec<BoxFuture<'_, FetchOutcome>> = points
        .iter()
        .flat_map(|point| {
            providers
                .iter()
                .map(move |provider| fetch_one(provider, *point, config).boxed())
        })
        .collect();

    if calls.is_empty() {
        return FetchReport::default();
    }

    let max_in_flight = config.in_flight_limit();
    let (tx, mut rx) = mpsc::channel::<FetchOutcome>(max_in_flight);

    let producer = async move {
        let mut outcomes = stream::iter(calls).buffer_unordered(max_in_flight);

        while let Some(outcome) = outcomes.next().await {
            if tx.send(outcome).await.is_err() {
                break;
            }
        }
    };

    let consumer = async {
        let mut merger = StationMerger::new(config.merge_policy);
        let mut report = FetchReport::default();

        while let Some(outcome) = rx.recv().await {
            report.provider_calls += outcome.calls;
            match outcome.result {
                Ok(stations) => merger.extend(stations),
                Err(failure) => report.failures.push(failure),
            }
        }

        report.stations = merger.finish();
        report
    };

    let ((), report) = tokio::join!(producer, consumer);
    report
}

/// One provider call at one point, with bounded retry on transient errors.
async fn fetch_one<P: PoiProvider>(provider: &P, point: LatLng, config: &TripConfig) -> FetchOutcome {
    let source = provider.source();
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        match provider.nearby(point, config.search_radius_m).await {
            Ok(records) => {
                let stations = normalize(provider, records);
                debug!(provider = %source, %point, stations = stations.len(), "provider call complete");
                return FetchOutcome {
                    calls: attempt as usize,
                    result: Ok(stations),
                };
            }
            Err(error) if error.is_transient() && attempt <= config.retry_attempts => {
                let delay = config.retry_backoff(attempt);
                debug!(
                    provider = %source,
                    %point,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %error,
                    "retrying provider call"
                );
                tokio::time::sleep(delay).await;
            }
            Err(error) => {
                warn!(provider = %source, %point, error = %error, "provider call failed");
                return FetchOutcome {
                    calls: attempt as usize,
                    result: Err(FetchFailure {
                        provider: source,
                        point,
                        error,
                    }),
                };
            }
        }
    }
}

/// Apply the provider's acceptance predicate, then convert.
///
/// Records that cannot be converted are dropped.
fn normalize<P: PoiProvider>(provider: &P, records: Vec<ProviderRecord>) -> Vec<Station> {
    records
        .into_iter()
        .filter(|record| provider.accepts(record))
        .filter_map(|record| match record.into_station() {
            Ok(station) => Some(station),
            Err(e) => {
                debug!(provider = %provider.source(), error = %e, "dropping malformed record");
                None
            }
        })
        .collect()
}
