//! Configuration for the trip pipeline.

use std::time::Duration;

use super::merge::MergePolicy;

/// Upper bound on concurrent provider calls per pipeline run.
pub const MAX_IN_FLIGHT_LIMIT: usize = 16;

/// How many waypoints to query providers at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleConfig {
    /// Lower bound on samples for any non-empty route.
    pub min_samples: usize,

    /// Upper bound on samples.
    pub max_samples: usize,

    /// Aim for roughly `n / target_density` samples.
    pub target_density: usize,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            min_samples: 1,
            max_samples: 20,
            target_density: 10,
        }
    }
}

/// Configuration parameters for station search along a route.
#[derive(Debug, Clone)]
pub struct TripConfig {
    pub sample: SampleConfig,

    /// Search radius around each sample point (metres).
    pub search_radius_m: u32,

    /// Maximum concurrent provider calls. Read through
    /// [`Self::in_flight_limit`], which clamps it.
    pub max_in_flight: usize,

    /// Deadline for the whole fetch stage (seconds).
    /// On expiry the request fails rather than returning partial results.
    pub request_timeout_secs: u64,

    pub merge_policy: MergePolicy,

    /// Extra attempts for a transient provider failure.
    pub retry_attempts: u32,

    /// Delay before the first retry (milliseconds); doubles per attempt.
    pub retry_backoff_ms: u64,
}

impl TripConfig {
    pub fn with_search_radius(mut self, metres: u32) -> Self {
        self.search_radius_m = metres;
        self
    }

    /// Set the concurrency limit, clamped to `1..=MAX_IN_FLIGHT_LIMIT`.
    pub fn with_max_in_flight(mut self, n: usize) -> Self {
        self.max_in_flight = n.clamp(1, MAX_IN_FLIGHT_LIMIT);
        self
    }

    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }

    pub fn with_retries(mut self, attempts: u32, backoff_ms: u64) -> Self {
        self.retry_attempts = attempts;
        self.retry_backoff_ms = backoff_ms;
        self
    }

    /// The effective concurrency limit, within `1..=MAX_IN_FLIGHT_LIMIT`
    /// however `max_in_flight` was set.
    pub fn in_flight_limit(&self) -> usize {
        self.max_in_flight.clamp(1, MAX_IN_FLIGHT_LIMIT)
    }

    /// Returns the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Backoff before retry number `attempt` (1-based).
    pub fn retry_backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.saturating_sub(1).min(10);
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(factor))
    }
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            sample: SampleConfig::default(),
            search_radius_m: 5000,
            max_in_flight: 8,
            request_timeout_secs: 30,
            merge_policy: MergePolicy::default(),
            retry_attempts: 0,
            retry_backoff_ms: 200,
        }
    }
}
