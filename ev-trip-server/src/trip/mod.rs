//! Trip planning: route sampling, multi-provider station search, and
//! range estimation.
//!
//! A search takes a route's waypoints, samples a bounded number of them,
//! asks every configured POI provider for chargers near each sample, and
//! merges the answers into one deduplicated list.

mod config;
mod fetch;
mod filter;
mod merge;
mod planner;
mod range;
mod sample;


pub use config::{MAX_IN_FLIGHT_LIMIT, SampleConfig, TripConfig};
pub use fetch::{FetchFailure, FetchReport};
pub use filter::{ConnectorMatch, StationFilter};
pub use merge::{MergePolicy, StationMerger, merge_stations};
pub use planner::{RouteProvider, TripError, TripPlanner};
pub use range::{RangeError, estimate_range};
pub use sample::sample_waypoints;
