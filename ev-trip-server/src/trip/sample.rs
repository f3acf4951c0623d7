//! Waypoint sampling.

use crate::domain::Waypoint;

use super::config::SampleConfig;

/// Reduce a route's waypoints to an evenly spaced, bounded sample.
///
/// Takes every `stride`-th waypoint starting at index 0, where
/// `stride = max(1, n / target_density)`. The stride is shortened when it
/// would yield fewer than `min_samples` points, and the result is cut to
/// `max_samples`. An empty route yields an empty sample.
///
/// ```
/// use ev_trip_server::domain::LatLng;
/// use ev_trip_server::trip::{SampleConfig, sample_waypoints};
///
/// let route: Vec<_> = (0..50)
///     .map(|i| LatLng::new(18.0 + i as f64 * 0.01, 73.8).unwrap())
///     .collect();
/// let sample = sample_waypoints(&route, &SampleConfig::default());
/// assert_eq!(sample.len(), 10);
/// assert_eq!(sample[0], route[0]);
/// ```
pub fn sample_waypoints(waypoints: &[Waypoint], config: &SampleConfig) -> Vec<Waypoint> {
    let n = waypoints.len();
    if n == 0 {
        return Vec::new();
    }

    let mut stride = (n / config.target_density.max(1)).max(1);

    let min_samples = config.min_samples.max(1);
    if n.div_ceil(stride) < min_samples {
        stride = (n / min_samples).max(1);
    }

    waypoints
        .iter()
        .step_by(stride)
        .take(config.max_samples.max(1))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LatLng;
    use proptest::prelude::*;

    fn route(n: usize) -> Vec<Waypoint> {
        (0..n)
            .map(|i| LatLng::new(10.0 + i as f64 * 0.001, 70.0).unwrap())
            .collect()
    }

    #[test]
    fn fifty_waypoints_give_ten_samples() {
        let waypoints = route(50);
        let sample = sample_waypoints(&waypoints, &SampleConfig::default());

        assert_eq!(sample.len(), 10);
        let expected: Vec<_> = (0..10).map(|i| waypoints[i * 5]).collect();
        assert_eq!(sample, expected);
    }

    #[test]
    fn empty_route_gives_empty_sample() {
        assert!(sample_waypoints(&[], &SampleConfig::default()).is_empty());
    }

    #[test]
    fn short_route_keeps_every_point() {
        let waypoints = route(7);
        assert_eq!(sample_waypoints(&waypoints, &SampleConfig::default()), waypoints);
    }

    #[test]
    fn long_route_is_capped() {
        let sample = sample_waypoints(&route(1000), &SampleConfig::default());
        assert_eq!(sample.len(), 10);

        let dense = SampleConfig {
            target_density: 100,
            ..SampleConfig::default()
        };
        assert_eq!(sample_waypoints(&route(1000), &dense).len(), 20);
    }

    #[test]
    fn min_samples_shortens_stride() {
        let config = SampleConfig {
            min_samples: 4,
            max_samples: 20,
            target_density: 2,
        };
        // stride 50 / 2 = 25 would give 2 points; 50 / 4 = 12 gives 5
        let sample = sample_waypoints(&route(50), &config);
        assert_eq!(sample.len(), 5);
    }

    proptest! {
        #[test]
        fn sample_is_bounded_and_starts_at_origin(n in 1usize..2000, max in 1usize..40, density in 1usize..50) {
            let waypoints = route(n);
            let config = SampleConfig { min_samples: 1, max_samples: max, target_density: density };
            let sample = sample_waypoints(&waypoints, &config);

            prop_assert!(!sample.is_empty());
            prop_assert!(sample.len() <= max);
            prop_assert_eq!(sample[0], waypoints[0]);
        }
    }
}
