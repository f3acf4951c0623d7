//! Deduplication of stations reported by several providers.

use std::collections::BTreeMap;

use crate::domain::{DedupKey, Station};

/// Whether stations from different providers may be merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Only records from the same provider collapse.
    #[default]
    PerSource,
    /// Records at the same grid cell collapse regardless of provider.
    CrossSource,
}

impl MergePolicy {
    fn key(self, station: &Station) -> DedupKey {
        match self {
            MergePolicy::PerSource => station.dedup_key,
            MergePolicy::CrossSource => station.dedup_key.without_source(),
        }
    }
}

/// Single-writer accumulator for stations arriving from concurrent fetches.
///
/// The result does not depend on arrival order: within each key the
/// record with the smallest `(source, id)` is kept and the others only
/// fill fields it lacks, and output is ordered by key.
#[derive(Debug, Default)]
pub struct StationMerger {
    policy: MergePolicy,
    buckets: BTreeMap<DedupKey, Vec<Station>>,
}

impl StationMerger {
    pub fn new(policy: MergePolicy) -> Self {
        Self {
            policy,
            buckets: BTreeMap::new(),
        }
    }

    pub fn push(&mut self, mut station: Station) {
        let key = self.policy.key(&station);
        station.dedup_key = key;
        self.buckets.entry(key).or_default().push(station);
    }

    /// Number of distinct stations so far.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn finish(self) -> Vec<Station> {
        self.buckets
            .into_values()
            .filter_map(|mut group| {
                group.sort_by(|a, b| (a.source, &a.id).cmp(&(b.source, &b.id)));
                let mut records = group.into_iter();
                let mut kept = records.next()?;
                for duplicate in records {
                    kept.absorb(duplicate);
                }
                Some(kept)
            })
            .collect()
    }
}

impl Extend<Station> for StationMerger {
    fn extend<I: IntoIterator<Item = Station>>(&mut self, iter: I) {
        for station in iter {
            self.push(station);
        }
    }
}

/// Collapse duplicates in one pass.
pub fn merge_stations(
    stations: impl IntoIterator<Item = Station>,
    policy: MergePolicy,
) -> Vec<Station> {
    let mut merger = StationMerger::new(policy);
    merger.extend(stations);
    merger.finish()
}
