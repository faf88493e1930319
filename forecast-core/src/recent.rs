//! Bounded list of recent lookups shown as city cards.

use tracing::{debug, info};

use crate::model::WeatherRecord;

/// Number of city cards kept on screen.
pub const DEFAULT_CAPACITY: usize = 4;

/// Insertion-ordered, capacity-bounded set of [`WeatherRecord`]s keyed by
/// case-insensitive location name.
///
/// Eviction is FIFO by insertion: once full, a new location pushes out the
/// oldest one, no matter how recently that one was looked at. Re-inserting a
/// known location leaves the existing entry (and its data) untouched.
///
/// There is no internal locking; mutation goes through `&mut self`.
#[derive(Debug, Clone)]
pub struct RecentResultsBuffer {
    records: Vec<WeatherRecord>,
    capacity: usize,
}

impl RecentResultsBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A zero capacity is bumped to one so the latest insert is always kept.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Store `record` unless its location is already present.
    ///
    /// Returns `true` if the record was added.
    pub fn insert(&mut self, record: WeatherRecord) -> bool {
        if self.contains(&record.location_name) {
            debug!(location = %record.location_name, "location already in recent results, skipping");
            return false;
        }

        info!(location = %record.location_name, "adding location to recent results");
        self.records.push(record);

        if self.records.len() > self.capacity {
            let evicted = self.records.remove(0);
            info!(location = %evicted.location_name, "evicted oldest recent result");
        }

        true
    }

    /// Copy of the contents, newest first.
    pub fn snapshot_most_recent_first(&self) -> Vec<WeatherRecord> {
        self.records.iter().rev().cloned().collect()
    }

    pub fn reset(&mut self) {
        self.records.clear();
    }

    pub fn contains(&self, location_name: &str) -> bool {
        self.records.iter().any(|r| r.is_named(location_name))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for RecentResultsBuffer {
    fn default() -> Self {
        Self::new()
    }
}
