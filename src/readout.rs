//! Reader-side aggregation of the counter map.
//!
//! The store never sums across processors; whoever reads the map gets one
//! value per slot and aggregates here. Reads are relaxed loads, so a
//! snapshot taken while events are in flight is a consistent-enough lower
//! bound per slot rather than a global instant.

use alloc::vec::Vec;

use crate::store::{COUNTER_KEY, CounterMap};

/// Point-in-time view of every processor's count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterSnapshot {
    /// One count per logical processor, indexed by processor id.
    pub per_cpu: Vec<u64>,
}

impl CounterSnapshot {
    /// Aggregate total across all processors.
    pub fn total(&self) -> u64 {
        self.per_cpu.iter().fold(0u64, |sum, v| sum.wrapping_add(*v))
    }
}

/// Read every processor's slot for the fixed key.
///
/// Repeated snapshots without intervening events return equal values.
pub fn snapshot(map: &CounterMap) -> CounterSnapshot {
    let per_cpu = (0..map.nr_cpus())
        .map(|cpu| map.value(COUNTER_KEY, cpu).unwrap_or(0))
        .collect();
    CounterSnapshot { per_cpu }
}
