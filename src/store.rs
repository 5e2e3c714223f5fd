//! Per-CPU counter map.
//!
//! A fixed-size array map holding exactly one 64-bit counter, replicated
//! once per logical processor. Each processor observes and mutates only its
//! own slot, so the hot update path never contends across processors; the
//! reader aggregates slots after the fact (see [`crate::readout`]).

use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};

/// The single fixed key addressing the counter entry.
pub const COUNTER_KEY: u32 = 0;

/// Maximum number of entries in the map. The map holds exactly one counter.
pub const MAX_ENTRIES: u32 = 1;

/// Per-CPU counter map: one independent `u64` slot per logical processor.
///
/// Owned explicitly by whoever loads the probe and handed to the handler;
/// the handler has read-modify-write access to slots but does not manage
/// the map's lifecycle. Slots start at zero and only ever grow (wrapping
/// silently at `u64::MAX`, which is never expected in practice).
#[derive(Debug)]
pub struct CounterMap {
    slots: Vec<AtomicU64>,
}

impl CounterMap {
    /// Create a map with one zeroed slot per processor.
    ///
    /// # Arguments
    /// * `nr_cpus` - Number of logical processors to provision slots for.
    pub fn new(nr_cpus: u32) -> Self {
        let mut slots = Vec::with_capacity(nr_cpus as usize);
        for _ in 0..nr_cpus {
            slots.push(AtomicU64::new(0));
        }
        Self { slots }
    }

    /// Number of per-processor slots in the map.
    pub fn nr_cpus(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Look up the given processor's slot for `key`.
    ///
    /// Returns `None` when the key does not match the map's single entry or
    /// the processor id is out of range. Absent is a valid, expected outcome
    /// and callers must treat it as a no-op, not an error. Never blocks, and
    /// never touches another processor's slot.
    pub fn lookup(&self, key: u32, cpu: u32) -> Option<&AtomicU64> {
        if key != COUNTER_KEY {
            return None;
        }
        self.slots.get(cpu as usize)
    }

    /// Read the given processor's current count.
    ///
    /// Reader-side convenience over [`lookup`](Self::lookup); same absence
    /// rules apply.
    pub fn value(&self, key: u32, cpu: u32) -> Option<u64> {
        self.lookup(key, cpu).map(|slot| slot.load(Ordering::Relaxed))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_map_reads_zero() {
        let map = CounterMap::new(4);
        for cpu in 0..4 {
            assert_eq!(map.value(COUNTER_KEY, cpu), Some(0));
        }
    }

    #[test]
    fn test_lookup_wrong_key_is_absent() {
        let map = CounterMap::new(2);
        assert!(map.lookup(1, 0).is_none());
        assert!(map.lookup(u32::MAX, 0).is_none());
    }

    #[test]
    fn test_lookup_cpu_out_of_range_is_absent() {
        let map = CounterMap::new(2);
        assert!(map.lookup(COUNTER_KEY, 2).is_none());
    }

    #[test]
    fn test_slots_are_independent() {
        let map = CounterMap::new(2);
        map.lookup(COUNTER_KEY, 0)
            .unwrap()
            .fetch_add(5, Ordering::Relaxed);

        assert_eq!(map.value(COUNTER_KEY, 0), Some(5));
        assert_eq!(map.value(COUNTER_KEY, 1), Some(0));
    }
}
