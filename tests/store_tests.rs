//! Integration tests for the per-CPU counter map.
//!
//! Tests the single-entry contract, absence handling, and readout.

use std::sync::atomic::Ordering;

use kcount::{COUNTER_KEY, CounterMap, MAX_ENTRIES, snapshot};

// =============================================================================
// Map Contract Tests
// =============================================================================

#[test]
fn test_map_holds_exactly_one_entry() {
    assert_eq!(MAX_ENTRIES, 1);

    let map = CounterMap::new(4);
    assert!(map.lookup(COUNTER_KEY, 0).is_some());
    assert!(map.lookup(COUNTER_KEY + 1, 0).is_none());
}

#[test]
fn test_fresh_map_all_slots_zero() {
    let map = CounterMap::new(8);
    let snap = snapshot(&map);

    assert_eq!(snap.per_cpu, vec![0; 8]);
    assert_eq!(snap.total(), 0);
}

#[test]
fn test_nr_cpus_matches_construction() {
    let map = CounterMap::new(6);
    assert_eq!(map.nr_cpus(), 6);
    assert_eq!(snapshot(&map).per_cpu.len(), 6);
}

#[test]
fn test_increment_through_slot_is_visible_to_reader() {
    let map = CounterMap::new(2);

    let slot = map.lookup(COUNTER_KEY, 1).unwrap();
    slot.fetch_add(3, Ordering::Relaxed);

    assert_eq!(map.value(COUNTER_KEY, 1), Some(3));
    assert_eq!(map.value(COUNTER_KEY, 0), Some(0));
    assert_eq!(snapshot(&map).total(), 3);
}

#[test]
fn test_readout_is_idempotent() {
    let map = CounterMap::new(4);
    map.lookup(COUNTER_KEY, 2)
        .unwrap()
        .fetch_add(7, Ordering::Relaxed);

    let first = snapshot(&map);
    let second = snapshot(&map);
    assert_eq!(first, second);
    assert_eq!(first.total(), second.total());
}

// =============================================================================
// Absence Tests
// =============================================================================

#[test]
fn test_lookup_out_of_range_cpu_is_absent() {
    let map = CounterMap::new(4);
    assert!(map.lookup(COUNTER_KEY, 4).is_none());
    assert!(map.value(COUNTER_KEY, u32::MAX).is_none());
}

#[test]
fn test_zero_cpu_map_is_all_absent() {
    let map = CounterMap::new(0);
    assert!(map.lookup(COUNTER_KEY, 0).is_none());

    let snap = snapshot(&map);
    assert!(snap.per_cpu.is_empty());
    assert_eq!(snap.total(), 0);
}
