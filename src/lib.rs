//! Per-CPU kernel-event counter.
//!
//! This crate models the counting half of a kernel entry probe: a per-CPU
//! counter map with a single fixed key, and a handler that atomically
//! increments the current processor's slot each time the hooked function is
//! entered. Each processor writes only its own slot, so the update path is
//! lock-free and contention-free; an external reader aggregates the slots
//! into a total after the fact.
//!
//! The map is an explicitly owned object handed to the probe, and processor
//! identity is injected through [`platform::PlatformOps`], so the same
//! handler logic runs under a kernel host or in user-space tests.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use kcount::{CounterMap, CounterProbe, MockPlatform, ProbeContext, snapshot};
//!
//! // The loader provisions one slot per processor.
//! let map = Arc::new(CounterMap::new(4));
//! let probe: CounterProbe<MockPlatform> = CounterProbe::new(Arc::clone(&map));
//!
//! // One invocation event of the hooked function.
//! let status = probe.handle(&ProbeContext::new(0xffff_8000_0452_9a10));
//! assert_eq!(status, 0);
//!
//! // The reader aggregates per-CPU slots.
//! assert_eq!(snapshot(&map).total(), 1);
//! ```

#![no_std]

extern crate alloc;

// =============================================================================
// Platform Abstraction (for testing support)
// =============================================================================

pub mod platform;

// =============================================================================
// Counter Core
// =============================================================================

pub mod context;

pub mod handler;

pub mod store;

// =============================================================================
// Lifecycle and Readout
// =============================================================================

pub mod attach;

pub mod readout;

// Re-export key types for convenience
pub use attach::{Error as AttachError, LICENSE, ProbeDecl, ProbeRegistry, ProbeState};
pub use context::ProbeContext;
pub use handler::{CounterProbe, STATUS_OK};
pub use platform::{MockPlatform, PlatformOps};
pub use readout::{CounterSnapshot, snapshot};
pub use store::{COUNTER_KEY, CounterMap, MAX_ENTRIES};
