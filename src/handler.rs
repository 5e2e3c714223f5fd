//! Entry-probe handler: one atomic increment per invocation event.
//!
//! Runs inline in the execution context that entered the hooked function,
//! so it must not block, sleep, or fail outward. The entire handler is a
//! slot lookup plus one relaxed fetch-and-add; a missed lookup is absorbed
//! silently and the event is simply not counted.

use alloc::sync::Arc;
use core::marker::PhantomData;
use core::sync::atomic::Ordering;

use crate::context::ProbeContext;
use crate::platform::PlatformOps;
use crate::store::{COUNTER_KEY, CounterMap};

/// Status returned to the hosting runtime. The handler always succeeds.
pub const STATUS_OK: i32 = 0;

/// Counting probe bound to a shared per-CPU counter map.
///
/// Holds the map it writes into but does not own its lifecycle; the loader
/// that registered the probe tears the map down after detaching. Processor
/// identity comes from the injected platform, which keeps the handler
/// exercisable outside kernel context.
pub struct CounterProbe<P: PlatformOps = crate::platform::MockPlatform> {
    map: Arc<CounterMap>,
    _platform: PhantomData<P>,
}

impl<P: PlatformOps> CounterProbe<P> {
    /// Create a probe writing into the given map.
    pub fn new(map: Arc<CounterMap>) -> Self {
        Self {
            map,
            _platform: PhantomData,
        }
    }

    /// The map this probe writes into.
    pub fn map(&self) -> &Arc<CounterMap> {
        &self.map
    }

    /// Handle one invocation event.
    ///
    /// Looks up the current processor's slot and atomically adds one. The
    /// context is opaque to this probe and left untouched, as is the traced
    /// function's control flow. Always reports [`STATUS_OK`], including
    /// when the slot lookup comes back absent.
    pub fn handle(&self, _ctx: &ProbeContext) -> i32 {
        let key = COUNTER_KEY;
        let cpu = P::cpu_id();

        match self.map.lookup(key, cpu) {
            Some(slot) => {
                slot.fetch_add(1, Ordering::Relaxed);
            }
            None => {
                log::trace!("counter probe: no slot for key={} cpu={}", key, cpu);
            }
        }

        STATUS_OK
    }
}

impl<P: PlatformOps> Clone for CounterProbe<P> {
    fn clone(&self) -> Self {
        Self {
            map: Arc::clone(&self.map),
            _platform: PhantomData,
        }
    }
}
