//! Platform abstraction layer for processor identity.
//!
//! The probe handler originally runs pinned to whichever processor entered
//! the hooked function, so "current CPU" is ambient state supplied by the
//! kernel. Outside that environment it has to be injected; this trait is
//! that seam, and the mock implementation allows testing in user space.

use core::sync::atomic::{AtomicU32, Ordering};

/// Platform operations trait.
///
/// Abstracts over the hosting runtime's notion of processor identity so the
/// same handler logic runs in kernel context and under the test harness.
pub trait PlatformOps {
    /// Identifier of the logical processor executing the caller.
    fn cpu_id() -> u32;

    /// Number of logical processors the platform exposes.
    fn nr_cpus() -> u32;
}

// =============================================================================
// Mock Implementation (test environment)
// =============================================================================

/// Mock CPU ID for testing.
static MOCK_CPU_ID: AtomicU32 = AtomicU32::new(0);

/// Mock processor count for testing.
static MOCK_NR_CPUS: AtomicU32 = AtomicU32::new(4);

/// Mock platform operations for testing.
///
/// Reports whatever CPU identity was last installed via [`set_mock_cpu_id`].
/// Embedders running inside a real kernel supply their own [`PlatformOps`]
/// implementation instead.
pub struct MockPlatform;

impl PlatformOps for MockPlatform {
    fn cpu_id() -> u32 {
        MOCK_CPU_ID.load(Ordering::Relaxed)
    }

    fn nr_cpus() -> u32 {
        MOCK_NR_CPUS.load(Ordering::Relaxed)
    }
}

/// Set mock CPU ID for testing.
pub fn set_mock_cpu_id(id: u32) {
    MOCK_CPU_ID.store(id, Ordering::Relaxed);
}

/// Set mock processor count for testing.
pub fn set_mock_nr_cpus(n: u32) {
    MOCK_NR_CPUS.store(n, Ordering::Relaxed);
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_cpu_id() {
        set_mock_cpu_id(3);
        assert_eq!(MockPlatform::cpu_id(), 3);

        set_mock_cpu_id(7);
        assert_eq!(MockPlatform::cpu_id(), 7);
    }

    #[test]
    fn test_mock_nr_cpus() {
        set_mock_nr_cpus(8);
        assert_eq!(MockPlatform::nr_cpus(), 8);
    }
}
