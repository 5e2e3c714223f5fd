//! Invocation context passed to probe handlers.

/// Snapshot of the hooked function's entry state.
///
/// Constructed by the hosting runtime each time the target function is
/// entered and passed to the handler. The counter probe treats it as
/// opaque: no field influences the count.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbeContext {
    /// Entry address of the hooked function.
    pub instruction_pointer: u64,
    /// Raw argument registers captured at entry.
    pub args: [u64; 4],
}

impl ProbeContext {
    /// Create a context for an entry at the given address.
    pub fn new(instruction_pointer: u64) -> Self {
        Self {
            instruction_pointer,
            ..Default::default()
        }
    }

    /// Set argument registers.
    pub fn with_args(mut self, args: [u64; 4]) -> Self {
        self.args = args;
        self
    }
}
