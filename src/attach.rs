//! Probe registration and dispatch.
//!
//! Models the load-time half of the probe lifecycle: binding a counter
//! probe to a symbolic target function, gating the load on the declared
//! license, and dispatching invocation events to the bound handler. The
//! hot path stays in [`crate::handler`]; this registry only decides whether
//! a handler is bound and enabled for a given target.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use spin::Mutex;

use crate::context::ProbeContext;
use crate::handler::{CounterProbe, STATUS_OK};
use crate::platform::PlatformOps;
use crate::store::CounterMap;

/// License declared by the counter probe.
///
/// Purely a load-time gate required by the hosting runtime; no runtime
/// behavior depends on it.
pub const LICENSE: &str = "Dual BSD/GPL";

/// Probe state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeState {
    /// Probe is registered but will not trigger.
    Disabled,
    /// Probe is active and counts each entry of its target.
    Enabled,
}

/// Declaration supplied at registration time.
#[derive(Debug, Clone)]
pub struct ProbeDecl {
    /// Symbolic name of the kernel function whose entry is hooked.
    pub target: String,
    /// Declared license terms.
    pub license: String,
}

/// Error types for registration and dispatch operations.
#[derive(Debug, Clone)]
pub enum Error {
    /// Target already has an attached probe.
    AlreadyAttached(String),
    /// Target has no attached probe.
    NotAttached(String),
    /// Declared license does not permit loading.
    IncompatibleLicense(String),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AlreadyAttached(name) => {
                write!(f, "Target already has an attached probe: {}", name)
            }
            Self::NotAttached(name) => write!(f, "No probe attached to target: {}", name),
            Self::IncompatibleLicense(license) => {
                write!(f, "License does not permit loading: {}", license)
            }
        }
    }
}

impl core::error::Error for Error {}

/// One registered probe.
struct Attachment<P: PlatformOps> {
    decl: ProbeDecl,
    probe: CounterProbe<P>,
    state: ProbeState,
}

/// Registry binding counter probes to symbolic target functions.
///
/// Stands in for the external loader and hosting runtime: registration is
/// the load-time map/handler binding, [`fire`](Self::fire) is the runtime
/// invoking the handler at function entry. Registration completes before
/// any event fires; freshly registered probes start [`ProbeState::Enabled`].
pub struct ProbeRegistry<P: PlatformOps> {
    attachments: Mutex<BTreeMap<String, Attachment<P>>>,
}

impl<P: PlatformOps> ProbeRegistry<P> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            attachments: Mutex::new(BTreeMap::new()),
        }
    }

    /// Register a counter probe for the declared target.
    ///
    /// Rejects declarations whose license is not GPL-compatible, and
    /// targets that already carry a probe.
    pub fn register(&self, decl: ProbeDecl, map: Arc<CounterMap>) -> Result<(), Error> {
        if !license_is_gpl_compatible(&decl.license) {
            return Err(Error::IncompatibleLicense(decl.license));
        }

        let mut attachments = self.attachments.lock();
        if attachments.contains_key(&decl.target) {
            return Err(Error::AlreadyAttached(decl.target));
        }

        log::info!(
            "probe: registering counter on {} (license: {})",
            decl.target,
            decl.license
        );

        let target = decl.target.clone();
        attachments.insert(
            target,
            Attachment {
                decl,
                probe: CounterProbe::new(map),
                state: ProbeState::Enabled,
            },
        );
        Ok(())
    }

    /// Unregister the probe attached to `target`, dropping its binding.
    pub fn unregister(&self, target: &str) -> Result<(), Error> {
        let mut attachments = self.attachments.lock();
        match attachments.remove(target) {
            Some(att) => {
                log::info!("probe: unregistered counter on {}", att.decl.target);
                Ok(())
            }
            None => Err(Error::NotAttached(String::from(target))),
        }
    }

    /// Enable the probe attached to `target`.
    pub fn enable(&self, target: &str) -> Result<(), Error> {
        self.set_state(target, ProbeState::Enabled)
    }

    /// Disable the probe attached to `target` without unbinding it.
    pub fn disable(&self, target: &str) -> Result<(), Error> {
        self.set_state(target, ProbeState::Disabled)
    }

    fn set_state(&self, target: &str, state: ProbeState) -> Result<(), Error> {
        let mut attachments = self.attachments.lock();
        match attachments.get_mut(target) {
            Some(att) => {
                att.state = state;
                Ok(())
            }
            None => Err(Error::NotAttached(String::from(target))),
        }
    }

    /// Whether `target` currently has a probe bound.
    pub fn is_attached(&self, target: &str) -> bool {
        self.attachments.lock().contains_key(target)
    }

    /// Current state of the probe attached to `target`.
    pub fn state(&self, target: &str) -> Option<ProbeState> {
        self.attachments.lock().get(target).map(|att| att.state)
    }

    /// Number of registered probes.
    pub fn count(&self) -> usize {
        self.attachments.lock().len()
    }

    /// Deliver one invocation event for `target`.
    ///
    /// Invokes the bound handler when the probe is enabled. A disabled
    /// probe swallows the event without counting; both cases report the
    /// handler's success status. Firing an unbound target is a dispatch
    /// error, not a handler error.
    pub fn fire(&self, target: &str, ctx: &ProbeContext) -> Result<i32, Error> {
        let attachments = self.attachments.lock();
        let att = attachments
            .get(target)
            .ok_or_else(|| Error::NotAttached(String::from(target)))?;

        if att.state == ProbeState::Disabled {
            return Ok(STATUS_OK);
        }

        Ok(att.probe.handle(ctx))
    }
}

impl<P: PlatformOps> Default for ProbeRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Check whether a declared license permits loading.
///
/// Mirrors the hosting runtime's GPL-compatibility set for probe programs.
fn license_is_gpl_compatible(license: &str) -> bool {
    matches!(
        license,
        "GPL" | "GPL v2" | "GPL and additional rights" | "Dual BSD/GPL" | "Dual MIT/GPL"
            | "Dual MPL/GPL"
    )
}
