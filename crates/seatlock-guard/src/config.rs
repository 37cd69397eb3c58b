//! Guard configuration.

use std::time::Duration;

// ---------------------------------------------------------------------------
// FailurePolicy
// ---------------------------------------------------------------------------

/// What to do when the reconciliation fetch itself fails.
///
/// This is a genuine security/availability trade-off, so it is a
/// configuration knob, not a hard-coded behavior:
///
/// - **FailOpen** (default): keep the previous state, log, move on. A
///   transient outage never signs a paying user out mid-video, at the
///   cost of a window where a truly superseded session lingers until
///   the store is reachable again.
/// - **FailClosed**: treat an unreachable store as invalidation. For
///   deployments that rate seat enforcement above availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    #[default]
    FailOpen,
    FailClosed,
}

// ---------------------------------------------------------------------------
// GuardConfig
// ---------------------------------------------------------------------------

/// Configuration for a session guard.
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Behavior when the authority fetch fails. Default: fail-open.
    pub failure_policy: FailurePolicy,

    /// Optional defense-in-depth timer: reconcile every interval on top
    /// of the event-driven triggers. Default: `None` — the trigger set
    /// (mount, focus, visibility) is sufficient for correctness, and
    /// skipping the timer keeps authority read load bounded by user
    /// activity.
    pub periodic: Option<Duration>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::default(),
            periodic: None,
        }
    }
}

impl GuardConfig {
    /// Config with the supplementary periodic check enabled.
    pub fn with_periodic(interval: Duration) -> Self {
        Self {
            periodic: Some(interval),
            ..Self::default()
        }
    }

    /// Config with the strict failure policy.
    pub fn fail_closed() -> Self {
        Self {
            failure_policy: FailurePolicy::FailClosed,
            ..Self::default()
        }
    }
}
