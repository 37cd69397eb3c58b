//! Guard state machine and trigger vocabulary.

use std::fmt;

// ---------------------------------------------------------------------------
// GuardState
// ---------------------------------------------------------------------------

/// The validity of this context's session, as last reconciled.
///
/// A three-state machine:
///
/// ```text
///                ┌──(token matches)──→ Valid ──┐
///   Unchecked ───┤                       ↑     │ (superseded,
///                └──(superseded, ───→ Invalidated   while visible)
///                    while visible)
/// ```
///
/// - **Unchecked**: before the first reconciliation completes. The
///   context may well be valid; it just hasn't been confirmed yet.
/// - **Valid**: the cached token matched the authoritative one at the
///   last check. Playback is permitted.
/// - **Invalidated**: a newer login superseded this context. Terminal —
///   a guard never leaves this state; the user must sign in again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Unchecked,
    Valid,
    Invalidated,
}

impl GuardState {
    /// Returns `true` if the last reconciliation confirmed this context.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns `true` if protected playback is permitted.
    ///
    /// Only `Valid` qualifies — an unchecked session is NOT trusted
    /// until its first reconciliation confirms it.
    pub fn allows_playback(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns `true` if the state machine can never move again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Invalidated)
    }
}

impl fmt::Display for GuardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unchecked => write!(f, "Unchecked"),
            Self::Valid => write!(f, "Valid"),
            Self::Invalidated => write!(f, "Invalidated"),
        }
    }
}

// ---------------------------------------------------------------------------
// Visibility
// ---------------------------------------------------------------------------

/// Whether this client context is currently foregrounded.
///
/// A hidden context that detects a mismatch defers any action until it
/// becomes visible — a background tab is never punished for a race it
/// cannot yet observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Visible)
    }
}

// ---------------------------------------------------------------------------
// ReconcileTrigger
// ---------------------------------------------------------------------------

/// What prompted a reconciliation. Diagnostic only — every trigger runs
/// the identical check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileTrigger {
    /// The guard just started (component initialization).
    Mount,
    /// The window regained focus.
    FocusGained,
    /// The document became visible again.
    VisibilityChanged,
    /// The optional defense-in-depth timer fired.
    Periodic,
}

impl fmt::Display for ReconcileTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mount => write!(f, "mount"),
            Self::FocusGained => write!(f, "focus"),
            Self::VisibilityChanged => write!(f, "visibility"),
            Self::Periodic => write!(f, "periodic"),
        }
    }
}
