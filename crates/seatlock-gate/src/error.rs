//! Error types for the gate layer.

use seatlock_guard::GuardState;

/// Errors that can occur at the content access gate.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// The session guard does not currently report `Valid`, so the
    /// requested playback operation was refused.
    #[error("playback denied: session is {state}")]
    AccessDenied {
        /// The guard state at the moment of the refusal.
        state: GuardState,
    },

    /// The selected video's source URL does not yield a media id.
    #[error("source URL has no playable media id: {0}")]
    UnplayableSource(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_denied_names_the_state() {
        let err = GateError::AccessDenied {
            state: GuardState::Invalidated,
        };
        assert!(err.to_string().contains("Invalidated"));
    }
}
