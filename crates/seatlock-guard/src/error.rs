//! Error types for the guard layer.

use seatlock_authority::StoreError;
use seatlock_types::AccountId;

/// Errors that can occur during session guarding.
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    /// A newer login superseded this context's session. Always fatal to
    /// the current session: by the time this error is returned, the
    /// guard has already signed the account out, cleared the local
    /// cache, and flipped its state to `Invalidated`. Never retried.
    #[error("session for {0} was superseded: account signed in elsewhere")]
    Superseded(AccountId),

    /// No cached session exists, so there is nothing to guard.
    #[error("no cached session for this context")]
    NotSignedIn,

    /// The authority fetch failed and the guard is configured
    /// fail-closed. Under the default fail-open policy this error is
    /// absorbed and never surfaces.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The guard actor has stopped (shut down, or the observer outlived
    /// the handle that owned it).
    #[error("session guard is no longer running")]
    Detached,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_superseded_message_names_the_account() {
        let err = GuardError::Superseded(AccountId::from("u-1"));
        assert!(err.to_string().contains("u-1"));
        assert!(err.to_string().contains("signed in elsewhere"));
    }

    #[test]
    fn test_store_error_is_transparent() {
        let err: GuardError =
            StoreError::Unavailable("down".into()).into();
        assert!(err.to_string().contains("down"));
    }
}
