//! Unified error type for the Seatlock library.

use seatlock_authority::{AuthError, StoreError};
use seatlock_gate::GateError;
use seatlock_guard::GuardError;

use crate::CatalogError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `seatlock` meta-crate, you deal with this single
/// error type instead of importing errors from each sub-crate. The
/// `#[from]` attribute on each variant auto-generates `From` impls, so
/// the `?` operator converts sub-crate errors automatically.
///
/// Surfacing policy: `Auth` errors are shown inline on the sign-in
/// form; `Guard(Superseded)` ends the session with a notice; store
/// hiccups during reconciliation never reach this type at all under
/// the default fail-open policy.
#[derive(Debug, thiserror::Error)]
pub enum SeatlockError {
    /// An identity-provider error during an authentication flow.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A document-store error during token issuance or lookup.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A session-guard error (superseded session, detached actor).
    #[error(transparent)]
    Guard(#[from] GuardError),

    /// A content-gate error (denied playback, unplayable source).
    #[error(transparent)]
    Gate(#[from] GateError),

    /// A content-catalog error.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_auth_error() {
        let err = AuthError::InvalidCredentials("nope".into());
        let top: SeatlockError = err.into();
        assert!(matches!(top, SeatlockError::Auth(_)));
        assert!(top.to_string().contains("nope"));
    }

    #[test]
    fn test_from_store_error() {
        let err = StoreError::Unavailable("down".into());
        let top: SeatlockError = err.into();
        assert!(matches!(top, SeatlockError::Store(_)));
    }

    #[test]
    fn test_from_guard_error() {
        let err = GuardError::NotSignedIn;
        let top: SeatlockError = err.into();
        assert!(matches!(top, SeatlockError::Guard(_)));
    }

    #[test]
    fn test_from_catalog_error() {
        let err = CatalogError::Unavailable("offline".into());
        let top: SeatlockError = err.into();
        assert!(matches!(top, SeatlockError::Catalog(_)));
    }
}
