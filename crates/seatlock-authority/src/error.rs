//! Error types for the authority layer.

/// Errors from the identity provider during authentication flows.
///
/// Every variant carries a human-readable message suitable for showing
/// inline on the sign-in form. All of these are recoverable: the user
/// fixes their input or retries once the network is back.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The provider rejected the credentials (wrong password, unknown
    /// email, malformed input).
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// A federated provider refused the sign-in (popup dismissed,
    /// account disabled, consent withdrawn).
    #[error("provider rejected sign-in: {0}")]
    ProviderRejected(String),

    /// The provider could not be reached at all.
    #[error("network failure during authentication: {0}")]
    Network(String),
}

/// Errors from the durable document store backing the token authority.
///
/// Reconciliation treats [`StoreError::Unavailable`] specially: under the
/// default fail-open policy it is absorbed and never forces a sign-out.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached (network partition, backend down).
    /// Transient by assumption.
    #[error("document store unavailable: {0}")]
    Unavailable(String),

    /// The store answered but the operation failed (corrupt document,
    /// permission denied, quota).
    #[error("document store backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_messages_are_human_readable() {
        let err = AuthError::InvalidCredentials("wrong password".into());
        assert!(err.to_string().contains("wrong password"));

        let err = AuthError::Network("timed out".into());
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Unavailable("connection refused".into());
        assert!(err.to_string().contains("unavailable"));
        assert!(err.to_string().contains("connection refused"));
    }
}
