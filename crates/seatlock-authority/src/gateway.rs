//! Credential gateway: the seam to the external identity provider.
//!
//! Seatlock never verifies a password itself — that is the identity
//! provider's job (Firebase Auth, Auth0, a home-grown service, whatever
//! the deployment uses). This module defines the [`CredentialGateway`]
//! trait the rest of the library calls, so production wires in the real
//! provider and tests wire in an in-process fake without any framework
//! code changing.

use seatlock_types::AccountId;

use crate::AuthError;

/// A federated identity provider selectable at sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FederatedProvider {
    Google,
    /// Any other provider the deployment supports, by name.
    Other(String),
}

impl std::fmt::Display for FederatedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Google => write!(f, "google"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Performs the authentication handshake with the identity provider.
///
/// Implementations authenticate; they do NOT issue fencing tokens. The
/// [`TokenAuthority`](crate::TokenAuthority) is invoked only after one
/// of these methods succeeds.
///
/// # Trait bounds
///
/// - `Send + Sync` — the gateway is shared across async tasks; the
///   guard actor calls `sign_out` from its own task.
/// - `'static` — it lives as long as the session context that owns it.
pub trait CredentialGateway: Send + Sync + 'static {
    /// Signs in with email and password.
    ///
    /// # Errors
    /// [`AuthError::InvalidCredentials`] for bad input,
    /// [`AuthError::Network`] when the provider is unreachable.
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<AccountId, AuthError>> + Send;

    /// Creates a new account with email and password, signing it in.
    fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<AccountId, AuthError>> + Send;

    /// Signs in through a federated provider.
    ///
    /// # Errors
    /// [`AuthError::ProviderRejected`] when the provider refuses
    /// (dismissed popup, disabled account).
    fn sign_in_federated(
        &self,
        provider: FederatedProvider,
    ) -> impl std::future::Future<Output = Result<AccountId, AuthError>> + Send;

    /// Sends a password-reset message to the given address.
    fn send_password_reset(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<(), AuthError>> + Send;

    /// Terminates the provider-side session for an account.
    ///
    /// Called on voluntary sign-out AND by the Session Guard when it
    /// tears down a superseded session.
    fn sign_out(
        &self,
        account: &AccountId,
    ) -> impl std::future::Future<Output = Result<(), AuthError>> + Send;
}
