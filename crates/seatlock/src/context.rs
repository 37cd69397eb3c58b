//! The session context: the capability object tying the flows together.
//!
//! Identity and storage access flow through one explicit object instead
//! of module-level singletons: whoever holds a `SessionContext` can run
//! authentication flows; whoever doesn't, can't. Tests substitute any
//! collaborator by constructing the context with fakes.

use std::sync::Arc;

use seatlock_authority::{
    CredentialGateway, DocumentStore, FederatedProvider, TokenAuthority,
};
use seatlock_guard::{
    GuardConfig, GuardError, GuardHandle, LocalStore, SessionCache,
    SessionGuard,
};
use seatlock_types::LocalSession;

use crate::SeatlockError;

/// Owns the capabilities of one client context: the credential gateway,
/// the token authority, and this context's local storage.
///
/// ## Flow anatomy
///
/// ```text
/// sign_in / sign_up / sign_in_federated
///     │ gateway authenticates           (Credential Gateway)
///     │ authority issues fresh token    (supersedes prior holder)
///     └ cache stores LocalSession       (this context's snapshot)
///
/// spawn_guard
///     └ reconciliation actor watches the cached session
/// ```
///
/// Issuance follows authentication unconditionally: every successful
/// login bumps the fencing token, which is precisely what evicts any
/// other context holding the seat.
pub struct SessionContext<C, S, L>
where
    C: CredentialGateway,
    S: DocumentStore + Clone,
    L: LocalStore,
{
    gateway: Arc<C>,
    authority: TokenAuthority<S>,
    local: L,
    cache: SessionCache<L>,
}

impl<C, S, L> SessionContext<C, S, L>
where
    C: CredentialGateway,
    S: DocumentStore + Clone,
    L: LocalStore,
{
    /// Creates a context from its three capabilities.
    pub fn new(gateway: C, store: S, local: L) -> Self {
        Self {
            gateway: Arc::new(gateway),
            authority: TokenAuthority::new(store),
            cache: SessionCache::new(local.clone()),
            local,
        }
    }

    /// Signs in with email and password, issues a fresh fencing token,
    /// and caches the resulting session.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LocalSession, SeatlockError> {
        let account = self.gateway.sign_in(email, password).await?;
        self.establish(account).await
    }

    /// Creates an account, then establishes a session exactly like
    /// [`sign_in`](Self::sign_in).
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LocalSession, SeatlockError> {
        let account = self.gateway.sign_up(email, password).await?;
        self.establish(account).await
    }

    /// Signs in through a federated provider.
    pub async fn sign_in_federated(
        &self,
        provider: FederatedProvider,
    ) -> Result<LocalSession, SeatlockError> {
        let account = self.gateway.sign_in_federated(provider).await?;
        self.establish(account).await
    }

    /// Sends a password-reset message. No session is touched.
    pub async fn send_password_reset(
        &self,
        email: &str,
    ) -> Result<(), SeatlockError> {
        self.gateway.send_password_reset(email).await?;
        Ok(())
    }

    /// Voluntary sign-out: destroys the cached session, then signs out
    /// at the provider.
    ///
    /// The cache is cleared before the provider call — even if the
    /// provider is unreachable, this context no longer believes it is
    /// signed in.
    pub async fn sign_out(&self) -> Result<(), SeatlockError> {
        let Some(session) = self.cache.load() else {
            return Ok(());
        };
        self.cache.clear();
        tracing::info!(account = %session.account_id, "signed out");
        self.gateway.sign_out(&session.account_id).await?;
        Ok(())
    }

    /// Reloads the cached session, if this context has one (e.g. after
    /// an app restart). The returned snapshot is NOT verified — spawn a
    /// guard to find out whether it still holds the seat.
    pub fn resume(&self) -> Option<LocalSession> {
        self.cache.load()
    }

    /// Starts a session guard actor for the cached session.
    ///
    /// # Errors
    /// [`GuardError::NotSignedIn`] when no cached session exists.
    pub fn spawn_guard(
        &self,
        config: GuardConfig,
    ) -> Result<GuardHandle, SeatlockError> {
        let session = self.cache.load().ok_or(GuardError::NotSignedIn)?;
        let guard = SessionGuard::new(
            session.account_id,
            self.authority.clone(),
            Arc::clone(&self.gateway),
            self.local.clone(),
            config,
        );
        Ok(guard.spawn())
    }

    /// The token authority this context issues through.
    pub fn authority(&self) -> &TokenAuthority<S> {
        &self.authority
    }

    /// Issues the token and caches the session snapshot. The shared
    /// tail of every successful authentication flow.
    async fn establish(
        &self,
        account: seatlock_types::AccountId,
    ) -> Result<LocalSession, SeatlockError> {
        let token = self.authority.issue(&account).await?;
        let session = LocalSession::new(account, token);
        self.cache.save(&session);
        tracing::info!(account = %session.account_id, "session established");
        Ok(session)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for the authentication flows, with an in-process
    //! gateway that accepts a fixed user table.

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};

    use seatlock_authority::{AuthError, MemoryStore};
    use seatlock_guard::MemoryLocalStore;
    use seatlock_types::AccountId;

    use super::*;

    /// Gateway fake over a fixed email → (password, account) table.
    struct TableGateway {
        users: HashMap<String, (String, String)>,
        sign_outs: AtomicU32,
    }

    impl TableGateway {
        fn with_user(email: &str, password: &str, account: &str) -> Self {
            let mut users = HashMap::new();
            users.insert(
                email.to_string(),
                (password.to_string(), account.to_string()),
            );
            Self {
                users,
                sign_outs: AtomicU32::new(0),
            }
        }
    }

    impl CredentialGateway for TableGateway {
        async fn sign_in(
            &self,
            email: &str,
            password: &str,
        ) -> Result<AccountId, AuthError> {
            match self.users.get(email) {
                Some((expected, account)) if expected == password => {
                    Ok(AccountId::from(account.as_str()))
                }
                Some(_) => Err(AuthError::InvalidCredentials(
                    "wrong password".into(),
                )),
                None => Err(AuthError::InvalidCredentials(
                    "unknown email".into(),
                )),
            }
        }

        async fn sign_up(
            &self,
            email: &str,
            _password: &str,
        ) -> Result<AccountId, AuthError> {
            Ok(AccountId::from(format!("new-{email}").as_str()))
        }

        async fn sign_in_federated(
            &self,
            _provider: FederatedProvider,
        ) -> Result<AccountId, AuthError> {
            Ok(AccountId::from("federated-user"))
        }

        async fn send_password_reset(
            &self,
            email: &str,
        ) -> Result<(), AuthError> {
            if self.users.contains_key(email) {
                Ok(())
            } else {
                Err(AuthError::InvalidCredentials("unknown email".into()))
            }
        }

        async fn sign_out(
            &self,
            _account: &AccountId,
        ) -> Result<(), AuthError> {
            self.sign_outs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn context_with_user(
    ) -> SessionContext<TableGateway, MemoryStore, MemoryLocalStore> {
        SessionContext::new(
            TableGateway::with_user("me@example.com", "hunter2", "u-1"),
            MemoryStore::new(),
            MemoryLocalStore::new(),
        )
    }

    // =====================================================================
    // sign_in()
    // =====================================================================

    #[tokio::test]
    async fn test_sign_in_caches_session_with_issued_token() {
        let context = context_with_user();

        let session =
            context.sign_in("me@example.com", "hunter2").await.unwrap();

        assert_eq!(session.account_id, AccountId::from("u-1"));
        assert_eq!(context.resume(), Some(session.clone()));

        // The cached token IS the authoritative one.
        let authoritative = context
            .authority()
            .fetch(&session.account_id)
            .await
            .unwrap();
        assert_eq!(authoritative, Some(session.token));
    }

    #[tokio::test]
    async fn test_sign_in_bad_password_surfaces_auth_error() {
        let context = context_with_user();

        let result = context.sign_in("me@example.com", "wrong").await;

        assert!(matches!(result, Err(SeatlockError::Auth(_))));
        assert!(context.resume().is_none(), "no session cached on failure");
    }

    #[tokio::test]
    async fn test_sign_in_twice_supersedes_first_token() {
        let context = context_with_user();

        let first =
            context.sign_in("me@example.com", "hunter2").await.unwrap();
        let second =
            context.sign_in("me@example.com", "hunter2").await.unwrap();

        assert_ne!(first.token, second.token);
        let authoritative = context
            .authority()
            .fetch(&second.account_id)
            .await
            .unwrap();
        assert_eq!(authoritative, Some(second.token));
    }

    // =====================================================================
    // Other flows
    // =====================================================================

    #[tokio::test]
    async fn test_sign_up_establishes_session() {
        let context = context_with_user();

        let session = context
            .sign_up("fresh@example.com", "secret")
            .await
            .unwrap();

        assert_eq!(session.account_id, AccountId::from("new-fresh@example.com"));
        assert!(context.resume().is_some());
    }

    #[tokio::test]
    async fn test_sign_in_federated_establishes_session() {
        let context = context_with_user();

        let session = context
            .sign_in_federated(FederatedProvider::Google)
            .await
            .unwrap();

        assert_eq!(session.account_id, AccountId::from("federated-user"));
    }

    #[tokio::test]
    async fn test_send_password_reset_known_email() {
        let context = context_with_user();
        context
            .send_password_reset("me@example.com")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_send_password_reset_unknown_email_errors() {
        let context = context_with_user();
        let result = context.send_password_reset("nobody@example.com").await;
        assert!(matches!(result, Err(SeatlockError::Auth(_))));
    }

    // =====================================================================
    // sign_out() / resume() / spawn_guard()
    // =====================================================================

    #[tokio::test]
    async fn test_sign_out_destroys_cached_session() {
        let context = context_with_user();
        context.sign_in("me@example.com", "hunter2").await.unwrap();

        context.sign_out().await.unwrap();

        assert!(context.resume().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_without_session_is_noop() {
        let context = context_with_user();
        context.sign_out().await.unwrap();
    }

    #[tokio::test]
    async fn test_spawn_guard_without_session_errors() {
        let context = context_with_user();

        let result = context.spawn_guard(GuardConfig::default());

        assert!(matches!(
            result,
            Err(SeatlockError::Guard(GuardError::NotSignedIn))
        ));
    }

    #[tokio::test]
    async fn test_spawn_guard_confirms_fresh_login() {
        use seatlock_guard::{GuardState, ReconcileTrigger};

        let context = context_with_user();
        context.sign_in("me@example.com", "hunter2").await.unwrap();

        let guard = context.spawn_guard(GuardConfig::default()).unwrap();
        let state = guard.check(ReconcileTrigger::Mount).await.unwrap();

        assert_eq!(state, GuardState::Valid);
    }
}
