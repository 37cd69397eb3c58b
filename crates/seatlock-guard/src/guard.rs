//! The reconciliation core: one guard per signed-in client context.
//!
//! A `SessionGuard` owns this context's view of its own validity. On
//! each trigger it fetches the account's authoritative token and
//! compares it byte-for-byte with the locally cached one. Everything
//! else — the actor loop, channels, timers — is plumbing around
//! [`SessionGuard::reconcile`].

use std::sync::Arc;

use seatlock_authority::{CredentialGateway, DocumentStore, TokenAuthority};
use seatlock_types::AccountId;

use crate::{
    FailurePolicy, GuardConfig, GuardError, GuardState, LocalStore,
    ReconcileTrigger, SessionCache, Visibility,
};

/// The session guard state machine for one client context.
///
/// ## Reconciliation outcomes
///
/// ```text
/// fetch authoritative token
///   │
///   ├─ error ──────────────→ fail-open: keep state (absorbed)
///   │                        fail-closed: invalidate
///   ├─ absent ─────────────→ no opinion: keep state
///   ├─ equal to cached ────→ Valid
///   └─ different ──┬─ visible → Invalidated (sign out, clear cache)
///                  └─ hidden  → defer to the next visible trigger
/// ```
///
/// `Invalidated` is terminal: once a session is torn down, further
/// triggers are no-ops. Invalidation happens exactly once.
pub struct SessionGuard<S, C, L>
where
    S: DocumentStore,
    C: CredentialGateway,
    L: LocalStore,
{
    account: AccountId,
    authority: TokenAuthority<S>,
    gateway: Arc<C>,
    cache: SessionCache<L>,
    config: GuardConfig,
    state: GuardState,
    visibility: Visibility,
}

impl<S, C, L> SessionGuard<S, C, L>
where
    S: DocumentStore,
    C: CredentialGateway,
    L: LocalStore,
{
    /// Creates a guard for the given account.
    ///
    /// The guard starts `Unchecked` and `Visible`; the embedder reports
    /// visibility changes as they happen.
    pub fn new(
        account: AccountId,
        authority: TokenAuthority<S>,
        gateway: Arc<C>,
        local: L,
        config: GuardConfig,
    ) -> Self {
        Self {
            account,
            authority,
            gateway,
            cache: SessionCache::new(local),
            config,
            state: GuardState::Unchecked,
            visibility: Visibility::Visible,
        }
    }

    /// The account this guard watches.
    pub fn account(&self) -> &AccountId {
        &self.account
    }

    /// The guard's configuration.
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Current state, as of the last reconciliation.
    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Current visibility of the owning context.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Records a visibility change. Returns `true` when the context
    /// just became visible — the caller should reconcile, because a
    /// deferred mismatch may be waiting.
    pub fn set_visibility(&mut self, visibility: Visibility) -> bool {
        let became_visible = self.visibility == Visibility::Hidden
            && visibility == Visibility::Visible;
        self.visibility = visibility;
        became_visible
    }

    /// Runs one reconciliation pass.
    ///
    /// Returns the resulting state, or [`GuardError::Superseded`] after
    /// tearing the session down. Store failures surface as errors only
    /// under [`FailurePolicy::FailClosed`]; the default policy absorbs
    /// them entirely.
    pub async fn reconcile(
        &mut self,
        trigger: ReconcileTrigger,
    ) -> Result<GuardState, GuardError> {
        // Terminal state: a torn-down session is never re-examined.
        if self.state.is_terminal() {
            return Ok(self.state);
        }

        let authoritative = match self.authority.fetch(&self.account).await {
            Ok(token) => token,
            Err(err) => {
                return match self.config.failure_policy {
                    FailurePolicy::FailOpen => {
                        // Deliberate availability-over-strictness
                        // trade-off: an unreachable store keeps the
                        // previous answer instead of punishing the user.
                        tracing::warn!(
                            account = %self.account,
                            %trigger,
                            error = %err,
                            "reconciliation fetch failed — failing open, state unchanged"
                        );
                        Ok(self.state)
                    }
                    FailurePolicy::FailClosed => {
                        tracing::warn!(
                            account = %self.account,
                            %trigger,
                            error = %err,
                            "reconciliation fetch failed — failing closed"
                        );
                        self.invalidate().await;
                        Err(GuardError::Store(err))
                    }
                };
            }
        };

        let Some(authoritative) = authoritative else {
            // The authority has no token on record — no opinion, no
            // action. Usually the staleness window of the backing store.
            tracing::debug!(
                account = %self.account,
                %trigger,
                "no authoritative token on record, keeping state"
            );
            return Ok(self.state);
        };

        let cached = self.cache.load().map(|session| session.token);
        if cached.as_ref() == Some(&authoritative) {
            if self.state != GuardState::Valid {
                tracing::debug!(account = %self.account, %trigger, "session confirmed valid");
            }
            self.state = GuardState::Valid;
            return Ok(self.state);
        }

        // Mismatch. A hidden context defers: it will re-check on the
        // next visible trigger, when the user can actually see the
        // sign-out happen.
        if !self.visibility.is_visible() {
            tracing::debug!(
                account = %self.account,
                %trigger,
                "token mismatch while hidden — deferring to next visible check"
            );
            return Ok(self.state);
        }

        tracing::info!(
            account = %self.account,
            %trigger,
            "token mismatch while visible — session superseded"
        );
        self.invalidate().await;
        Err(GuardError::Superseded(self.account.clone()))
    }

    /// Tears the session down: provider sign-out, cache destruction,
    /// terminal state.
    ///
    /// A failed provider sign-out is logged and absorbed — the local
    /// teardown must complete regardless, because the cached token is
    /// already known-stale.
    async fn invalidate(&mut self) {
        if let Err(err) = self.gateway.sign_out(&self.account).await {
            tracing::error!(
                account = %self.account,
                error = %err,
                "provider sign-out failed during teardown, continuing locally"
            );
        }
        self.cache.clear();
        self.state = GuardState::Invalidated;
        tracing::info!(account = %self.account, "session invalidated");
    }
}

// =========================================================================
// Tests
// =========================================================================
