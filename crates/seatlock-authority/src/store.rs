//! The durable document store behind the token authority.
//!
//! One trait, one provided implementation. Production deployments
//! implement [`DocumentStore`] over their real document database;
//! [`MemoryStore`] is the in-process reference used by tests and demos.

use std::collections::HashMap;
use std::sync::Arc;

use seatlock_types::{AccountId, SessionToken};
use tokio::sync::RwLock;

use crate::StoreError;

/// Durable storage for each account's authoritative session token.
///
/// Two operations, mirroring the document-database primitives the
/// authority needs and nothing more:
///
/// - `fetch_token` — the reconciliation read path. Depending on the
///   backend's consistency guarantees it may serve a briefly stale
///   value; callers MUST tolerate that (the next reconciliation will
///   see the settled value).
/// - `put_token` — merge-write: only the token field of the account
///   document is overwritten, other account fields are untouched.
///   Unconditional replace, last write wins, no read-modify-write.
pub trait DocumentStore: Send + Sync + 'static {
    /// Reads the authoritative token for an account, if one exists.
    fn fetch_token(
        &self,
        account: &AccountId,
    ) -> impl std::future::Future<Output = Result<Option<SessionToken>, StoreError>> + Send;

    /// Writes the authoritative token for an account, replacing any
    /// previous value.
    fn put_token(
        &self,
        account: &AccountId,
        token: &SessionToken,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}

/// In-process [`DocumentStore`] backed by a `HashMap`.
///
/// Cheap to clone — clones share the same map, so two "contexts" in a
/// test genuinely race against one store, the same way two browsers
/// race against one backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tokens: Arc<RwLock<HashMap<AccountId, SessionToken>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    async fn fetch_token(
        &self,
        account: &AccountId,
    ) -> Result<Option<SessionToken>, StoreError> {
        Ok(self.tokens.read().await.get(account).cloned())
    }

    async fn put_token(
        &self,
        account: &AccountId,
        token: &SessionToken,
    ) -> Result<(), StoreError> {
        self.tokens
            .write()
            .await
            .insert(account.clone(), token.clone());
        Ok(())
    }
}

// =========================================================================
// Tests
// =========================================================================
