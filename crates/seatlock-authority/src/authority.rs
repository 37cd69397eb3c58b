//! The token authority: issues and looks up fencing tokens.
//!
//! Single-seat enforcement hinges on one rule: every successful login
//! mints a fresh token that unconditionally replaces the previous one.
//! Whoever holds the latest token holds the seat; everyone else finds
//! out at their next reconciliation.
//!
//! # Concurrency note
//!
//! Two contexts logging into the same account race only here, at
//! issuance time. The store's last-write-wins semantics resolve the
//! race unambiguously — no locking, no retry, no merge. Losing the
//! race costs the loser a forced re-login, never data corruption, so
//! nothing stronger is warranted.

use rand::Rng;
use seatlock_types::{AccountId, SessionToken};

use crate::{DocumentStore, StoreError};

/// Issues and fetches the authoritative session token per account.
///
/// Generic over the [`DocumentStore`] so production and tests differ
/// only in what they plug in.
///
/// ## Lifecycle of a token
///
/// ```text
/// login succeeds ──→ issue() ──→ store.put_token()   (replaces prior)
///                                      │
/// reconciliation ──→ fetch() ──→ store.fetch_token() (read-only)
/// ```
///
/// There is no revoke operation. A token is invalidated only by the
/// next issuance overwriting it.
#[derive(Debug, Clone)]
pub struct TokenAuthority<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> TokenAuthority<S> {
    /// Creates an authority over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Issues a fresh token for an account and persists it as the sole
    /// authoritative value, replacing whatever was there.
    ///
    /// This is the ONLY path that mutates the authoritative token.
    ///
    /// # Errors
    /// Propagates the store error if persistence fails; in that case no
    /// token was issued and the caller's login flow should fail.
    pub async fn issue(
        &self,
        account: &AccountId,
    ) -> Result<SessionToken, StoreError> {
        let token = generate_token();
        self.store.put_token(account, &token).await?;
        tracing::info!(%account, %token, "session token issued");
        Ok(token)
    }

    /// Reads the current authoritative token for an account.
    ///
    /// Used only by reconciliation. `Ok(None)` means the store has no
    /// token on record — callers treat that as "no opinion", not as a
    /// mismatch.
    pub async fn fetch(
        &self,
        account: &AccountId,
    ) -> Result<Option<SessionToken>, StoreError> {
        self.store.fetch_token(account).await
    }

    /// Borrows the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Generates a random 32-character hex string (128 bits of entropy).
///
/// 128 bits is enough that guessing a live token is computationally
/// infeasible; the token's security comes entirely from this entropy,
/// not from any structure.
fn generate_token() -> SessionToken {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    SessionToken(bytes.iter().map(|b| format!("{b:02x}")).collect())
}

// =========================================================================
// Tests
// =========================================================================
