//! Identity and session types.
//!
//! A signed-in context is described by two values: WHO the account is
//! ([`AccountId`]) and WHICH fencing token it holds ([`SessionToken`]).
//! The pair, cached on the client side, is a [`LocalSession`].

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// A unique identifier for an account, as issued by the identity provider.
///
/// Newtype over the provider's opaque string id. Wrapping it keeps
/// signatures honest — a `fn invalidate(account: AccountId)` cannot be
/// handed a raw token string by mistake.
///
/// `#[serde(transparent)]` serializes this as the plain inner string,
/// so an `AccountId("u-1".into())` is just `"u-1"` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    /// Returns the raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// SessionToken
// ---------------------------------------------------------------------------

/// An opaque, high-entropy fencing token for a login session.
///
/// The Token Authority issues a fresh token on every successful login;
/// the new value atomically supersedes the old one. A token is never
/// revoked explicitly — it dies only by being overwritten.
///
/// The ONLY meaningful comparison is byte-for-byte equality (`==`),
/// which is what reconciliation uses to decide whether this context is
/// still the authoritative holder.
///
/// `Display` is redacted: only the first eight characters are printed,
/// so a full token never lands in a log line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(pub String);

impl SessionToken {
    /// Returns the full token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redacted on purpose: logs see a stable prefix, never the secret.
        let prefix: String = self.0.chars().take(8).collect();
        write!(f, "{prefix}…")
    }
}

impl From<&str> for SessionToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// LocalSession
// ---------------------------------------------------------------------------

/// The client-side snapshot of a signed-in session.
///
/// This is a CACHE, not the authority. It is written once on successful
/// login (with the token just issued), read on every reconciliation, and
/// destroyed on sign-out — voluntary or forced. Between reconciliations
/// it may be arbitrarily stale; the Session Guard exists to detect that.
///
/// Serialized as JSON into the client's persistent local store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalSession {
    /// The account this context signed in as.
    pub account_id: AccountId,
    /// The fencing token this context was issued at login time.
    pub token: SessionToken,
}

impl LocalSession {
    /// Creates a snapshot for a freshly issued token.
    pub fn new(account_id: AccountId, token: SessionToken) -> Self {
        Self { account_id, token }
    }
}

// =========================================================================
// Tests
// =========================================================================
