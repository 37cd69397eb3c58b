//! Client-local persistent storage and the cached session living in it.
//!
//! Browsers give us a string-keyed persistent store; other hosts have
//! equivalents. The [`LocalStore`] trait abstracts it down to the three
//! operations Seatlock needs, and [`SessionCache`] layers the JSON
//! encoding of the cached [`LocalSession`] on top.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use seatlock_types::LocalSession;

/// Storage key under which the cached session is persisted.
pub const SESSION_KEY: &str = "seatlock.session";

// ---------------------------------------------------------------------------
// LocalStore
// ---------------------------------------------------------------------------

/// Client-persistent key/value storage.
///
/// Synchronous on purpose: the real backing stores (browser local
/// storage, a settings file already in memory) answer without I/O
/// latency worth modeling. Implementations must be cheap to clone and
/// share state between clones, the way two handles to the same browser
/// storage do.
pub trait LocalStore: Clone + Send + Sync + 'static {
    /// Reads a value, if present.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Writes a value, overwriting any previous one.
    fn set_item(&self, key: &str, value: &str);

    /// Removes a value. Removing an absent key is a no-op.
    fn remove_item(&self, key: &str);
}

/// In-process [`LocalStore`] backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryLocalStore {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryLocalStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(key);
    }
}

// ---------------------------------------------------------------------------
// SessionCache
// ---------------------------------------------------------------------------

/// The cached [`LocalSession`], JSON-encoded under [`SESSION_KEY`].
///
/// This cache is the client's ONLY copy of its fencing token. It is a
/// snapshot, not the authority — it may be arbitrarily stale between
/// reconciliations, which is exactly what the guard exists to detect.
#[derive(Debug, Clone)]
pub struct SessionCache<L: LocalStore> {
    store: L,
}

impl<L: LocalStore> SessionCache<L> {
    pub fn new(store: L) -> Self {
        Self { store }
    }

    /// Loads the cached session, if one exists and parses.
    ///
    /// A corrupt cache entry is treated as absent (and logged) — the
    /// user simply appears signed out, which is recoverable.
    pub fn load(&self) -> Option<LocalSession> {
        let raw = self.store.get_item(SESSION_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                tracing::warn!(error = %err, "cached session unreadable, treating as absent");
                None
            }
        }
    }

    /// Persists a session snapshot, replacing any previous one.
    pub fn save(&self, session: &LocalSession) {
        match serde_json::to_string(session) {
            Ok(raw) => self.store.set_item(SESSION_KEY, &raw),
            Err(err) => {
                // Serializing LocalSession cannot realistically fail,
                // but a cache write is never worth a panic.
                tracing::error!(error = %err, "failed to encode session cache");
            }
        }
    }

    /// Destroys the cached session.
    pub fn clear(&self) {
        self.store.remove_item(SESSION_KEY);
    }
}

// =========================================================================
// Tests
// =========================================================================
