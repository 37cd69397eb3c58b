//! # Seatlock
//!
//! Single-active-session enforcement for platforms that gate protected
//! video content: one account, one seat, at most one signed-in client
//! context at a time.
//!
//! Seatlock provides the fencing-token machinery — issuance, cached
//! snapshots, event-driven reconciliation, forced teardown — and keeps
//! everything environment-specific behind traits the embedder
//! implements: the identity provider, the document store, local
//! storage, the content catalog, and the media player.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use seatlock::prelude::*;
//!
//! // Implement CredentialGateway, DocumentStore, and LocalStore for
//! // your providers, then:
//! // let context = SessionContext::new(gateway, store, local);
//! // let session = context.sign_in("me@example.com", "hunter2").await?;
//! // let guard = context.spawn_guard(GuardConfig::default())?;
//! // let mut gate = ContentGate::new(player, guard.subscribe());
//! // gate.play()?;
//! ```

#![allow(async_fn_in_trait)]

mod catalog;
mod context;
mod error;

pub use catalog::{CatalogError, CourseCatalog};
pub use context::SessionContext;
pub use error::SeatlockError;

/// Everything an embedder typically needs, in one import.
pub mod prelude {
    pub use crate::{CatalogError, CourseCatalog, SeatlockError, SessionContext};
    pub use seatlock_authority::{
        AuthError, CredentialGateway, DocumentStore, FederatedProvider,
        MemoryStore, StoreError, TokenAuthority,
    };
    pub use seatlock_gate::{
        format_timestamp, respond, ContentGate, Corner, DeterrentAction,
        GateError, MediaPlayer, Progress, ProgressTicker, SurfaceEvent,
        Watermark,
    };
    pub use seatlock_guard::{
        FailurePolicy, GuardConfig, GuardError, GuardHandle, GuardState,
        LocalStore, MemoryLocalStore, ReconcileTrigger, SessionGuard,
        Visibility,
    };
    pub use seatlock_types::{
        media_id, AccountId, Course, LocalSession, MediaId, SessionToken,
        VideoDescriptor,
    };
}
