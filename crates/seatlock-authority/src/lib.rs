//! Token authority for Seatlock.
//!
//! This crate owns the server-side half of single-seat enforcement:
//!
//! 1. **Credential verification** — delegated to the identity provider
//!    behind the [`CredentialGateway`] trait
//! 2. **Token issuance** — [`TokenAuthority`] mints a fresh fencing token
//!    on every successful login and persists it as the account's sole
//!    authoritative value
//! 3. **Token lookup** — the read path reconciliation uses to ask "who
//!    holds the seat right now?"
//!
//! # How it fits in the stack
//!
//! ```text
//! Facade (above)  ← runs sign-in flows: gateway, then authority
//!     ↕
//! Authority layer (this crate)  ← issues and fetches fencing tokens
//!     ↕
//! Document store (below)  ← durable storage, behind the DocumentStore trait
//! ```

#![allow(async_fn_in_trait)]

mod authority;
mod error;
mod gateway;
mod store;

pub use authority::TokenAuthority;
pub use error::{AuthError, StoreError};
pub use gateway::{CredentialGateway, FederatedProvider};
pub use store::{DocumentStore, MemoryStore};
