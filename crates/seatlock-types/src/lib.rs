//! Shared types for Seatlock.
//!
//! This crate defines the data that every other layer agrees on:
//!
//! - **Identity** ([`AccountId`], [`SessionToken`], [`LocalSession`]) —
//!   who is signed in, and which fencing token this context holds.
//! - **Catalog** ([`Course`], [`VideoDescriptor`]) — course metadata
//!   consumed from the external content catalog, never owned here.
//! - **Media** ([`MediaId`], [`media_id`]) — the derived identifier
//!   parsed out of a video's source URL.
//!
//! # Architecture
//!
//! The types layer sits below everything else. It knows nothing about
//! storage, authentication, or playback — it only defines the vocabulary
//! those layers speak.
//!
//! ```text
//! Authority / Guard / Gate (above)  ← operate on these types
//!     ↕
//! Types layer (this crate)
//! ```

mod catalog;
mod media;
mod session;

pub use catalog::{Course, VideoDescriptor};
pub use media::{media_id, MediaId};
pub use session::{AccountId, LocalSession, SessionToken};
