//! Content access gate for Seatlock.
//!
//! The gate is where the Session Guard's verdict becomes enforcement:
//! every playback operation on protected media goes through
//! [`ContentGate`], which permits it only while the guard reports
//! `Valid`. Around that core sit the cosmetic layers the product wants
//! on a protected surface:
//!
//! - [`Watermark`] — a non-removable identity overlay cycling across
//!   the media surface (traceability, not protection)
//! - [`respond`] — best-effort deterrents for context-menu, copy, and
//!   capture-key events
//! - [`ProgressTicker`] — position/duration sampling bound to the
//!   player's lifetime
//!
//! # On the deterrents
//!
//! The deterrents are user-experience friction, full stop. Anything
//! running outside this client — another device, a camera, a modified
//! browser — bypasses them trivially. The enforcement boundary of
//! Seatlock is the session guard; nothing in this crate upgrades the
//! deterrents beyond that.

mod deterrent;
mod error;
mod gate;
mod player;
mod progress;
mod watermark;

pub use deterrent::{respond, DeterrentAction, SurfaceEvent};
pub use error::GateError;
pub use gate::ContentGate;
pub use player::MediaPlayer;
pub use progress::{format_timestamp, Progress, ProgressTicker};
pub use watermark::{Corner, Watermark};
