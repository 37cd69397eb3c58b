//! Session reconciliation guard for Seatlock.
//!
//! This crate is the client-resident half of single-seat enforcement.
//! It owns the question "is this context still the authoritative holder
//! of its account's seat?" and answers it by RECONCILING: comparing the
//! locally cached fencing token against the Token Authority's current
//! value, byte for byte, on discrete triggers.
//!
//! 1. **State machine** — [`GuardState`]: `Unchecked` → `Valid` |
//!    `Invalidated`, with `Invalidated` terminal
//! 2. **Reconciliation** — [`SessionGuard`], the core check logic
//! 3. **Actor + handle** — [`SessionGuard::spawn`] / [`GuardHandle`],
//!    the event-driven runtime wrapper with deterministic teardown
//!
//! # How it fits in the stack
//!
//! ```text
//! Content Access Gate (above)  ← watches the guard's validity signal
//!     ↕
//! Guard layer (this crate)  ← detects superseded sessions, tears down
//!     ↕
//! Authority layer (below)  ← provides the authoritative token read path
//! ```
//!
//! Reconciliation is event-driven (mount, focus regained, visibility
//! becoming visible), not polled — read load on the authority is bounded
//! to one fetch per trigger. A supplementary periodic tick can be
//! enabled for defense in depth; correctness never depends on it.

mod actor;
mod config;
mod error;
mod guard;
mod local;
mod state;

pub use actor::GuardHandle;
pub use config::{FailurePolicy, GuardConfig};
pub use error::GuardError;
pub use guard::SessionGuard;
pub use local::{LocalStore, MemoryLocalStore, SessionCache, SESSION_KEY};
pub use state::{GuardState, ReconcileTrigger, Visibility};
