//! Cancellable periodic tasks for Seatlock.
//!
//! Two consumers, one mechanism:
//!
//! - the Session Guard's optional defense-in-depth timer (periodic
//!   reconciliation layered over the event-driven triggers)
//! - the media player's progress ticker (position/duration sampling)
//!
//! Both need the same guarantees: the timer is bound to an owner's
//! lifetime, stops deterministically on teardown, and never leaks a
//! background interval.
//!
//! # Disabled mode
//!
//! When constructed without an interval, [`Ticker::wait`] pends forever.
//! This is the correct behavior for owners that are purely event-driven:
//! the ticker branch of their `tokio::select!` simply never fires.
//!
//! # Integration
//!
//! The ticker is designed to sit inside an actor's `tokio::select!` loop:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(cmd) = cmd_rx.recv() => { /* handle commands */ }
//!         () = ticker.wait() => { /* periodic work */ }
//!     }
//! }
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::debug;

// ---------------------------------------------------------------------------
// Ticker
// ---------------------------------------------------------------------------

/// A repeating deadline for use inside a `select!` loop.
///
/// Unlike `tokio::time::interval`, a `Ticker` can be disabled (pend
/// forever) and paused/resumed without rebuilding the owning loop.
#[derive(Debug)]
pub struct Ticker {
    period: Option<Duration>,
    next: Option<Instant>,
    paused: bool,
    fired: u64,
}

impl Ticker {
    /// Creates a ticker that fires every `period`.
    pub fn new(period: Duration) -> Self {
        Self {
            period: Some(period),
            next: Some(Instant::now() + period),
            paused: false,
            fired: 0,
        }
    }

    /// Creates a disabled ticker: [`wait`](Self::wait) pends forever.
    pub fn disabled() -> Self {
        Self {
            period: None,
            next: None,
            paused: false,
            fired: 0,
        }
    }

    /// Creates a ticker from an optional period. `None` means disabled.
    pub fn from_period(period: Option<Duration>) -> Self {
        match period {
            Some(p) => Self::new(p),
            None => Self::disabled(),
        }
    }

    /// Waits until the next tick is due.
    ///
    /// Disabled or paused tickers pend forever — the future never
    /// resolves on its own, but `tokio::select!` still processes its
    /// other branches.
    pub async fn wait(&mut self) {
        let (next, period) = match (self.next, self.period) {
            (Some(next), Some(period)) if !self.paused => (next, period),
            _ => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        };

        time::sleep_until(next).await;
        self.fired += 1;
        // Schedule from now, not from the missed deadline: a slow tick
        // must not cause a burst of catch-up ticks.
        self.next = Some(Instant::now() + period);
    }

    /// Pauses the ticker. Idempotent.
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            debug!(fired = self.fired, "ticker paused");
        }
    }

    /// Resumes after a pause, rescheduling from now.
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            if let Some(period) = self.period {
                self.next = Some(Instant::now() + period);
            }
            debug!(fired = self.fired, "ticker resumed");
        }
    }

    /// Whether the ticker is currently paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether this ticker can ever fire.
    pub fn is_enabled(&self) -> bool {
        self.period.is_some()
    }

    /// Number of ticks fired so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }
}

// ---------------------------------------------------------------------------
// PeriodicTask
// ---------------------------------------------------------------------------

/// A background task running a job at a fixed period, cancelled when the
/// handle is dropped.
///
/// The abort-on-drop tie means the task's lifetime is exactly its
/// owner's lifetime: store the handle in the component that needs the
/// ticking, and teardown is automatic.
#[derive(Debug)]
pub struct PeriodicTask {
    handle: JoinHandle<()>,
}

impl PeriodicTask {
    /// Spawns a task invoking `job` every `period`.
    ///
    /// The first invocation happens one full period after the spawn,
    /// not immediately.
    pub fn spawn<F, Fut>(period: Duration, mut job: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = Ticker::new(period);
            loop {
                ticker.wait().await;
                job().await;
            }
        });
        Self { handle }
    }

    /// Stops the task immediately. Equivalent to dropping the handle,
    /// spelled out for call sites where intent matters.
    pub fn cancel(self) {
        self.handle.abort();
    }

    /// Whether the underlying task has finished (only via cancellation).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// =========================================================================
// Tests
// =========================================================================
