//! Guard actor: an isolated Tokio task that owns one session guard.
//!
//! The guard runs in its own task, communicating with the outside world
//! through an mpsc command channel and broadcasting state through a
//! `watch` channel. No shared mutable state, just message passing — a
//! stalled reconciliation stalls only this task, never the UI thread
//! that sent the trigger.
//!
//! Teardown is deterministic: the actor stops on
//! [`GuardHandle::shutdown`] or when the handle is dropped. An
//! invalidated guard keeps serving state queries (all of them now
//! answer `Invalidated`) so the rest of the teardown can observe it.

use seatlock_authority::{CredentialGateway, DocumentStore};
use seatlock_timer::Ticker;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::{
    GuardError, GuardState, LocalStore, ReconcileTrigger, SessionGuard,
    Visibility,
};

/// Command channel size. Triggers are tiny and bursty (a focus flurry),
/// so a small bound with backpressure is plenty.
const COMMAND_CHANNEL_SIZE: usize = 16;

/// Commands sent to a guard actor through its channel.
enum GuardCommand {
    /// Run a reconciliation and report the outcome back.
    Check {
        trigger: ReconcileTrigger,
        reply: oneshot::Sender<Result<GuardState, GuardError>>,
    },

    /// Run a reconciliation, fire-and-forget. The UI event wiring uses
    /// this: a focus callback must not wait on a network round-trip.
    Notify { trigger: ReconcileTrigger },

    /// Record a visibility change. Becoming visible prompts a check
    /// (a deferred mismatch may be waiting).
    SetVisibility { visibility: Visibility },

    /// Stop the actor.
    Shutdown,
}

/// Handle to a running guard actor.
///
/// Subscribing via [`subscribe`](Self::subscribe) is the explicit
/// registration the rest of the system uses to observe validity; the
/// returned receiver is its own disposer — drop it and the subscription
/// is gone. Dropping the handle itself tears the whole actor down.
pub struct GuardHandle {
    commands: mpsc::Sender<GuardCommand>,
    state: watch::Receiver<GuardState>,
    task: JoinHandle<()>,
}

impl GuardHandle {
    /// Runs a reconciliation and waits for its outcome.
    ///
    /// # Errors
    /// - [`GuardError::Superseded`] — this very check invalidated the
    ///   session
    /// - [`GuardError::Detached`] — the actor already stopped
    pub async fn check(
        &self,
        trigger: ReconcileTrigger,
    ) -> Result<GuardState, GuardError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(GuardCommand::Check {
                trigger,
                reply: reply_tx,
            })
            .await
            .map_err(|_| GuardError::Detached)?;
        reply_rx.await.map_err(|_| GuardError::Detached)?
    }

    /// Requests a reconciliation without waiting for the result.
    ///
    /// The outcome lands on the state channel; callers that care about
    /// it subscribe there or use [`check`](Self::check).
    pub async fn notify(
        &self,
        trigger: ReconcileTrigger,
    ) -> Result<(), GuardError> {
        self.commands
            .send(GuardCommand::Notify { trigger })
            .await
            .map_err(|_| GuardError::Detached)
    }

    /// Reports a visibility change for the owning context.
    pub async fn set_visibility(
        &self,
        visibility: Visibility,
    ) -> Result<(), GuardError> {
        self.commands
            .send(GuardCommand::SetVisibility { visibility })
            .await
            .map_err(|_| GuardError::Detached)
    }

    /// The current guard state.
    pub fn state(&self) -> GuardState {
        *self.state.borrow()
    }

    /// Registers an observer of guard state changes.
    ///
    /// The receiver keeps reporting the final state after the actor
    /// stops, so a gate holding one can still deny playback for an
    /// invalidated session.
    pub fn subscribe(&self) -> watch::Receiver<GuardState> {
        self.state.clone()
    }

    /// Stops the actor and waits for it to finish.
    pub async fn shutdown(mut self) {
        let _ = self.commands.send(GuardCommand::Shutdown).await;
        let _ = (&mut self.task).await;
    }
}

impl Drop for GuardHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl<S, C, L> SessionGuard<S, C, L>
where
    S: DocumentStore,
    C: CredentialGateway,
    L: LocalStore,
{
    /// Spawns this guard as an actor task and returns its handle.
    ///
    /// The actor immediately runs the mount check, then serves triggers
    /// until shut down. The optional periodic tick from the guard's
    /// config runs inside the same loop.
    pub fn spawn(self) -> GuardHandle {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
        let (state_tx, state_rx) = watch::channel(GuardState::Unchecked);
        let ticker = Ticker::from_period(self.config().periodic);

        let task = tokio::spawn(run(self, command_rx, state_tx, ticker));

        GuardHandle {
            commands: command_tx,
            state: state_rx,
            task,
        }
    }
}

/// The actor loop: mount check, then commands and ticks until done.
async fn run<S, C, L>(
    mut guard: SessionGuard<S, C, L>,
    mut commands: mpsc::Receiver<GuardCommand>,
    state_tx: watch::Sender<GuardState>,
    mut ticker: Ticker,
) where
    S: DocumentStore,
    C: CredentialGateway,
    L: LocalStore,
{
    tracing::info!(account = %guard.account(), "session guard started");

    // Initial reconciliation on mount, before serving any trigger.
    let _ = guard.reconcile(ReconcileTrigger::Mount).await;
    publish(&state_tx, guard.state());

    loop {
        // A torn-down session has nothing left to poll for.
        if guard.state().is_terminal() {
            ticker.pause();
        }

        tokio::select! {
            cmd = commands.recv() => match cmd {
                None => break,
                Some(GuardCommand::Check { trigger, reply }) => {
                    let result = guard.reconcile(trigger).await;
                    publish(&state_tx, guard.state());
                    let _ = reply.send(result);
                }
                Some(GuardCommand::Notify { trigger }) => {
                    let _ = guard.reconcile(trigger).await;
                    publish(&state_tx, guard.state());
                }
                Some(GuardCommand::SetVisibility { visibility }) => {
                    if guard.set_visibility(visibility) {
                        let _ = guard
                            .reconcile(ReconcileTrigger::VisibilityChanged)
                            .await;
                        publish(&state_tx, guard.state());
                    }
                }
                Some(GuardCommand::Shutdown) => break,
            },
            () = ticker.wait() => {
                let _ = guard.reconcile(ReconcileTrigger::Periodic).await;
                publish(&state_tx, guard.state());
            }
        }
    }

    tracing::info!(
        account = %guard.account(),
        state = %guard.state(),
        "session guard stopped"
    );
}

/// Broadcasts a state value if it differs from the last broadcast.
fn publish(state_tx: &watch::Sender<GuardState>, state: GuardState) {
    state_tx.send_if_modified(|current| {
        if *current == state {
            false
        } else {
            *current = state;
            true
        }
    });
}
