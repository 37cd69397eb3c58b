//! The content gate: playback operations behind the validity signal.

use std::sync::Arc;
use std::time::Duration;

use seatlock_guard::GuardState;
use seatlock_types::VideoDescriptor;
use tokio::sync::watch;

use crate::{GateError, MediaPlayer};

/// Wraps a media player so every operation is permitted only while the
/// session guard reports `Valid`.
///
/// The gate holds a `watch::Receiver` of guard state and re-reads it on
/// EVERY call — an invalidation that lands mid-session denies the very
/// next operation, with no polling and no callback plumbing. `Unchecked`
/// denies too: a session is not trusted until its first reconciliation
/// confirms it.
pub struct ContentGate<P: MediaPlayer> {
    player: Arc<P>,
    validity: watch::Receiver<GuardState>,
    playing: bool,
    muted: bool,
    fullscreen: bool,
}

impl<P: MediaPlayer> ContentGate<P> {
    /// Creates a gate over a player, fed by a guard's state subscription
    /// (see `GuardHandle::subscribe`).
    pub fn new(player: Arc<P>, validity: watch::Receiver<GuardState>) -> Self {
        Self {
            player,
            validity,
            playing: false,
            muted: false,
            fullscreen: false,
        }
    }

    /// The guard state as of this call.
    pub fn guard_state(&self) -> GuardState {
        *self.validity.borrow()
    }

    /// Selects a video: derives its media id and loads the player.
    ///
    /// # Errors
    /// [`GateError::AccessDenied`] while not `Valid`;
    /// [`GateError::UnplayableSource`] when the descriptor's URL has no
    /// extractable media id.
    pub fn select(&mut self, video: &VideoDescriptor) -> Result<(), GateError> {
        self.ensure_valid()?;
        let media = video
            .media_id()
            .ok_or_else(|| GateError::UnplayableSource(video.source_url.clone()))?;
        tracing::debug!(%media, title = %video.title, "video selected");
        self.player.load(&media);
        self.playing = false;
        Ok(())
    }

    /// Starts or resumes playback.
    pub fn play(&mut self) -> Result<(), GateError> {
        self.ensure_valid()?;
        self.player.play();
        self.playing = true;
        Ok(())
    }

    /// Pauses playback.
    pub fn pause(&mut self) -> Result<(), GateError> {
        self.ensure_valid()?;
        self.player.pause();
        self.playing = false;
        Ok(())
    }

    /// Toggles between play and pause. Returns `true` when now playing.
    pub fn toggle_play(&mut self) -> Result<bool, GateError> {
        if self.playing {
            self.pause()?;
        } else {
            self.play()?;
        }
        Ok(self.playing)
    }

    /// Seeks to a position.
    pub fn seek(&mut self, position: Duration) -> Result<(), GateError> {
        self.ensure_valid()?;
        self.player.seek(position);
        Ok(())
    }

    /// Toggles audio mute. Returns `true` when now muted.
    pub fn toggle_mute(&mut self) -> Result<bool, GateError> {
        self.ensure_valid()?;
        self.muted = !self.muted;
        self.player.set_muted(self.muted);
        Ok(self.muted)
    }

    /// Toggles fullscreen presentation. Returns `true` when fullscreen.
    pub fn toggle_fullscreen(&mut self) -> Result<bool, GateError> {
        self.ensure_valid()?;
        self.fullscreen = !self.fullscreen;
        self.player.set_fullscreen(self.fullscreen);
        Ok(self.fullscreen)
    }

    /// Whether the gate believes playback is running.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    fn ensure_valid(&self) -> Result<(), GateError> {
        let state = self.guard_state();
        if state.allows_playback() {
            Ok(())
        } else {
            tracing::debug!(%state, "playback operation denied");
            Err(GateError::AccessDenied { state })
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use seatlock_types::MediaId;

    use super::*;

    /// Player double that records what the gate lets through.
    #[derive(Default)]
    struct RecordingPlayer {
        plays: AtomicU32,
        pauses: AtomicU32,
        seeks: AtomicU32,
        loaded: Mutex<Option<String>>,
    }

    impl MediaPlayer for RecordingPlayer {
        fn load(&self, media: &MediaId) {
            *self.loaded.lock().unwrap() = Some(media.as_str().to_string());
        }
        fn play(&self) {
            self.plays.fetch_add(1, Ordering::SeqCst);
        }
        fn pause(&self) {
            self.pauses.fetch_add(1, Ordering::SeqCst);
        }
        fn seek(&self, _position: Duration) {
            self.seeks.fetch_add(1, Ordering::SeqCst);
        }
        fn set_muted(&self, _muted: bool) {}
        fn set_fullscreen(&self, _fullscreen: bool) {}
        fn position(&self) -> Duration {
            Duration::ZERO
        }
        fn duration(&self) -> Duration {
            Duration::from_secs(300)
        }
    }

    fn gate_in_state(
        state: GuardState,
    ) -> (ContentGate<RecordingPlayer>, Arc<RecordingPlayer>, watch::Sender<GuardState>)
    {
        let player = Arc::new(RecordingPlayer::default());
        let (tx, rx) = watch::channel(state);
        (ContentGate::new(Arc::clone(&player), rx), player, tx)
    }

    fn video(url: &str) -> VideoDescriptor {
        VideoDescriptor {
            title: "Lesson".into(),
            source_url: url.into(),
        }
    }

    // =====================================================================
    // Denial in non-Valid states
    // =====================================================================

    #[test]
    fn test_all_operations_denied_while_unchecked() {
        let (mut gate, player, _tx) = gate_in_state(GuardState::Unchecked);

        assert!(matches!(gate.play(), Err(GateError::AccessDenied { .. })));
        assert!(matches!(gate.pause(), Err(GateError::AccessDenied { .. })));
        assert!(matches!(
            gate.seek(Duration::from_secs(10)),
            Err(GateError::AccessDenied { .. })
        ));
        assert!(matches!(gate.toggle_mute(), Err(GateError::AccessDenied { .. })));
        assert!(matches!(
            gate.toggle_fullscreen(),
            Err(GateError::AccessDenied { .. })
        ));
        assert!(matches!(
            gate.select(&video("https://youtu.be/dQw4w9WgXcQ")),
            Err(GateError::AccessDenied { .. })
        ));

        assert_eq!(player.plays.load(Ordering::SeqCst), 0);
        assert_eq!(player.pauses.load(Ordering::SeqCst), 0);
        assert!(player.loaded.lock().unwrap().is_none());
    }

    #[test]
    fn test_all_operations_denied_while_invalidated() {
        let (mut gate, player, _tx) = gate_in_state(GuardState::Invalidated);

        assert!(matches!(gate.play(), Err(GateError::AccessDenied { .. })));
        assert!(matches!(
            gate.toggle_play(),
            Err(GateError::AccessDenied { .. })
        ));
        assert_eq!(player.plays.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_operations_permitted_while_valid() {
        let (mut gate, player, _tx) = gate_in_state(GuardState::Valid);

        gate.play().unwrap();
        gate.seek(Duration::from_secs(42)).unwrap();
        gate.pause().unwrap();

        assert_eq!(player.plays.load(Ordering::SeqCst), 1);
        assert_eq!(player.seeks.load(Ordering::SeqCst), 1);
        assert_eq!(player.pauses.load(Ordering::SeqCst), 1);
    }

    // =====================================================================
    // Invalidation mid-session
    // =====================================================================

    #[test]
    fn test_invalidation_denies_the_next_operation() {
        let (mut gate, player, tx) = gate_in_state(GuardState::Valid);
        gate.play().unwrap();

        // The guard flips while the video is running.
        tx.send(GuardState::Invalidated).unwrap();

        assert!(matches!(gate.pause(), Err(GateError::AccessDenied { .. })));
        assert_eq!(
            player.pauses.load(Ordering::SeqCst),
            0,
            "nothing reaches the player after invalidation"
        );
    }

    // =====================================================================
    // Selection and toggles
    // =====================================================================

    #[test]
    fn test_select_loads_derived_media_id() {
        let (mut gate, player, _tx) = gate_in_state(GuardState::Valid);

        gate.select(&video("https://youtu.be/dQw4w9WgXcQ")).unwrap();

        assert_eq!(
            player.loaded.lock().unwrap().as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_select_malformed_source_is_unplayable() {
        let (mut gate, _player, _tx) = gate_in_state(GuardState::Valid);

        let result = gate.select(&video("not a url"));

        assert!(matches!(result, Err(GateError::UnplayableSource(_))));
    }

    #[test]
    fn test_toggle_play_alternates() {
        let (mut gate, _player, _tx) = gate_in_state(GuardState::Valid);

        assert!(gate.toggle_play().unwrap(), "first toggle starts playback");
        assert!(!gate.toggle_play().unwrap(), "second toggle pauses");
        assert!(gate.toggle_play().unwrap());
    }

    #[test]
    fn test_toggle_mute_alternates() {
        let (mut gate, _player, _tx) = gate_in_state(GuardState::Valid);

        assert!(gate.toggle_mute().unwrap());
        assert!(!gate.toggle_mute().unwrap());
    }

    #[test]
    fn test_select_resets_playing_flag() {
        let (mut gate, _player, _tx) = gate_in_state(GuardState::Valid);
        gate.play().unwrap();

        gate.select(&video("https://youtu.be/dQw4w9WgXcQ")).unwrap();

        assert!(!gate.is_playing(), "a newly selected video starts paused");
    }
}
