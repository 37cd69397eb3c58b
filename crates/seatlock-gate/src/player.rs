//! The media player seam.
//!
//! Seatlock does not render video — the embedding application brings a
//! player (an iframe player, a native decoder, a test double) and
//! implements [`MediaPlayer`] over it. The gate drives the player only
//! through this trait, never directly, so denial is structural: there
//! is no ungated path to playback.

use std::time::Duration;

use seatlock_types::MediaId;

/// The embedder's media player surface.
///
/// Commands are fire-and-forget, matching real player chrome: a play
/// press does not wait for frames. State queries (`position`,
/// `duration`) return the player's latest known values.
///
/// Methods take `&self`; implementations use interior mutability the
/// same way a handle to an out-of-process player would.
pub trait MediaPlayer: Send + Sync + 'static {
    /// Loads a video by media id, replacing the current one.
    fn load(&self, media: &MediaId);

    /// Starts or resumes playback.
    fn play(&self);

    /// Pauses playback, keeping the position.
    fn pause(&self);

    /// Jumps to a position.
    fn seek(&self, position: Duration);

    /// Mutes or unmutes the audio.
    fn set_muted(&self, muted: bool);

    /// Enters or leaves fullscreen presentation.
    fn set_fullscreen(&self, fullscreen: bool);

    /// Current playback position.
    fn position(&self) -> Duration;

    /// Total duration of the loaded video. Zero until known.
    fn duration(&self) -> Duration;
}
