//! Playback progress sampling.
//!
//! The progress bar needs position/duration about once a second. The
//! ticker owns that sampling as a cancellable periodic task bound to
//! its own lifetime: drop the `ProgressTicker` and the sampling stops,
//! deterministically, with nothing left running.

use std::sync::Arc;
use std::time::Duration;

use seatlock_timer::PeriodicTask;
use tokio::sync::watch;

use crate::MediaPlayer;

/// Default sampling interval.
const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// A progress snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    /// Current playback position.
    pub position: Duration,
    /// Total duration of the loaded video. Zero until the player knows.
    pub duration: Duration,
}

impl Progress {
    /// Completed fraction in `0.0..=1.0`. Zero while duration is unknown.
    pub fn fraction(&self) -> f64 {
        if self.duration.is_zero() {
            0.0
        } else {
            (self.position.as_secs_f64() / self.duration.as_secs_f64())
                .clamp(0.0, 1.0)
        }
    }
}

/// Samples a player's progress on a fixed interval into a watch channel.
///
/// Holds the sampling task; dropping the ticker cancels it.
#[derive(Debug)]
pub struct ProgressTicker {
    _task: PeriodicTask,
    progress: watch::Receiver<Progress>,
}

impl ProgressTicker {
    /// Starts sampling `player` once per second.
    pub fn spawn<P: MediaPlayer>(player: Arc<P>) -> Self {
        Self::spawn_with_interval(player, SAMPLE_INTERVAL)
    }

    /// Starts sampling at a custom interval.
    pub fn spawn_with_interval<P: MediaPlayer>(
        player: Arc<P>,
        interval: Duration,
    ) -> Self {
        let (tx, rx) = watch::channel(Progress::default());
        let tx = Arc::new(tx);

        let task = PeriodicTask::spawn(interval, move || {
            let player = Arc::clone(&player);
            let tx = Arc::clone(&tx);
            async move {
                let _ = tx.send(Progress {
                    position: player.position(),
                    duration: player.duration(),
                });
            }
        });

        Self {
            _task: task,
            progress: rx,
        }
    }

    /// The most recent sample.
    pub fn latest(&self) -> Progress {
        *self.progress.borrow()
    }

    /// Registers an observer of progress samples.
    pub fn subscribe(&self) -> watch::Receiver<Progress> {
        self.progress.clone()
    }
}

/// Formats a duration as `M:SS` for the progress readout.
pub fn format_timestamp(value: Duration) -> String {
    let total = value.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_zero() {
        assert_eq!(format_timestamp(Duration::ZERO), "0:00");
    }

    #[test]
    fn test_format_timestamp_pads_seconds() {
        assert_eq!(format_timestamp(Duration::from_secs(65)), "1:05");
        assert_eq!(format_timestamp(Duration::from_secs(600)), "10:00");
    }

    #[test]
    fn test_format_timestamp_long_video() {
        // Minutes keep counting past the hour, matching the player UI.
        assert_eq!(format_timestamp(Duration::from_secs(3725)), "62:05");
    }

    #[test]
    fn test_fraction_zero_duration_is_zero() {
        let p = Progress::default();
        assert_eq!(p.fraction(), 0.0);
    }

    #[test]
    fn test_fraction_halfway() {
        let p = Progress {
            position: Duration::from_secs(30),
            duration: Duration::from_secs(60),
        };
        assert!((p.fraction() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fraction_clamped_past_end() {
        // The player can momentarily report position > duration while
        // switching videos.
        let p = Progress {
            position: Duration::from_secs(90),
            duration: Duration::from_secs(60),
        };
        assert_eq!(p.fraction(), 1.0);
    }
}
