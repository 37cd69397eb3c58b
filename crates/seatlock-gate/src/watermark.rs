//! Identity watermark for the media surface.
//!
//! The watermark exists for traceability: a screen recording of the
//! player carries the viewer's identity in frame. It deliberately moves,
//! so it cannot be cropped out once and forgotten. It is cosmetic — the
//! overlay deters casual redistribution and nothing more.

use std::time::Duration;

/// A corner of the media surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

/// The identity overlay rendered above the media surface.
///
/// The renderer asks [`corner_at`](Self::corner_at) where to draw on
/// each frame; the label cycles through the four corners once per
/// [`period`](Self::period).
#[derive(Debug, Clone)]
pub struct Watermark {
    identity: String,
    period: Duration,
}

/// Default time for one full trip around the surface.
const DEFAULT_PERIOD: Duration = Duration::from_secs(40);

impl Watermark {
    /// Creates a watermark showing the given identity (typically the
    /// account's email address).
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            period: DEFAULT_PERIOD,
        }
    }

    /// Overrides the cycle period.
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// The text to render.
    pub fn label(&self) -> &str {
        &self.identity
    }

    /// One full cycle around the four corners.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Where the overlay sits at `elapsed` time since playback start.
    ///
    /// Quarter of the period per corner, clockwise from top-left,
    /// wrapping forever.
    pub fn corner_at(&self, elapsed: Duration) -> Corner {
        let cycle = self.period.as_secs_f64();
        if cycle <= 0.0 {
            return Corner::TopLeft;
        }
        let phase = (elapsed.as_secs_f64() % cycle) / cycle;
        match (phase * 4.0) as u32 {
            0 => Corner::TopLeft,
            1 => Corner::TopRight,
            2 => Corner::BottomRight,
            _ => Corner::BottomLeft,
        }
    }
}
