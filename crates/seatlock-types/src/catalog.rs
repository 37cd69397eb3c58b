//! Catalog types: course and video metadata.
//!
//! These mirror what the external content catalog returns. Seatlock
//! consumes them read-only — course CRUD lives elsewhere.

use serde::{Deserialize, Serialize};

use crate::media::{media_id, MediaId};

/// One playable video inside a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDescriptor {
    /// Human-readable title shown in the playlist.
    pub title: String,
    /// Full source URL as stored in the catalog.
    pub source_url: String,
}

impl VideoDescriptor {
    /// The derived media id, if the source URL is well-formed.
    ///
    /// Recomputed on every call — the id is intentionally not persisted.
    pub fn media_id(&self) -> Option<MediaId> {
        media_id(&self.source_url)
    }
}

/// A course as returned by the catalog: metadata plus its video list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub description: String,
    /// Videos in playlist order. May be empty.
    #[serde(default)]
    pub videos: Vec<VideoDescriptor>,
}
