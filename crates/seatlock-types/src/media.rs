//! Media identifier extraction.
//!
//! The catalog stores full video source URLs; the player and thumbnail
//! pipeline want the bare 11-character media id. [`media_id`] derives it,
//! tolerating every URL shape the hosting service hands out. The id is
//! never persisted — it is recomputed from the source URL on demand.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Length of a media identifier, in characters.
const MEDIA_ID_LEN: usize = 11;

/// An 11-character video identifier derived from a source URL.
///
/// Construction goes through [`media_id`] only, so holding a `MediaId`
/// means the value already passed shape validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaId(String);

impl MediaId {
    /// Returns the raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The thumbnail image URL for this video.
    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/hqdefault.jpg", self.0)
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extracts the 11-character media identifier from a video source URL.
///
/// Accepted shapes:
/// - canonical: `https://www.youtube.com/watch?v=ID` (extra query
///   parameters are fine)
/// - shortened: `https://youtu.be/ID`
/// - embed and legacy paths: `/embed/ID`, `/v/ID`, `/e/ID`, `/shorts/ID`
/// - any of the above without a scheme (`youtu.be/ID`)
///
/// Anything else — malformed input, empty string, a URL for some other
/// host, an id of the wrong shape — yields `None`. This function never
/// panics; callers treat an absent id as "no playable video".
pub fn media_id(source: &str) -> Option<MediaId> {
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Catalog entries are occasionally stored scheme-less; retry with a
    // synthetic scheme before giving up on the parse.
    let parsed = Url::parse(trimmed)
        .or_else(|_| Url::parse(&format!("https://{trimmed}")))
        .ok()?;

    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);

    let candidate = if host == "youtu.be" {
        // Shortened form: the id is the first path segment.
        parsed.path_segments()?.next().map(str::to_string)
    } else if host == "youtube.com" || host.ends_with(".youtube.com") {
        // Canonical form first: ?v=ID wins wherever it appears.
        let from_query = parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned());

        from_query.or_else(|| {
            // Embed-style paths: /embed/ID, /v/ID, /e/ID, /shorts/ID.
            let mut segments = parsed.path_segments()?;
            match segments.next()? {
                "embed" | "v" | "e" | "shorts" => {
                    segments.next().map(str::to_string)
                }
                _ => None,
            }
        })
    } else {
        None
    };

    candidate.as_deref().and_then(validate)
}

/// Validates a candidate id: the leading run of id-alphabet characters
/// must be at least 11 long, and the id is exactly those first 11.
///
/// Trailing garbage after a full-length id is tolerated (the upstream
/// service does the same), but a short run is rejected outright.
fn validate(candidate: &str) -> Option<MediaId> {
    let id: String = candidate
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .take(MEDIA_ID_LEN)
        .collect();

    if id.len() == MEDIA_ID_LEN {
        Some(MediaId(id))
    } else {
        None
    }
}

// =========================================================================
// Tests
// =========================================================================
