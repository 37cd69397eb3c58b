//! Best-effort exfiltration deterrents for the media surface.
//!
//! These are friction, not protection: every one of them is bypassable
//! by anything outside this client's control (another device, a camera,
//! devtools). They exist to make casual copying inconvenient enough to
//! not be worth it, and they must never be mistaken for — or grown
//! into — a security boundary. The real enforcement lives in the
//! session guard.
//!
//! Decision logic only: the embedder maps its UI events to
//! [`SurfaceEvent`], calls [`respond`], and applies the returned
//! [`DeterrentAction`] (suppress the event, show the notice, clear the
//! clipboard).

/// A user interaction the deterrents care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// Right-click / context menu anywhere on the protected page.
    ContextMenu,
    /// A copy command; `within_surface` is whether the selection
    /// touches the media surface.
    Copy { within_surface: bool },
    /// The screen-capture key (PrintScreen or platform equivalent).
    CaptureKey,
}

/// What the embedder should do with an intercepted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeterrentAction {
    /// Let the event through untouched.
    Allow,
    /// Swallow the event silently.
    Suppress,
    /// Swallow the event and show the notice.
    SuppressWithNotice(&'static str),
    /// Swallow the event, clear the system clipboard, show the notice.
    ClearClipboardWithNotice(&'static str),
}

/// Notice shown when copy is blocked on the media surface.
const COPY_NOTICE: &str = "Copying is disabled on this video.";

/// Notice shown on the capture-key response.
const CAPTURE_NOTICE: &str = "Screen recording is disabled.";

/// Decides the response to a surface event.
pub fn respond(event: &SurfaceEvent) -> DeterrentAction {
    match event {
        SurfaceEvent::ContextMenu => DeterrentAction::Suppress,
        SurfaceEvent::Copy { within_surface: true } => {
            DeterrentAction::SuppressWithNotice(COPY_NOTICE)
        }
        // Copy outside the media surface is none of our business.
        SurfaceEvent::Copy { within_surface: false } => DeterrentAction::Allow,
        SurfaceEvent::CaptureKey => {
            DeterrentAction::ClearClipboardWithNotice(CAPTURE_NOTICE)
        }
    }
}
