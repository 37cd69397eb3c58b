//! End-to-end tests for the full enforcement flow: sign-in, guard,
//! gate, and the race between two client contexts over one account.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use seatlock::prelude::*;

// =========================================================================
// Shared fakes: identity provider, catalog, player
// =========================================================================

/// Identity provider fake accepting one fixed user.
#[derive(Default)]
struct OneUserProvider {
    sign_outs: AtomicU32,
}

impl CredentialGateway for OneUserProvider {
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AccountId, AuthError> {
        if email == "potter@example.com" && password == "clay" {
            Ok(AccountId::from("u-potter"))
        } else {
            Err(AuthError::InvalidCredentials(
                "email or password is incorrect".into(),
            ))
        }
    }

    async fn sign_up(
        &self,
        email: &str,
        _password: &str,
    ) -> Result<AccountId, AuthError> {
        Ok(AccountId::from(email))
    }

    async fn sign_in_federated(
        &self,
        _provider: FederatedProvider,
    ) -> Result<AccountId, AuthError> {
        Ok(AccountId::from("u-potter"))
    }

    async fn send_password_reset(&self, _email: &str) -> Result<(), AuthError> {
        Ok(())
    }

    async fn sign_out(&self, _account: &AccountId) -> Result<(), AuthError> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Catalog fake with one course.
struct OneCourseCatalog;

impl CourseCatalog for OneCourseCatalog {
    async fn fetch_course(
        &self,
        course_id: &str,
    ) -> Result<Option<Course>, CatalogError> {
        if course_id != "pottery-101" {
            return Ok(None);
        }
        Ok(Some(Course {
            title: "Pottery 101".into(),
            description: "Wheel throwing basics".into(),
            videos: vec![
                VideoDescriptor {
                    title: "Centering clay".into(),
                    source_url: "https://youtu.be/dQw4w9WgXcQ".into(),
                },
                VideoDescriptor {
                    title: "Broken link".into(),
                    source_url: "not a url".into(),
                },
            ],
        }))
    }
}

/// Player fake recording what the gate forwards.
#[derive(Default)]
struct CountingPlayer {
    plays: AtomicU32,
    loaded: Mutex<Option<String>>,
}

impl MediaPlayer for CountingPlayer {
    fn load(&self, media: &MediaId) {
        *self.loaded.lock().unwrap() = Some(media.as_str().to_string());
    }
    fn play(&self) {
        self.plays.fetch_add(1, Ordering::SeqCst);
    }
    fn pause(&self) {}
    fn seek(&self, _position: Duration) {}
    fn set_muted(&self, _muted: bool) {}
    fn set_fullscreen(&self, _fullscreen: bool) {}
    fn position(&self) -> Duration {
        Duration::from_secs(7)
    }
    fn duration(&self) -> Duration {
        Duration::from_secs(600)
    }
}

/// One simulated browser context over a shared backend.
fn context(
    store: &MemoryStore,
) -> SessionContext<OneUserProvider, MemoryStore, MemoryLocalStore> {
    SessionContext::new(
        OneUserProvider::default(),
        store.clone(),
        MemoryLocalStore::new(),
    )
}

async fn await_state(guard: &GuardHandle, wanted: GuardState) {
    let mut states = guard.subscribe();
    tokio::time::timeout(Duration::from_secs(1), async {
        while *states.borrow_and_update() != wanted {
            states.changed().await.unwrap();
        }
    })
    .await
    .unwrap_or_else(|_| panic!("guard never reached {wanted}"));
}

// =========================================================================
// The headline scenario
// =========================================================================

#[tokio::test]
async fn test_full_flow_second_device_evicts_first() {
    let store = MemoryStore::new();

    // Laptop signs in and starts watching.
    let laptop = context(&store);
    laptop.sign_in("potter@example.com", "clay").await.unwrap();
    let laptop_guard = laptop.spawn_guard(GuardConfig::default()).unwrap();
    await_state(&laptop_guard, GuardState::Valid).await;

    let player = Arc::new(CountingPlayer::default());
    let mut gate =
        ContentGate::new(Arc::clone(&player), laptop_guard.subscribe());

    let course = OneCourseCatalog
        .fetch_course("pottery-101")
        .await
        .unwrap()
        .unwrap();
    gate.select(&course.videos[0]).unwrap();
    gate.play().unwrap();
    assert_eq!(player.plays.load(Ordering::SeqCst), 1);
    assert_eq!(
        player.loaded.lock().unwrap().as_deref(),
        Some("dQw4w9WgXcQ")
    );

    // Phone signs into the same account: authority now points at the
    // phone's token.
    let phone = context(&store);
    phone.sign_in("potter@example.com", "clay").await.unwrap();

    // Laptop regains focus → reconciliation detects the supersession.
    let result = laptop_guard.check(ReconcileTrigger::FocusGained).await;
    assert!(matches!(
        result,
        Err(GuardError::Superseded(ref a)) if a == &AccountId::from("u-potter")
    ));

    // The gate denies the very next operation.
    assert!(matches!(
        gate.play(),
        Err(GateError::AccessDenied {
            state: GuardState::Invalidated
        })
    ));
    assert_eq!(player.plays.load(Ordering::SeqCst), 1, "no further playback");

    // Laptop's cache is gone; the phone still validates.
    assert!(laptop.resume().is_none());
    let phone_guard = phone.spawn_guard(GuardConfig::default()).unwrap();
    let state = phone_guard
        .check(ReconcileTrigger::FocusGained)
        .await
        .unwrap();
    assert_eq!(state, GuardState::Valid);
}

// =========================================================================
// Gate denies before the first check completes
// =========================================================================

#[tokio::test]
async fn test_gate_denies_while_unchecked() {
    let store = MemoryStore::new();
    let ctx = context(&store);
    ctx.sign_in("potter@example.com", "clay").await.unwrap();

    // Build the gate from a fresh guard before any check has finished.
    // The guard's watch starts at Unchecked.
    let (tx, rx) = tokio::sync::watch::channel(GuardState::Unchecked);
    let player = Arc::new(CountingPlayer::default());
    let mut gate = ContentGate::new(Arc::clone(&player), rx);

    assert!(matches!(
        gate.play(),
        Err(GateError::AccessDenied {
            state: GuardState::Unchecked
        })
    ));

    // Once the guard confirms, the same gate permits.
    tx.send(GuardState::Valid).unwrap();
    gate.play().unwrap();
    assert_eq!(player.plays.load(Ordering::SeqCst), 1);
}

// =========================================================================
// Watermark and deterrents ride along with the gate
// =========================================================================

#[tokio::test]
async fn test_protected_surface_chrome() {
    let mark = Watermark::new("potter@example.com");
    assert_eq!(mark.label(), "potter@example.com");
    assert_eq!(mark.corner_at(Duration::ZERO), Corner::TopLeft);

    assert_eq!(
        respond(&SurfaceEvent::ContextMenu),
        DeterrentAction::Suppress
    );
    assert!(matches!(
        respond(&SurfaceEvent::CaptureKey),
        DeterrentAction::ClearClipboardWithNotice(_)
    ));
}

// =========================================================================
// Catalog lookups
// =========================================================================

#[tokio::test]
async fn test_catalog_unknown_course_is_absent() {
    let course = OneCourseCatalog.fetch_course("nope").await.unwrap();
    assert!(course.is_none());
}

#[tokio::test]
async fn test_malformed_video_rejected_by_gate_not_catalog() {
    // The catalog hands back whatever it stores; the gate is where a
    // malformed source URL turns into an error.
    let course = OneCourseCatalog
        .fetch_course("pottery-101")
        .await
        .unwrap()
        .unwrap();
    let broken = &course.videos[1];
    assert!(broken.media_id().is_none());

    let (_tx, rx) = tokio::sync::watch::channel(GuardState::Valid);
    let mut gate = ContentGate::new(Arc::new(CountingPlayer::default()), rx);
    assert!(matches!(
        gate.select(broken),
        Err(GateError::UnplayableSource(_))
    ));
}

// =========================================================================
// Progress readout formatting
// =========================================================================

#[tokio::test]
async fn test_progress_readout_format() {
    assert_eq!(format_timestamp(Duration::from_secs(7)), "0:07");
    assert_eq!(format_timestamp(Duration::from_secs(75)), "1:15");
}
