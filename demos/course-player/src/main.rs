//! Course-player demo: two simulated devices fight over one seat.
//!
//! Runs the whole enforcement flow in-process — fake identity provider,
//! in-memory document store, fake player — and narrates what happens
//! when a second device signs into the same account.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use seatlock::prelude::*;

// ---------------------------------------------------------------------------
// Demo collaborators
// ---------------------------------------------------------------------------

/// Identity provider with a single demo account.
struct DemoProvider;

impl CredentialGateway for DemoProvider {
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AccountId, AuthError> {
        if email == "potter@example.com" && password == "wheel" {
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

    async fn sign_out(&self, account: &AccountId) -> Result<(), AuthError> {
        tracing::info!(%account, "provider sign-out");
        Ok(())
    }
}

/// Catalog with one hard-coded course.
struct DemoCatalog;

impl CourseCatalog for DemoCatalog {
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
            videos: vec![VideoDescriptor {
                title: "Centering clay".into(),
                source_url: "https://youtu.be/dQw4w9WgXcQ".into(),
            }],
        }))
    }
}

/// Player that logs commands and advances position while "playing".
#[derive(Default)]
struct ConsolePlayer {
    position_secs: AtomicU64,
}

impl MediaPlayer for ConsolePlayer {
    fn load(&self, media: &MediaId) {
        tracing::info!(%media, thumbnail = %media.thumbnail_url(), "player: load");
        self.position_secs.store(0, Ordering::SeqCst);
    }
    fn play(&self) {
        tracing::info!("player: play");
    }
    fn pause(&self) {
        tracing::info!("player: pause");
    }
    fn seek(&self, position: Duration) {
        tracing::info!(?position, "player: seek");
        self.position_secs.store(position.as_secs(), Ordering::SeqCst);
    }
    fn set_muted(&self, muted: bool) {
        tracing::info!(muted, "player: mute");
    }
    fn set_fullscreen(&self, fullscreen: bool) {
        tracing::info!(fullscreen, "player: fullscreen");
    }
    fn position(&self) -> Duration {
        Duration::from_secs(self.position_secs.load(Ordering::SeqCst))
    }
    fn duration(&self) -> Duration {
        Duration::from_secs(754)
    }
}

/// One simulated device: its own local storage over the shared backend.
fn device(
    store: &MemoryStore,
) -> SessionContext<DemoProvider, MemoryStore, MemoryLocalStore> {
    SessionContext::new(DemoProvider, store.clone(), MemoryLocalStore::new())
}

// ---------------------------------------------------------------------------
// The scenario
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), SeatlockError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Shared backend; two devices.
    let store = MemoryStore::new();
    let laptop = device(&store);
    let phone = device(&store);

    // --- Laptop signs in and starts watching ---
    tracing::info!("=== laptop signs in ===");
    let session = laptop.sign_in("potter@example.com", "wheel").await?;
    let laptop_guard = laptop.spawn_guard(GuardConfig::default())?;
    laptop_guard.check(ReconcileTrigger::Mount).await?;

    let player = Arc::new(ConsolePlayer::default());
    let mut gate = ContentGate::new(Arc::clone(&player), laptop_guard.subscribe());
    let progress = ProgressTicker::spawn(Arc::clone(&player));
    let watermark = Watermark::new(session.account_id.as_str());
    tracing::info!(label = watermark.label(), "watermark overlay active");

    let course = DemoCatalog
        .fetch_course("pottery-101")
        .await?
        .ok_or_else(|| CatalogError::Backend("demo course missing".into()))?;
    tracing::info!(title = %course.title, videos = course.videos.len(), "course loaded");

    gate.select(&course.videos[0])?;
    gate.play()?;
    gate.seek(Duration::from_secs(95))?;
    tokio::time::sleep(Duration::from_millis(1100)).await;
    let sample = progress.latest();
    tracing::info!(
        at = %format_timestamp(sample.position),
        of = %format_timestamp(sample.duration),
        "watching"
    );

    // A right-click on the surface, for flavor.
    tracing::info!(action = ?respond(&SurfaceEvent::ContextMenu), "context menu blocked");

    // --- Phone signs into the same account ---
    tracing::info!("=== phone signs in with the same account ===");
    phone.sign_in("potter@example.com", "wheel").await?;

    // --- Laptop regains focus: superseded ---
    tracing::info!("=== laptop window regains focus ===");
    match laptop_guard.check(ReconcileTrigger::FocusGained).await {
        Err(GuardError::Superseded(account)) => {
            tracing::warn!(
                %account,
                "you have been signed out because this account was used on another device"
            );
        }
        other => tracing::error!(?other, "expected supersession"),
    }

    // Playback is now denied.
    if let Err(err) = gate.play() {
        tracing::warn!(%err, "playback blocked");
    }

    // The phone, meanwhile, validates cleanly.
    let phone_guard = phone.spawn_guard(GuardConfig::default())?;
    let state = phone_guard.check(ReconcileTrigger::Mount).await?;
    tracing::info!(%state, "phone session state");

    laptop_guard.shutdown().await;
    phone_guard.shutdown().await;
    Ok(())
}
