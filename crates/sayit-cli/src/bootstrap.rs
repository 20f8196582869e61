//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired
//! together: the HTTP client (sayit-api), the playback thread
//! (sayit-audio), the JSON preferences store, and the core controller.
//! Command handlers receive the fully-composed context and delegate
//! work to it.

use std::sync::Arc;

use sayit_core::{
    ControllerSignal, PreferencesService, SpeechController, UiEvent,
};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use sayit_api::{ApiConfig, DefaultSpeechClient};
use sayit_audio::PlayerHandle;

use crate::error::CliError;
use crate::store::JsonPreferencesStore;

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The core controller.
    pub controller: SpeechController,

    /// UI events emitted by the controller.
    pub events: mpsc::UnboundedReceiver<UiEvent>,

    /// Deferred signals to feed back into the controller.
    pub signals: mpsc::UnboundedReceiver<ControllerSignal>,

    /// Display preferences.
    pub preferences: PreferencesService,
}

/// Wire everything together.
pub async fn bootstrap(server: &str) -> Result<CliContext, CliError> {
    let config = ApiConfig::with_base_url(server);
    let backend = DefaultSpeechClient::new(&config)
        .map_err(|e| CliError::Arguments(format!("invalid server URL '{server}': {e}")))?;

    let (signal_tx, signals) = mpsc::unbounded_channel();

    // Natural end of playback re-enters the controller as a signal.
    let finished_tx = signal_tx.clone();
    let player = PlayerHandle::spawn(Arc::new(move || {
        let _ = finished_tx.send(ControllerSignal::PlaybackFinished);
    }))
    .map_err(|e| CliError::Audio(e.to_string()))?;

    let (controller, events) = SpeechController::new(
        Arc::new(backend),
        Arc::new(player),
        signal_tx,
    );

    let preferences = load_preferences().await?;

    Ok(CliContext {
        controller,
        events,
        signals,
        preferences,
    })
}

/// Build just the preferences service (no network, no audio device).
/// Used by `sayit config` and by the full bootstrap.
pub async fn load_preferences() -> Result<PreferencesService, CliError> {
    let store = JsonPreferencesStore::at_default_location()?;
    tracing::debug!(path = %store.path().display(), "Preferences store");
    Ok(PreferencesService::load(Arc::new(store), system_prefers_dark()).await)
}

/// Initialise tracing. `RUST_LOG` wins; otherwise `--verbose` selects
/// debug level for our crates.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "sayit=debug,sayit_core=debug,sayit_api=debug,sayit_audio=debug,sayit_cli=debug"
    } else {
        "sayit=warn,sayit_core=warn,sayit_api=warn,sayit_audio=warn,sayit_cli=warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// System-level dark background signal.
///
/// Terminals advertising their palette set `COLORFGBG` to something
/// like `15;0` (light text on a dark background). Background indices
/// 0-6 and 8 are the dark half of the classic 16-color palette. Absent
/// or unparseable values mean "no signal", which resolves to light.
#[must_use]
pub fn system_prefers_dark() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| {
            value
                .rsplit(';')
                .next()
                .and_then(|bg| bg.trim().parse::<u8>().ok())
        })
        .is_some_and(|bg| bg <= 6 || bg == 8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colorfgbg_heuristic() {
        // Not asserting through the env (process-global); exercise the
        // parsing shape directly instead.
        let parse = |value: &str| {
            value
                .rsplit(';')
                .next()
                .and_then(|bg| bg.trim().parse::<u8>().ok())
                .is_some_and(|bg| bg <= 6 || bg == 8)
        };
        assert!(parse("15;0"));
        assert!(parse("12;8"));
        assert!(!parse("0;15"));
        assert!(!parse("garbage"));
    }
}
