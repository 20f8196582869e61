//! `sayit config` - show or toggle the persisted display preferences.

use sayit_core::PreferencesService;

use crate::commands::ConfigAction;
use crate::error::CliError;

pub async fn run(
    mut preferences: PreferencesService,
    action: Option<ConfigAction>,
) -> Result<(), CliError> {
    let current = match action {
        None | Some(ConfigAction::Show) => preferences.current(),
        Some(ConfigAction::Dark) => preferences.toggle_dark_mode().await,
        Some(ConfigAction::Compact) => preferences.toggle_compact().await,
    };

    println!(
        "dark mode:      {} (indicator: {})",
        on_off(current.dark_mode),
        current.theme_indicator()
    );
    println!(
        "compact layout: {} (indicator: {})",
        on_off(current.compact_layout),
        current.layout_indicator()
    );
    Ok(())
}

const fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}
