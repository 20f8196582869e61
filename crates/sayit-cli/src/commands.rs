//! Subcommand definitions.

use clap::Subcommand;

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Speak text once and play it to completion
    Speak {
        /// Text to read aloud (reads stdin when omitted)
        text: Option<String>,

        /// Language code (one of `sayit languages`; defaults to
        /// auto-detect)
        #[arg(long)]
        lang: Option<String>,

        /// Playback speed multiplier (0.5, 0.75, 1.0, 1.25, 1.5, 1.75
        /// or 2.0)
        #[arg(long)]
        speed: Option<f32>,
    },

    /// List the selectable languages
    Languages,

    /// Show or toggle display preferences
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Interactive compose mode (the default)
    Compose,
}

/// Preference actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the current preferences
    Show,

    /// Toggle dark mode
    Dark,

    /// Toggle compact layout
    Compact,
}
