//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface definition for the text-to-speech reader.
///
/// This is the top-level parser that handles global options and
/// dispatches to subcommands. With no subcommand, the interactive
/// compose mode starts.
#[derive(Parser)]
#[command(name = "sayit")]
#[command(about = "Read text aloud through a speech synthesis server")]
#[command(version)]
pub struct Cli {
    /// Base URL of the speech server
    #[arg(
        long = "server",
        global = true,
        env = "SAYIT_SERVER",
        default_value = sayit_api::DEFAULT_BASE_URL
    )]
    pub server: String,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_args() {
        let cli = Cli::parse_from(["sayit", "--verbose", "--server", "http://10.0.0.2:5000", "languages"]);
        assert!(cli.verbose);
        assert_eq!(cli.server, "http://10.0.0.2:5000");
    }

    #[test]
    fn server_defaults_to_local() {
        let cli = Cli::parse_from(["sayit"]);
        assert_eq!(cli.server, sayit_api::DEFAULT_BASE_URL);
        assert!(cli.command.is_none());
    }

    #[test]
    fn speak_args() {
        use crate::commands::Commands;
        let cli = Cli::parse_from(["sayit", "speak", "Bonjour", "--lang", "fr", "--speed", "1.5"]);
        match cli.command {
            Some(Commands::Speak { text, lang, speed }) => {
                assert_eq!(text.as_deref(), Some("Bonjour"));
                assert_eq!(lang.as_deref(), Some("fr"));
                assert_eq!(speed, Some(1.5));
            }
            other => panic!("expected speak command, got {other:?}"),
        }
    }
}
