//! CLI entry point - parses arguments, initialises tracing, composes
//! the application, and dispatches to the command handlers.

use clap::Parser;

use sayit_cli::{Cli, CliError, Commands, bootstrap, handlers, init_tracing};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Some(Commands::Languages) => {
            handlers::languages::run();
            Ok(())
        }

        Some(Commands::Config { action }) => {
            let preferences = sayit_cli::bootstrap::load_preferences().await?;
            handlers::config::run(preferences, action).await
        }

        Some(Commands::Speak { text, lang, speed }) => {
            let ctx = bootstrap(&cli.server).await?;
            handlers::speak::run(ctx, text, lang, speed).await
        }

        Some(Commands::Compose) | None => {
            let ctx = bootstrap(&cli.server).await?;
            handlers::compose::run(ctx).await
        }
    }
}
