//! reqform CLI entry point.
//!
//! Binary name: `reqform`
//!
//! Parses CLI arguments, initializes tracing and storage, then dispatches to
//! the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use reqform_infra::config::load_config;
use reqform_infra::filesystem::resolve_data_dir;
use reqform_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_filter};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(verbosity_filter(cli.verbose, cli.quiet), cli.export_spans()) {
        eprintln!("warning: failed to initialize tracing: {e}");
    }
    if cli.otel && !cli.export_spans() {
        tracing::warn!("--otel ignored: span export would mix with --json output on stdout");
    }

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "reqform", &mut std::io::stdout());
        return Ok(());
    }

    // Ephemeral sessions must not create the database
    if let Commands::Fill {
        ephemeral: true, ..
    } = &cli.command
    {
        let config = load_config(&resolve_data_dir()).await;
        return cli::wizard::fill_ephemeral(&config, cli.json).await;
    }

    let state = AppState::init().await?;

    match cli.command {
        Commands::Fill { fresh, .. } => {
            cli::wizard::fill(&state, fresh, cli.json).await?;
        }

        Commands::Status => {
            cli::status::status(&state, cli.json).await?;
        }

        Commands::Results { prompt } => {
            cli::results::show_results(&state, prompt, cli.json).await?;
        }

        Commands::Reset { results, force } => {
            cli::reset::reset(&state, results, force, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
