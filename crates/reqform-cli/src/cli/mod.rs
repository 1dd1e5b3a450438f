//! CLI command definitions for the `reqform` binary.
//!
//! Uses clap derive macros for argument parsing. `fill` runs the interactive
//! wizard; the other commands inspect or clear what the wizard stored.

pub mod display;
pub mod reset;
pub mod results;
pub mod status;
pub mod wizard;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use reqform_types::prompt::PromptKind;

/// Collect website requirements and turn them into AI-ready prompts.
#[derive(Parser)]
#[command(name = "reqform", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export tracing spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fill in the requirements form, resuming saved progress.
    Fill {
        /// Ignore saved progress and start at step 1.
        #[arg(long)]
        fresh: bool,

        /// Keep everything in memory; nothing is written to disk.
        #[arg(long)]
        ephemeral: bool,
    },

    /// Show saved progress and whether results exist.
    Status,

    /// Print the most recently generated prompts.
    Results {
        /// Print only one prompt (business, audience, technical, master).
        #[arg(value_parser = parse_prompt_kind)]
        prompt: Option<PromptKind>,
    },

    /// Discard saved progress.
    Reset {
        /// Also discard generated results.
        #[arg(long)]
        results: bool,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

impl Cli {
    /// Whether spans go to the OpenTelemetry stdout exporter.
    ///
    /// The exporter writes straight to stdout, so `--json` turns it off.
    pub fn export_spans(&self) -> bool {
        self.otel && !self.json
    }
}

fn parse_prompt_kind(value: &str) -> Result<PromptKind, String> {
    value.parse()
}
