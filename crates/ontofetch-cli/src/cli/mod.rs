//! CLI for the ontofetch content-negotiated fetcher.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use ontofetch_core::config;
use std::path::PathBuf;

use commands::{run_completions, run_detect, run_fetch, run_formats};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ontofetch")]
#[command(about = "Download ontologies with HTTP content negotiation and format fallback", long_about = None)]
pub struct Cli {
    /// Use this config file instead of ~/.config/ontofetch/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a resource, trying each serialization until the server serves one.
    Fetch {
        /// HTTP/HTTPS URI of the ontology.
        uri: String,
        /// Directory to save into (default: current directory).
        #[arg(long, short, value_name = "DIR")]
        out: Option<PathBuf>,
        /// Only ask for these serializations (name or extension, repeatable).
        #[arg(long = "format", short = 'f', value_name = "NAME")]
        formats: Vec<String>,
        /// Print the full result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Detect the serialization of a local file.
    Detect {
        /// Path to the file.
        path: PathBuf,
    },

    /// List the serializations tried during negotiation, in order.
    Formats,

    /// Print shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if let CliCommand::Completions { shell } = cli.command {
            return run_completions(shell);
        }

        let cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                uri,
                out,
                formats,
                json,
            } => {
                let work_dir = match out {
                    Some(dir) => dir,
                    None => std::env::current_dir()?,
                };
                run_fetch(&cfg, &uri, &work_dir, &formats, json)?
            }
            CliCommand::Detect { path } => run_detect(&path)?,
            CliCommand::Formats => run_formats(&cfg)?,
            CliCommand::Completions { shell } => run_completions(shell)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
