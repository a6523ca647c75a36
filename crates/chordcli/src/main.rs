//! chords - derive a key's chord palette or find the key of a progression.

mod commands;
mod render;
mod settings;

use anyhow::{bail, Context, Result};
use chordconf::ChordConfig;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chords")]
#[command(about = "Chord palettes and key matching for major keys", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (replaces ./chordsmith.toml)
    #[arg(long, global = true, env = "CHORDSMITH_CONFIG")]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the chord palette for a key from a chord grid
    Derive {
        /// Key to look up in the grid headers (e.g. C, Bb, F#)
        #[arg(short, long)]
        key: String,

        /// Grid file (CSV, TSV or semicolon separated), or - for stdin.
        /// The built-in 12-key grid is used when omitted.
        #[arg(short, long)]
        table: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Rank keys for a chord sequence and spot common progressions
    Match {
        /// Whitespace-separated chords, e.g. "Dm7 G7 Cmaj7"
        chords: String,

        /// Candidate keys, comma separated (default: configured candidates)
        #[arg(long, value_delimiter = ',')]
        keys: Option<Vec<String>>,

        /// Number of ranked keys to show
        #[arg(long)]
        top: Option<usize>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config {
        /// List the files and environment variables that contributed
        #[arg(long)]
        show_sources: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config {
        if !path.exists() {
            bail!("Config file not found: {}", path.display());
        }
    }
    let (config, sources) = ChordConfig::load_with_sources_from(cli.config.as_deref())
        .context("Failed to load configuration")?;

    init_logging(&config.logging.level);
    tracing::debug!(files = sources.files.len(), env = sources.env_overrides.len(), "config loaded");

    let color = !cli.no_color && config.output.color && std::io::stdout().is_terminal();

    match cli.command {
        Commands::Derive { key, table, json } => {
            commands::derive(&config, &key, table.as_deref(), json || config.output.json, color)?;
        }
        Commands::Match {
            chords,
            keys,
            top,
            json,
        } => {
            commands::match_chords(
                &config,
                &chords,
                keys.as_deref(),
                top,
                json || config.output.json,
                color,
            )?;
        }
        Commands::Config { show_sources } => {
            commands::show_config(&config, &sources, show_sources);
        }
    }

    Ok(())
}

/// Log to stderr so stdout carries only results.
fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_new(level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
