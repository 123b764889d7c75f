//! gen-arcade-audio - arcade shooter audio generator
//!
//! Composes the game's sound effects and music loops and writes each one as
//! a 16-bit PCM WAV into every output directory (by default the game's
//! `src/assets` and `bin/assets`).

use anyhow::Result;
use arcade_synth::{Quantization, TrackId, TRACKS};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod generate;

use generate::Job;

#[derive(Parser)]
#[command(name = "gen-arcade-audio")]
#[command(about = "Generate the arcade shooter's sound effects and music")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List every track with its output file
    List,

    /// Generate every track
    All {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate the named tracks
    Track {
        /// Track ids, as printed by `list`
        #[arg(required = true)]
        ids: Vec<TrackId>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Output directory, may be repeated (created if missing)
    #[arg(short, long = "output", default_values = ["src/assets", "bin/assets"])]
    outputs: Vec<PathBuf>,

    /// Seed the noise layers for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Round to the nearest PCM step instead of truncating
    #[arg(long)]
    round: bool,
}

impl OutputArgs {
    fn into_job(self, tracks: Vec<TrackId>) -> Job {
        Job {
            tracks,
            outputs: self.outputs,
            seed: self.seed,
            quantization: if self.round {
                Quantization::Round
            } else {
                Quantization::Truncate
            },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match cli.command {
        Commands::List => {
            for track in &TRACKS {
                println!(
                    "{:<14} {:<22} {:>6.2}s  {}",
                    track.name, track.file_name, track.duration, track.title
                );
            }
        }

        Commands::All { output } => {
            generate::run(&output.into_job(TrackId::ALL.to_vec()))?;
        }

        Commands::Track { ids, output } => {
            generate::run(&output.into_job(ids))?;
        }
    }

    Ok(())
}
