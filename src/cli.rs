use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "discwatch")]
#[command(author, version, about = "Optical disc detection for media player playlists")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add attached discs to the playlist and wait for shutdown
    Watch {
        /// Device snapshot to read (overrides the config file)
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Write the detected entries as M3U on shutdown (overrides the config file)
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Classify attached devices once and print the resulting entries
    Scan {
        /// Device snapshot to read (overrides the config file)
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
