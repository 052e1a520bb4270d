use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "shotreap")]
#[command(about = "Reaps near-duplicate screenshots", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Detect and dispose near-duplicate screenshots until none remain
    Reap {
        /// Process only this subfolder of the root
        #[arg(long)]
        folder: Option<String>,

        /// Rename duplicates with the marker prefix instead of trashing them
        #[arg(long)]
        debug: bool,

        /// Number of folders processed concurrently
        #[arg(long)]
        workers: Option<usize>,

        /// Root directory holding the screenshot folders
        #[arg(long)]
        root: Option<PathBuf>,

        /// Hash distance two shots must stay under to count as duplicates
        #[arg(long)]
        threshold: Option<u32>,
    },
    /// List the folders a run would process, newest first
    Preview {
        /// Root directory holding the screenshot folders
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Print configuration values
    PrintConfig,
}
