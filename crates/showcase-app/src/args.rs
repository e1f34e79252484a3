//! Command-line argument definitions for the showcase binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::library::LibraryProfile;

/// Canvas library showcase
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the libraries under evaluation and their examples
    List,

    /// Show a library's overview, evaluation summary and use cases
    Info {
        /// Library page (konva, fabric, paper)
        library: LibraryProfile,
    },

    /// Render every example of a library page to PNG
    Snapshot {
        /// Library page (konva, fabric, paper)
        library: LibraryProfile,

        /// Output directory (defaults to the configured one)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Run the preview and print exports of a library page
    Export {
        /// Library page (fabric, paper)
        library: LibraryProfile,

        /// Output directory (defaults to the configured one)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Replay a JSON interaction script, then snapshot the page
    Replay {
        /// Path to the script
        script: PathBuf,

        /// Output directory (defaults to the configured one)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}
