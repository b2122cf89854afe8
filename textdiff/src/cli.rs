//! Command-line surface.
//!
//! With no subcommand textdiff opens the terminal UI. The subcommands operate
//! on the same saved workspace without a terminal, for scripting and for
//! feeding in transcriptions produced elsewhere.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "textdiff", version, about = "Compare text variants word by word")]
pub struct Cli {
    /// Workspace database (default: <data_dir>/workspace.db).
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Append a text set to the active group.
    Add {
        #[arg(long)]
        name: String,
        /// Read content from this file instead of stdin.
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
        /// Mark the text set as produced by a transcriber.
        #[arg(long)]
        transcribed: bool,
    },
    /// Replace the workspace with a JSON export.
    Import { path: PathBuf },
    /// Write the workspace as a JSON export.
    Export { path: PathBuf },
    /// Print the active group's comparisons.
    Show {
        #[arg(long)]
        ignore_punctuation: bool,
        /// List the selected text sets without aligning them.
        #[arg(long)]
        no_diff: bool,
        /// Compare every text set in the group, ignoring the saved selection.
        #[arg(long)]
        all: bool,
    },
}
