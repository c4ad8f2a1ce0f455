//! Command-line interface definitions.

pub mod check;
pub mod list;
pub mod resolve;

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Veridoc page-resolution CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: veridoc.toml)
    #[arg(short = 'C', long, default_value = "veridoc.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Show debug output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Load all content and report every defect
    #[command(visible_alias = "c")]
    Check,

    /// Resolve one request path to its page
    #[command(visible_alias = "r")]
    Resolve {
        /// Request path (e.g. /en/2.1/guide/setup)
        path: String,

        /// Language to resolve for (default: authoritative language)
        #[arg(short, long)]
        lang: Option<String>,

        /// Return "not found" instead of failing on unresolved
        /// authoritative paths
        #[arg(long)]
        lenient: bool,
    },

    /// List loaded pages and their permalinks
    #[command(visible_alias = "l")]
    List {
        /// Only show pages in this language
        #[arg(short, long)]
        lang: Option<String>,
    },
}
