//! CLI argument definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// lizlint - Lizard complexity limits for C++ sources
#[derive(Parser)]
#[command(name = "lizlint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan files and report functions over the configured limits
    Scan(ScanArgs),

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Start the LSP server
    Lsp,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Files to scan
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub limits: LimitArgs,

    /// Lizard executable
    #[arg(long, value_name = "PATH")]
    pub executable: Option<String>,

    /// Read a saved Lizard report instead of running Lizard
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Limits given on the command line. Each one overrides the config file.
#[derive(Args, Default)]
pub struct LimitArgs {
    /// Maximum cyclomatic complexity (0 disables)
    #[arg(long, value_name = "N")]
    pub ccn: Option<u32>,

    /// Maximum function length (0 disables)
    #[arg(long, value_name = "N")]
    pub length: Option<u32>,

    /// Maximum parameter count (0 disables)
    #[arg(long, value_name = "N")]
    pub arguments: Option<u32>,

    /// Count a switch statement as a single branch
    #[arg(long, conflicts_with = "no_modified")]
    pub modified: bool,

    /// Count each switch case as a branch, even if the config enables --modified
    #[arg(long)]
    pub no_modified: bool,

    /// Whitelist file
    #[arg(long, value_name = "FILE")]
    pub whitelist: Option<String>,

    /// Extra Lizard extension (repeatable)
    #[arg(long = "extension", value_name = "EXT")]
    pub extensions: Vec<String>,
}

impl LimitArgs {
    /// The `--modified` setting, if given on the command line.
    pub fn modified(&self) -> Option<bool> {
        if self.modified {
            Some(true)
        } else if self.no_modified {
            Some(false)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
