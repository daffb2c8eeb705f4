//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::config::OutputFormat;

/// Parse and flatten genre relation expressions such as `Future Bass || Trap | Dubstep`
#[derive(Parser, Debug)]
#[command(name = "genreguide")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity: -d info, -dd debug, -ddd trace
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse an expression and print its structure
    Parse {
        /// Expression, e.g. "Drum & Bass || Breakcore > Jungle"
        expr: String,
        /// Output format (default from config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print the flattened tokens of an expression, one per line
    Flatten {
        /// Expression
        expr: String,
    },

    /// Parse every record of a track list and report failures
    Check {
        /// Track list (`[genre<TAB>]expression` per line)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print one JSON catalog entry per record
    Catalog {
        /// Track list (`[genre<TAB>]expression` per line)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print the alternative names found in a subgenre note
    Aliases {
        /// Note file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,
}
