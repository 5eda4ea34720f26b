//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Organizational hierarchy builder: reconstruct a tree from parent,child pairs and count its relations
#[derive(Parser, Debug)]
#[command(name = "orgtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Additional config file, layered above the global one
    #[arg(long, global = true, env = "ORGTREE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print relation counts, one label-sorted line per node
    Report {
        /// Pair file (parent,child per line); stdin if omitted or "-"
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Show hierarchy as tree with relation counts
    Show {
        /// Pair file; stdin if omitted or "-"
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Print each node with its children and parent
    Trace {
        /// Pair file; stdin if omitted or "-"
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Write the computed hierarchy as nested JSON document
    Export {
        /// Pair file; stdin if omitted or "-"
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Output file (default: stdout)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Load a JSON document and print its relation report
    Import {
        /// JSON document written by `export`
        #[arg(value_hint = ValueHint::FilePath)]
        document: PathBuf,
    },

    /// Show a single node
    Find {
        /// Node label
        label: String,
        /// Pair file; stdin if omitted or "-"
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Print one cell of a CSV file
    Cell {
        /// CSV file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Zero-based row index
        row: usize,
        /// Zero-based column index
        column: usize,
    },

    /// Sum of row entropies of a numeric CSV matrix
    Entropy {
        /// CSV file; stdin if omitted or "-"
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
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

    /// Create config template
    Init {
        /// Target file (default: global config path)
        #[arg(value_hint = ValueHint::FilePath)]
        path: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}
