//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::parser::MAX_DEPTH_LIMIT;

/// Parse and inspect field-selection expressions like `kind,items(title,characteristics(length))`
#[derive(Parser, Debug)]
#[command(name = "paramtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Reject malformed expressions instead of skipping the bad parts
    #[arg(long, global = true)]
    pub strict: bool,

    /// Maximum nesting depth of groups
    #[arg(
        long,
        global = true,
        value_parser = clap::value_parser!(u32).range(1..=MAX_DEPTH_LIMIT as i64)
    )]
    pub max_depth: Option<u32>,

    /// Config file layered over the global one
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath, env = "PARAMTREE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the canonical form of an expression
    Parse {
        /// Selection expression
        expr: String,
        /// Print the tree as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Show the selection as a tree
    Tree {
        /// Selection expression
        expr: String,
    },

    /// List child names of the root or of a nested param
    Names {
        /// Selection expression
        expr: String,
        /// Dotted path to a nested param, e.g. items.characteristics
        #[arg(short, long)]
        path: Option<String>,
    },

    /// List dotted paths of all leaf params
    Leaves {
        /// Selection expression
        expr: String,
    },

    /// Validate an expression in strict mode
    Check {
        /// Selection expression
        expr: String,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
