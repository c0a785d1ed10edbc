//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

use crate::application::RuleCommit;

/// Settings description DSL for the parameter framework
#[derive(Parser, Debug)]
#[command(name = "pfsettings")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Directory holding a local .pfsettings.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a description and print the command stream
    Generate {
        /// Description file (TOML)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Write the command stream to this file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
        /// When rule sets are committed
        #[arg(long, value_enum)]
        rule_commit: Option<RuleCommitArg>,
    },

    /// Evaluate a description without writing anything
    Check {
        /// Description file (TOML)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show the block hierarchy of a description
    Tree {
        /// Description file (TOML)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// List supported rule matchers
    Matchers,

    /// Show effective settings
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Command line spelling of [`RuleCommit`].
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCommitArg {
    /// Commit rules before every parameter assignment
    EverySet,
    /// Commit rules once per configuration
    Once,
}

impl From<RuleCommitArg> for RuleCommit {
    fn from(arg: RuleCommitArg) -> Self {
        match arg {
            RuleCommitArg::EverySet => RuleCommit::EverySet,
            RuleCommitArg::Once => RuleCommit::Once,
        }
    }
}
