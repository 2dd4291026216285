//! Command-line argument parsing and command definitions.
//!
//! Uses clap with derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Menu translation cache and lookup server
#[derive(Parser, Debug)]
#[command(name = "menu-locale")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Explicit config file (YAML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Language to resolve (e.g. en-US, nl-NL)
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    /// Directory containing one subdirectory per language
    #[arg(long, global = true)]
    pub locales_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "table", value_parser = ["table", "json", "yaml", "jsonl"])]
    pub output: String,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve translations and answer peer lookups until interrupted
    Serve {
        /// Address to listen on (overrides config)
        #[arg(long)]
        address: Option<String>,

        /// Run as a peer process: resolve, but install no responder
        #[arg(long)]
        peer: bool,
    },

    /// Resolve translations and print the given tokens
    Lookup {
        /// Tokens to look up
        #[arg(required = true)]
        tokens: Vec<String>,
    },

    /// Resolve translations and print the whole cache
    Dump,

    /// Ask a running coordinator for its translations
    Query {
        /// Coordinator address (overrides config)
        #[arg(long)]
        address: Option<String>,
    },

    /// List the identifiers resolved on every init
    Identifiers,

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}
