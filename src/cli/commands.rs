//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - route: show the routing decision for a request without dispatching
//! - ask: route a request and execute it end to end
//! - repl: interactive session
//! - tools: list the available operations

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Routr - rule-based request router for web scraping operations
#[derive(Parser, Debug)]
#[command(name = "routr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the routing decision for a request without executing it
    Route {
        /// Free-text request to route
        text: String,
    },

    /// Route a request and execute the matched operation
    Ask {
        /// Free-text request
        text: String,
    },

    /// Start an interactive session
    Repl,

    /// List the available operations and their required arguments
    Tools,
}
