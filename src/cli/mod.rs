//! CLI module for routr - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for routing,
//! execution, and an interactive session.

pub mod commands;

pub use commands::Cli;
