//! CLI module - Command-line interface for Watchlist
//!
//! Parses arguments with clap. Everything except `serve` is an
//! administrative bootstrap command that runs once and exits.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Watchlist - a single-user movie list
#[derive(Parser)]
#[command(name = "watchlist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a config file (defaults to ./config.toml and the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web")]
    Serve,

    /// Initialize the database schema
    Initdb {
        /// Drop all tables before creating them
        #[arg(long)]
        drop: bool,
    },

    /// Fill the database with sample data
    Forge,

    /// Create or update the admin account
    Admin {
        /// The username used to login (prompted if omitted)
        #[arg(long)]
        username: Option<String>,
        /// The password used to login (prompted if omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Create default config file
    Init,
}

pub use commands::*;
