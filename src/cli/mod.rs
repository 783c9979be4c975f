//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for BizzSummit using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// BizzSummit - Bookings, Projects and Resources API
#[derive(Parser, Debug)]
#[command(name = "bizzsummit")]
#[command(version, about, long_about = None)]
#[command(author = "BizzSummit Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "bizzsummit.toml", env = "BIZZSUMMIT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "BIZZSUMMIT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision the store and serve the API
    Serve(commands::serve::ServeArgs),

    /// Provision the store and exit
    Provision(commands::provision::ProvisionArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
