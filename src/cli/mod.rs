//! Command-line interface for MarketPulse.

mod commands;

use clap::{Parser, Subcommand};

/// MarketPulse - validate startup ideas with generated landing pages
#[derive(Parser)]
#[command(name = "marketpulse")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Generate landing page copy for an idea and print it as JSON
    #[command(alias = "g")]
    Generate {
        /// The idea, in plain words
        #[arg(required = true)]
        idea: Vec<String>,
    },

    /// List recorded signups
    Signups {
        /// Only signups for this landing page
        #[arg(long)]
        startup_id: Option<String>,
    },

    /// List recorded feedback
    Feedback {
        /// Only feedback for this landing page
        #[arg(long)]
        startup_id: Option<String>,
    },

    /// List generated landing pages
    #[command(alias = "ls")]
    Pages,
}

pub use commands::*;
