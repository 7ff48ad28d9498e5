//! CLI interface for Coursepad

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "coursepad")]
#[command(author = "Krakaw")]
#[command(version = "0.3.0")]
#[command(about = "Course catalog and user authentication backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new coursepad.toml configuration file
    Init,

    /// Hash a password with the configured scheme
    HashPassword {
        /// Password to hash (prompted for when omitted)
        #[arg(env = "COURSEPAD_PASSWORD")]
        password: Option<String>,

        /// Use the legacy salt$digest format instead of the configured scheme
        #[arg(long)]
        legacy: bool,
    },

    /// Check a password against a stored hash
    VerifyPassword {
        /// Stored hash to verify against
        #[arg(long)]
        hash: String,

        /// Password to check (prompted for when omitted)
        password: Option<String>,
    },

    /// Check a password against the strength policy
    CheckPassword {
        /// Password to check (prompted for when omitted)
        password: Option<String>,
    },

    /// Run a register, login, enroll and logout walkthrough in memory
    Demo {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
