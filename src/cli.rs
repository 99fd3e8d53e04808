//! Command-line interface for millionaire.

use clap::{Parser, Subcommand};

/// Millionaire - AI-generated quiz game
#[derive(Parser, Debug)]
#[command(name = "millionaire")]
#[command(about = "AI-generated 'Who Wants to Be a Millionaire' quiz", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (optional)
    #[arg(short, long, global = true, default_value = "millionaire.toml")]
    pub config: std::path::PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the web server
    Serve {
        /// Port to bind to (falls back to $PORT, then the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (falls back to the config file)
        #[arg(long)]
        host: Option<String>,
    },

    /// Generate one question and print it as JSON
    Question {
        /// Difficulty level (1-15)
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=15))]
        level: u8,
    },
}
