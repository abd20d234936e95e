//! CLI interface for School Manager

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "school-manager")]
#[command(version)]
#[command(about = "School management REST API over HTTPS", long_about = None)]
pub struct Cli {
    /// Path to school-manager.toml (searched upward from the current directory by default)
    #[arg(short, long, global = true, env = "SCHOOL_MANAGER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default school-manager.toml
    Init,

    /// Create any missing database tables
    Migrate,

    /// Create an exec account, e.g. the first admin
    CreateExec {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        email: String,

        /// Login name
        #[arg(short, long)]
        username: String,

        /// Plaintext password, hashed before it is stored
        #[arg(short, long, env = "SCHOOL_EXEC_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(short, long, default_value = "admin")]
        role: String,
    },

    /// Print the stored hash form of a password
    HashPassword {
        password: String,
    },

    /// Start the HTTPS API server
    Serve {
        /// Host to bind to (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
}
