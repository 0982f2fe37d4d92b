use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "storegate")]
#[command(about = "Storegate - operator tool for the admin dashboard gate")]
pub struct Cli {
    /// Path to a configuration file (defaults to STOREGATE_CONFIG or built-in defaults)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Mint a signed token using JWT_SECRET
    Token {
        #[command(flatten)]
        token: TokenArgs,
    },

    /// Show what the gate decides for a path
    Check {
        #[command(flatten)]
        check: CheckArgs,
    },

    /// Parse a configuration file and print its role table
    Validate,
}

#[derive(Args)]
pub struct TokenArgs {
    /// Subject (user id)
    #[arg(long)]
    pub sub: String,

    /// Role name
    #[arg(long)]
    pub role: String,

    /// Lifetime in hours
    #[arg(long, default_value_t = 12)]
    pub hours: i64,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Path being navigated to
    #[arg(long)]
    pub path: String,

    /// Role to check as
    #[arg(long, conflicts_with = "token", required_unless_present = "token")]
    pub role: Option<String>,

    /// Token to verify with JWT_SECRET and check as
    #[arg(long)]
    pub token: Option<String>,
}
