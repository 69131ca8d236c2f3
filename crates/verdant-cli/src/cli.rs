use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "verdant",
    about = "Verdant — image garden content pipeline",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the configuration file (default: verdant.toml).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the upload server
    Serve(ServeArgs),
    /// List content records, newest first
    Posts(PostsArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Override the configured bind address.
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

#[derive(Args)]
pub struct PostsArgs {
    /// Emit the listing as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}
