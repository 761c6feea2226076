use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sas",
    about = "Social activity server: per-user streams with viewer-relative liked flags",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML config file; flags override its values
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,

    /// Public base URL used in links and minted ids
    #[arg(long)]
    pub base_url: Option<String>,

    /// Seed the in-memory stores with demo users, notes, and likes
    #[arg(long)]
    pub demo: bool,
}
