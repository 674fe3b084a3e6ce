use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "postrs")]
#[command(about = "Run requests from a Postman collection", version = crate::version::cli_version())]
pub struct Cli {
    /// Postman environment file used for variable substitution
    #[arg(long, short, global = true)]
    pub environment: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every request as folder.request
    List(ListArgs),

    /// Send one request from a collection
    Send(SendArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Collection file
    pub collection: PathBuf,
}

#[derive(Args)]
pub struct SendArgs {
    /// Collection file
    pub collection: PathBuf,

    /// Folder name as shown by `list` (Root for top-level requests)
    pub folder: String,

    /// Request name as shown by `list`
    pub request: String,

    /// Extra header overriding the collection, as "Name: Value"
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Variable for this call only, as name=value
    #[arg(long = "var", value_name = "NAME=VALUE")]
    pub vars: Vec<String>,

    /// JSON file with request overrides ({"headers": {...}, "timeout": 5})
    #[arg(long)]
    pub overrides: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<f64>,
}
