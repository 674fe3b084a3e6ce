mod cli;
mod commands;
mod ui;
mod version;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let Cli { environment, verbose, command } = Cli::parse();

    if verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let exit_code = match command {
        Commands::List(args) => commands::list::run(args),
        Commands::Send(args) => commands::send::run(args, environment.as_deref(), verbose).await,
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
