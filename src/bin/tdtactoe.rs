//! tdtactoe CLI - train temporal-difference agents at N×N tic-tac-toe and
//! play against them
//!
//! Set `RUST_LOG` to control log output (defaults to `info`).

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tdtactoe")]
#[command(version, about = "Tabular TD learning for N×N tic-tac-toe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train two agents against each other
    Train(Box<tdtactoe::cli::commands::train::TrainArgs>),

    /// Play against a trained agent
    Play(tdtactoe::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => tdtactoe::cli::commands::train::execute(*args),
        Commands::Play(args) => tdtactoe::cli::commands::play::execute(args),
    }
}
