//! oxo CLI - Terminal tic-tac-toe
//!
//! Commands:
//! - play: interactive game in the terminal (pvp or pvc)
//! - match: auto-play heuristic-vs-heuristic games and report results

use clap::{Parser, Subcommand};

mod match_cmd;
mod play;

#[derive(Parser)]
#[command(name = "oxo")]
#[command(about = "Tic-tac-toe with score tracking and a heuristic computer opponent")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively in the terminal
    Play {
        /// Game mode: pvp or pvc
        #[arg(long, default_value = "pvc")]
        mode: String,
        /// RNG seed for the computer's tie-breaking
        #[arg(long)]
        seed: Option<u64>,
        /// Computer "thinking" delay in milliseconds
        #[arg(long, default_value = "500")]
        delay_ms: u64,
    },
    /// Auto-play computer-vs-computer games
    Match {
        /// Number of games to play
        #[arg(long, default_value = "10")]
        games: usize,
        /// RNG seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play { mode, seed, delay_ms } => play::run(&mode, seed, delay_ms),
        Commands::Match { games, seed, json } => match_cmd::run(games, seed, json),
    }
}
