//! Vetrolisci simulator CLI: plays complete games in memory between scripted
//! agents, through the same engine the server runs.

mod agents;
mod output;
mod simulator;

use std::time::Instant;

use agents::AgentKind;
use clap::Parser;
use output::{OutputWriter, Summary};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use simulator::Simulator;
use tracing::{info, warn};
use vetrolisci::domain::derive_session_seed;

#[derive(Parser)]
#[command(name = "vetrolisci-sim")]
#[command(about = "In-memory Vetrolisci games between scripted agents")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Base seed; each game derives its own. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Agent for seat 0
    #[arg(long, default_value = "greedy")]
    agent0: AgentKind,

    /// Agent for seat 1
    #[arg(long, default_value = "random")]
    agent1: AgentKind,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays pure JSON lines.
    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let base_seed = args.seed.unwrap_or_else(rand::random);
    info!(
        games = args.games,
        base_seed,
        agent0 = ?args.agent0,
        agent1 = ?args.agent1,
        "Starting simulation"
    );

    let mut writer = OutputWriter::new(std::io::stdout().lock());
    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for game in 1..=args.games {
        let seed = derive_session_seed(base_seed, i64::from(game));
        let mut seats = [
            args.agent0.build(ChaCha8Rng::seed_from_u64(seed ^ 0xA5A5)),
            args.agent1.build(ChaCha8Rng::seed_from_u64(seed ^ 0x5A5A)),
        ];

        match Simulator::new(game, seed).simulate_game(&mut seats) {
            Ok(result) => {
                writer.write_game(&result)?;
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!(game, seed, error = %e, "Game failed");
            }
        }
    }

    info!(elapsed = ?start.elapsed(), "Simulation finished");
    writer.write_summary(&Summary::from_results(&results, errors))?;
    Ok(())
}
