//! # Hitlist - Chat-economy assassination raids
//!
//! This is the main entry point that wires everything together.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  main.rs (this file) - Dependency Injection & Wiring           │
//! │    │                                                            │
//! │    ├── Creates: EconomyStore (adapter, JSON documents)         │
//! │    ├── Creates: SeededDice / EntropyDice (adapter)             │
//! │    ├── Creates: RaidService, DefenseService (use cases)        │
//! │    └── Runs: ChatHost over stdin or a script                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage:
//!   hitlist                          - Chat on stdin, in-memory economy
//!   hitlist --data-dir ./data        - Persist documents under ./data
//!   hitlist --script raid.txt        - Replay a transcript
//!   hitlist --config hitlist.json    - Load settings from a file

mod chat;
mod commands;
mod game;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use hitlist_adapter::{EconomyStore, EntropyDice, SeededDice};
use hitlist_domain::RollSource;
use hitlist_usecase::{DefenseService, EconomyPorts, RaidService};
use shared::{GameConfig, HitlistError};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::chat::{ChatHost, ConsoleOutbox};
use crate::game::Game;

#[derive(Parser)]
#[command(name = "hitlist")]
#[command(about = "Hitlist - Assassination raids for a chat economy")]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the JSON documents (in-memory when omitted)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Seed the dice for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Replay `<user> <command>` lines from a file, then exit
    #[arg(long)]
    script: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => GameConfig::default(),
    }
    .with_overrides(cli.data_dir.clone(), cli.seed);

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("🎯 Hitlist starting");

    // ========================================
    // Dependency Injection - Wire up the system
    // ========================================

    let store = match &config.data_dir {
        Some(dir) => EconomyStore::open(dir).map_err(|e| HitlistError::Storage(e.to_string()))?,
        None => EconomyStore::in_memory(),
    };
    let ports = EconomyPorts::from_store(Arc::new(store));

    let raids = RaidService::new(ports.clone(), dice(config.seed, 0));
    let defense = DefenseService::new(ports.clone(), dice(config.seed, 1));
    let game = Arc::new(Game::new(raids, defense, &ports));

    let host = ChatHost::new(game, Arc::new(ConsoleOutbox::new()));

    info!(
        data_dir = ?config.data_dir,
        seed = ?config.seed,
        "economy ready"
    );

    match &cli.script {
        Some(script) => host
            .replay(script)
            .await
            .with_context(|| format!("replaying {}", script.display()))?,
        None => {
            info!("reading `<user> <command>` lines from stdin");
            host.run(BufReader::new(tokio::io::stdin())).await?
        }
    }

    info!("🎯 Hitlist stopped");
    Ok(())
}

/// Independent streams for combat and guard placement
fn dice(seed: Option<u64>, stream: u64) -> Box<dyn RollSource> {
    match seed {
        Some(seed) => Box::new(SeededDice::new(seed.wrapping_add(stream))),
        None => Box::new(EntropyDice::new()),
    }
}
