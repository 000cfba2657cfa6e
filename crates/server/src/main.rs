// Copyright (C) 2025 Holdem Table Developers
// SPDX-License-Identifier: Apache-2.0
use clap::Parser;
use log::error;
use std::path::PathBuf;

#[derive(Debug, Parser)]
struct Cli {
    /// Number of bots at the table.
    #[clap(long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(2..=10))]
    players: u8,
    /// Chips each bot starts with.
    #[clap(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..=1_000_000))]
    chips: u32,
    /// Stop after this many rounds.
    #[clap(long, default_value_t = 100)]
    max_rounds: u32,
    /// The snapshots database path.
    #[clap(long)]
    db_path: Option<PathBuf>,
    /// Seed for the table shuffles.
    #[clap(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let config = holdem_server::Config {
        players: cli.players as usize,
        chips: cli.chips,
        max_rounds: cli.max_rounds,
        db_path: cli.db_path,
        seed: cli.seed,
    };

    if let Err(e) = holdem_server::run(config).await {
        error!("{e}");
    }
}
