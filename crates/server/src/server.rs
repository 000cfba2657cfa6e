// Copyright (C) 2025 Holdem Table Developers
// SPDX-License-Identifier: Apache-2.0

//! Self play table runner.
use anyhow::{Result, bail};
use log::info;
use rand::{SeedableRng, rngs::StdRng};
use std::path::PathBuf;
use tokio::{
    signal,
    sync::{broadcast, mpsc},
};

use holdem_core::{
    poker::{Chips, PlayerId},
    table::{Table, TableConfig},
    view::TableView,
};

use crate::{dealer::Dealer, db::Db, table::TableHandle};

/// Runner configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// The number of bots at the table.
    pub players: usize,
    /// The chips each bot starts with.
    pub chips: u32,
    /// Stop after this many rounds.
    pub max_rounds: u32,
    /// The database path, snapshots are kept in memory if not set.
    pub db_path: Option<PathBuf>,
    /// Seed for the table shuffles.
    pub seed: Option<u64>,
}

/// The table id used by the runner.
const TABLE_ID: &str = "main";

/// Runs a table with bots until a bot wins all the chips, the rounds limit is
/// reached, or the process gets a shutdown signal.
///
/// A table saved in the database is resumed from its last snapshot.
pub async fn run(config: Config) -> Result<Option<TableView>> {
    if config.players < 2 {
        bail!("At least 2 players are needed, got {}", config.players);
    }

    let db = match &config.db_path {
        Some(path) => Db::open(path)?,
        None => Db::open_in_memory()?,
    };

    let table = match db.load_table(TABLE_ID).await? {
        Some(table) => {
            info!("Resuming table {TABLE_ID} at round {}", table.round());
            table
        }
        None => new_table(&config),
    };
    let is_new = table.players().is_empty();

    let (shutdown_broadcast_tx, shutdown_broadcast_rx) = broadcast::channel(1);
    let (shutdown_complete_tx, mut shutdown_complete_rx) = mpsc::channel(1);
    let handle = TableHandle::spawn(TABLE_ID, table, shutdown_broadcast_rx, shutdown_complete_tx);

    if is_new {
        for n in 0..config.players {
            let player_id = PlayerId::new(format!("bot-{n}"));
            handle.join(&player_id, &format!("Bot{n}"), true).await?;
        }
    }

    let dealer = Dealer::new(TABLE_ID, handle, db, config.max_rounds);

    let view = tokio::select! {
        res = dealer.run() => Some(res?),
        _ = signal::ctrl_c() => {
            info!("Received shutdown signal...");
            None
        }
    };

    if let Some(view) = &view {
        let mut players = view.players.iter().collect::<Vec<_>>();
        players.sort_by(|p1, p2| p2.chips.cmp(&p1.chips));
        for (pos, player) in players.into_iter().enumerate() {
            info!("{}. {} {}", pos + 1, player.nickname, player.chips);
        }
    }

    // Notify the table task to stop and wait for it to drop its channel.
    drop(dealer);
    drop(shutdown_broadcast_tx);
    let _ = shutdown_complete_rx.recv().await;

    Ok(view)
}

fn new_table(config: &Config) -> Table {
    let table_config = TableConfig {
        initial_chips: Chips::new(config.chips),
    };

    match config.seed {
        Some(seed) => Table::with_rng(table_config, StdRng::seed_from_u64(seed)),
        None => Table::new(table_config),
    }
}
