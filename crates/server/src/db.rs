// Copyright (C) 2025 Holdem Table Developers
// SPDX-License-Identifier: Apache-2.0

//! Database types for persisting table snapshots.
use anyhow::Result;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use std::{path::Path, sync::Arc};

use holdem_core::table::Table;

/// Database for persisting the tables state.
#[derive(Debug, Clone)]
pub struct Db {
    db: Arc<Mutex<Connection>>,
}

impl Db {
    /// Open a database.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    /// Open a database in memory.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS tables (
               id TEXT PRIMARY KEY,
               round INTEGER NOT NULL,
               snapshot BLOB NOT NULL,
               created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
               last_update DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
            (),
        )?;

        Ok(Db {
            db: Arc::new(Mutex::new(conn)),
        })
    }

    /// Stores the latest snapshot of a table, replacing the previous one.
    pub async fn save_table(&self, table_id: &str, round: u32, snapshot: Vec<u8>) -> Result<()> {
        let db = self.db.clone();
        let table_id = table_id.to_string();
        tokio::task::spawn_blocking(move || {
            let db = db.lock();

            db.execute(
                "INSERT INTO tables (id, round, snapshot, last_update)
                 VALUES (?1, ?2, ?3, CURRENT_TIMESTAMP)
                 ON CONFLICT(id) DO UPDATE SET
                   round = excluded.round,
                   snapshot = excluded.snapshot,
                   last_update = CURRENT_TIMESTAMP",
                params![table_id, round, snapshot],
            )?;

            Ok(())
        })
        .await?
    }

    /// Loads the latest snapshot of a table, `None` if it was never saved.
    pub async fn load_table(&self, table_id: &str) -> Result<Option<Table>> {
        let db = self.db.clone();
        let table_id = table_id.to_string();
        let snapshot = tokio::task::spawn_blocking(move || {
            let db = db.lock();

            db.query_row(
                "SELECT snapshot FROM tables WHERE id = ?1",
                params![table_id],
                |row| row.get::<usize, Vec<u8>>(0),
            )
            .optional()
        })
        .await??;

        match snapshot {
            Some(bytes) => Ok(Some(Table::from_bytes(&bytes)?)),
            None => Ok(None),
        }
    }
}
