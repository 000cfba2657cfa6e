// Copyright (C) 2025 Holdem Table Developers
// SPDX-License-Identifier: Apache-2.0

//! Table owner task.
//!
//! A [Table] is owned by a single task that applies commands in the order
//! they are received, callers talk to it through a cloneable [TableHandle].
//! Every command runs to completion before the next one starts, so all the
//! observers see consistent table states.
use anyhow::{Result, anyhow};
use log::{error, info};
use tokio::sync::{broadcast, mpsc, oneshot};

use holdem_core::{
    error::ActionError,
    poker::{Chips, PlayerId, Probability},
    table::Table,
    view::TableView,
};

/// A betting action from a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    /// Post the blind for the player role.
    Blind,
    /// Pay what the player owes.
    Call,
    /// Raise by the table raise amount.
    Raise,
    /// Leave the round.
    Fold,
}

/// The chips moved by an accepted action, or why it was rejected.
pub type ActionReply = std::result::Result<Chips, ActionError>;

type TableFn = Box<dyn FnOnce(&mut Table) + Send>;

/// Command for the table task.
enum TableCommand {
    /// Seat a player.
    Join {
        player_id: PlayerId,
        nickname: String,
        is_bot: bool,
        resp_tx: oneshot::Sender<Result<()>>,
    },
    /// Remove a player.
    Leave {
        player_id: PlayerId,
        resp_tx: oneshot::Sender<bool>,
    },
    /// A player betting action.
    Action {
        player_id: PlayerId,
        action: TableAction,
        resp_tx: oneshot::Sender<ActionReply>,
    },
    /// Run a closure on the table.
    Exec(TableFn),
}

/// Handle to a table running in its own task.
#[derive(Debug, Clone)]
pub struct TableHandle {
    /// Channel for sending commands.
    commands_tx: mpsc::Sender<TableCommand>,
}

impl std::fmt::Debug for TableCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Join { player_id, .. } => write!(f, "Join({player_id})"),
            Self::Leave { player_id, .. } => write!(f, "Leave({player_id})"),
            Self::Action {
                player_id, action, ..
            } => write!(f, "Action({player_id}, {action:?})"),
            Self::Exec(_) => f.write_str("Exec"),
        }
    }
}

impl TableHandle {
    /// Spawns the task that owns the table.
    ///
    /// The task stops when the shutdown broadcast fires or all the handles are
    /// dropped, it drops its `shutdown_complete_tx` when done.
    pub fn spawn(
        table_id: &str,
        table: Table,
        shutdown_broadcast_rx: broadcast::Receiver<()>,
        shutdown_complete_tx: mpsc::Sender<()>,
    ) -> Self {
        let (commands_tx, commands_rx) = mpsc::channel(128);

        let mut task = TableTask {
            table_id: table_id.to_string(),
            table,
            commands_rx,
            shutdown_broadcast_rx,
            _shutdown_complete_tx: shutdown_complete_tx,
        };

        tokio::spawn(async move {
            if let Err(err) = task.run().await {
                error!("Table {} error {err}", task.table_id);
            }

            info!("Table task for table {} stopped", task.table_id);
        });

        Self { commands_tx }
    }

    /// A player joins this table.
    ///
    /// Returns error if the player has already joined.
    pub async fn join(&self, player_id: &PlayerId, nickname: &str, is_bot: bool) -> Result<()> {
        let (resp_tx, resp_rx) = oneshot::channel();

        self.send(TableCommand::Join {
            player_id: player_id.clone(),
            nickname: nickname.to_string(),
            is_bot,
            resp_tx,
        })
        .await?;

        resp_rx.await?
    }

    /// A player leaves the table, returns false if the player was not seated.
    pub async fn leave(&self, player_id: &PlayerId) -> Result<bool> {
        let (resp_tx, resp_rx) = oneshot::channel();

        self.send(TableCommand::Leave {
            player_id: player_id.clone(),
            resp_tx,
        })
        .await?;

        Ok(resp_rx.await?)
    }

    /// Applies a player action.
    pub async fn action(&self, player_id: &PlayerId, action: TableAction) -> Result<ActionReply> {
        let (resp_tx, resp_rx) = oneshot::channel();

        self.send(TableCommand::Action {
            player_id: player_id.clone(),
            action,
            resp_tx,
        })
        .await?;

        Ok(resp_rx.await?)
    }

    /// Runs a closure on the table in the owner task and returns its result.
    pub async fn with<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Table) -> T + Send + 'static,
        T: Send + 'static,
    {
        let (resp_tx, resp_rx) = oneshot::channel();

        self.send(TableCommand::Exec(Box::new(move |table| {
            let _ = resp_tx.send(f(table));
        })))
        .await?;

        Ok(resp_rx.await?)
    }

    /// A snapshot of the table state.
    pub async fn view(&self) -> Result<TableView> {
        self.with(|table| table.view()).await
    }

    /// The encoded table state.
    pub async fn snapshot(&self) -> Result<Vec<u8>> {
        self.with(|table| table.to_bytes()).await?.map_err(Into::into)
    }

    /// The estimated chance a player wins at showdown.
    ///
    /// The estimate runs on the blocking pool so the table task keeps serving
    /// commands. Returns `None` if the player has no hole cards.
    pub async fn chance(&self, player_id: &PlayerId) -> Result<Option<f64>> {
        let player_id = player_id.clone();
        let cards = self
            .with(move |table| {
                let hole = table.player(&player_id)?.cards().to_vec();
                Some((hole, table.board().to_vec()))
            })
            .await?;

        match cards {
            Some((hole, board)) if hole.len() == 2 => {
                let chance = tokio::task::spawn_blocking(move || {
                    Probability::new(&board).chance(&hole)
                })
                .await?;
                Ok(Some(chance))
            }
            _ => Ok(None),
        }
    }

    async fn send(&self, cmd: TableCommand) -> Result<()> {
        self.commands_tx
            .send(cmd)
            .await
            .map_err(|_| anyhow!("Table task stopped"))
    }
}

struct TableTask {
    /// This table identifier.
    table_id: String,
    /// The table state.
    table: Table,
    /// Channel for receiving table commands.
    commands_rx: mpsc::Receiver<TableCommand>,
    /// Channel for listening shutdown notification.
    shutdown_broadcast_rx: broadcast::Receiver<()>,
    /// Sender that drops when this task is done.
    _shutdown_complete_tx: mpsc::Sender<()>,
}

impl TableTask {
    async fn run(&mut self) -> Result<()> {
        loop {
            tokio::select! {
                // Server is shutting down exit this handler.
                _ = self.shutdown_broadcast_rx.recv() => break Ok(()),
                res = self.commands_rx.recv() => match res {
                    Some(cmd) => self.handle(cmd),
                    None => break Ok(()),
                },
            }
        }
    }

    fn handle(&mut self, cmd: TableCommand) {
        match cmd {
            TableCommand::Join {
                player_id,
                nickname,
                is_bot,
                resp_tx,
            } => {
                let res = self
                    .table
                    .add_player(player_id, &nickname, is_bot)
                    .map(|_| ())
                    .map_err(Into::into);
                let _ = resp_tx.send(res);
            }
            TableCommand::Leave { player_id, resp_tx } => {
                let removed = self.table.remove_player(&player_id).is_some();
                let _ = resp_tx.send(removed);
            }
            TableCommand::Action {
                player_id,
                action,
                resp_tx,
            } => {
                let reply = match action {
                    TableAction::Blind => self.table.blind(&player_id),
                    TableAction::Call => self.table.call(&player_id),
                    TableAction::Raise => self.table.raise(&player_id),
                    TableAction::Fold => self.table.fold(&player_id).map(|_| Chips::ZERO),
                };
                let _ = resp_tx.send(reply);
            }
            TableCommand::Exec(f) => f(&mut self.table),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_core::table::TableConfig;
    use rand::{SeedableRng, rngs::StdRng};

    // The task stops when the shutdown sender drops, tests hold on to it.
    struct Fixture {
        handle: TableHandle,
        shutdown_broadcast_tx: broadcast::Sender<()>,
        shutdown_complete_rx: mpsc::Receiver<()>,
    }

    fn spawn_table() -> Fixture {
        let table = Table::with_rng(TableConfig::default(), StdRng::seed_from_u64(7));
        let (shutdown_broadcast_tx, shutdown_broadcast_rx) = broadcast::channel(1);
        let (shutdown_complete_tx, shutdown_complete_rx) = mpsc::channel(1);
        let handle = TableHandle::spawn("t1", table, shutdown_broadcast_rx, shutdown_complete_tx);

        Fixture {
            handle,
            shutdown_broadcast_tx,
            shutdown_complete_rx,
        }
    }

    #[tokio::test]
    async fn join_and_leave() {
        let fixture = spawn_table();
        let handle = &fixture.handle;
        let alice = PlayerId::from("alice");

        handle.join(&alice, "Alice", false).await.unwrap();
        assert!(handle.join(&alice, "Alice", false).await.is_err());
        handle.join(&"bob".into(), "Bob", true).await.unwrap();

        let view = handle.view().await.unwrap();
        assert_eq!(view.players.len(), 2);
        assert_eq!(view.current_turn().unwrap().player_id, alice);

        assert!(handle.leave(&alice).await.unwrap());
        assert!(!handle.leave(&alice).await.unwrap());
        assert_eq!(handle.view().await.unwrap().players.len(), 1);
    }

    #[tokio::test]
    async fn actions() {
        let fixture = spawn_table();
        let handle = &fixture.handle;
        let alice = PlayerId::from("alice");
        let bob = PlayerId::from("bob");
        handle.join(&alice, "Alice", false).await.unwrap();
        handle.join(&bob, "Bob", false).await.unwrap();
        handle.with(|table| table.shuffle()).await.unwrap();

        let reply = handle.action(&alice, TableAction::Blind).await.unwrap();
        assert_eq!(reply, Ok(Chips::new(1)));
        let reply = handle.action(&bob, TableAction::Blind).await.unwrap();
        assert_eq!(reply, Ok(Chips::new(2)));
        let reply = handle.action(&alice, TableAction::Raise).await.unwrap();
        assert_eq!(reply, Ok(Chips::new(5)));
        let reply = handle.action(&alice, TableAction::Call).await.unwrap();
        assert_eq!(reply, Err(ActionError::AlreadyCalled));
        let reply = handle.action(&bob, TableAction::Fold).await.unwrap();
        assert_eq!(reply, Ok(Chips::ZERO));

        let unknown = PlayerId::from("carol");
        let reply = handle.action(&unknown, TableAction::Call).await.unwrap();
        assert_eq!(reply, Err(ActionError::NotSeated(unknown)));

        let view = handle.view().await.unwrap();
        assert_eq!(view.pot, Chips::new(9));
        assert_eq!(view.total_chips(), Chips::new(200));
        assert!(view.is_all_folded);
    }

    #[tokio::test]
    async fn concurrent_actions_are_serialized() {
        let fixture = spawn_table();
        let handle = &fixture.handle;
        let ids = (0..8)
            .map(|n| PlayerId::new(format!("p{n}")))
            .collect::<Vec<_>>();
        for id in &ids {
            handle.join(id, id.as_str(), true).await.unwrap();
        }
        handle.with(|table| table.shuffle()).await.unwrap();

        let tasks = ids
            .iter()
            .cloned()
            .map(|id| {
                let handle = handle.clone();
                tokio::spawn(async move {
                    handle.action(&id, TableAction::Blind).await.unwrap().unwrap();
                    handle.action(&id, TableAction::Call).await.unwrap().unwrap();
                    handle.view().await.unwrap()
                })
            })
            .collect::<Vec<_>>();

        for task in tasks {
            // Every intermediate view keeps the chips total.
            let view = task.await.unwrap();
            assert_eq!(view.total_chips(), Chips::new(800));
        }

        let view = handle.view().await.unwrap();
        assert!(view.is_all_called);
        assert_eq!(view.pot, Chips::new(16));
    }

    #[tokio::test]
    async fn chance_and_snapshot() {
        let fixture = spawn_table();
        let handle = &fixture.handle;
        let alice = PlayerId::from("alice");
        handle.join(&alice, "Alice", false).await.unwrap();
        assert_eq!(handle.chance(&alice).await.unwrap(), None);

        let a = alice.clone();
        handle
            .with(move |table| {
                table.shuffle();
                table.deal_card(&a).unwrap();
                table.deal_card(&a).unwrap();
                for _ in 0..4 {
                    table.flop_card().unwrap();
                }
            })
            .await
            .unwrap();

        let chance = handle.chance(&alice).await.unwrap().unwrap();
        assert!((0.0..=1.0).contains(&chance));
        assert_eq!(handle.chance(&"bob".into()).await.unwrap(), None);

        let bytes = handle.snapshot().await.unwrap();
        let table = Table::from_bytes(&bytes).unwrap();
        assert_eq!(table.view(), handle.view().await.unwrap());
    }

    #[tokio::test]
    async fn shutdown() {
        let Fixture {
            handle,
            shutdown_broadcast_tx,
            mut shutdown_complete_rx,
        } = spawn_table();

        drop(shutdown_broadcast_tx);
        assert!(shutdown_complete_rx.recv().await.is_none());
        assert!(handle.view().await.is_err());
    }
}
