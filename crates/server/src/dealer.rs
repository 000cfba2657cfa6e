// Copyright (C) 2025 Holdem Table Developers
// SPDX-License-Identifier: Apache-2.0

//! Round driver.
//!
//! The [Dealer] plays complete rounds on a table: it shuffles and deals, posts
//! the blinds, runs the betting streets, pays the winners, and removes the
//! players who ran out of chips. Bots decide their action from their chance
//! of winning at showdown.
use anyhow::Result;
use log::{debug, info, warn};

use holdem_core::{
    error::TableError,
    poker::{Chips, PlayerId},
    view::{PlayerView, TableView},
};

use crate::{
    db::Db,
    table::{TableAction, TableHandle},
};

/// The result of a round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundOutcome {
    /// The round number.
    pub round: u32,
    /// The players who won the pot.
    pub winners: Vec<PlayerId>,
    /// The chips paid to the winners.
    pub pot: Chips,
    /// The pot was decided by comparing hands.
    pub showdown: bool,
    /// The players who ran out of chips and left the table.
    pub eliminated: Vec<PlayerId>,
}

/// Plays rounds on a table.
#[derive(Debug)]
pub struct Dealer {
    table_id: String,
    table: TableHandle,
    db: Db,
    max_rounds: u32,
}

impl Dealer {
    /// Bots raise with at least this chance of winning.
    const RAISE_CHANCE: f64 = 0.65;
    /// Bots call with at least this chance of winning.
    const CALL_CHANCE: f64 = 0.4;
    /// Raises allowed in a betting street.
    const MAX_RAISES: usize = 3;
    /// Upper bound on the actions in a betting street.
    const MAX_ACTIONS: usize = 256;
    /// Board cards dealt before each betting street.
    const STREETS: [usize; 4] = [0, 3, 1, 1];

    /// Creates a dealer for a table, a snapshot is saved after each round.
    pub fn new(table_id: &str, table: TableHandle, db: Db, max_rounds: u32) -> Self {
        Self {
            table_id: table_id.to_string(),
            table,
            db,
            max_rounds,
        }
    }

    /// Plays rounds until one player is left or the rounds limit is reached.
    pub async fn run(&self) -> Result<TableView> {
        loop {
            let view = self.table.view().await?;
            if view.players.len() < 2 {
                if let Some(winner) = view.players.first() {
                    info!("Player {} wins the table with {}", winner.nickname, winner.chips);
                }
                return Ok(view);
            }

            if view.round >= self.max_rounds {
                info!("Stopping after {} rounds", view.round);
                return Ok(view);
            }

            let outcome = self.play_round().await?;
            debug!("{outcome:?}");
        }
    }

    /// Plays a single round.
    pub async fn play_round(&self) -> Result<RoundOutcome> {
        let (ids, summary) = self
            .table
            .with(|table| {
                table.shuffle();
                let ids = table
                    .players()
                    .iter()
                    .map(|p| p.player_id().clone())
                    .collect::<Vec<_>>();
                for _ in 0..2 {
                    for id in &ids {
                        table.deal_card(id)?;
                    }
                }
                Ok::<_, TableError>((ids, table.seats_summary()))
            })
            .await??;

        info!("Dealing to {summary}");

        for id in &ids {
            if let Err(err) = self.table.action(id, TableAction::Blind).await? {
                warn!("Blind for {id} rejected: {err}");
            }
        }

        for cards in Self::STREETS {
            if cards > 0 {
                self.table
                    .with(move |table| {
                        table.new_bet();
                        (0..cards).try_for_each(|_| table.flop_card().map(|_| ()))
                    })
                    .await??;
            }

            self.betting().await?;

            if self.table.view().await?.is_all_folded {
                break;
            }
        }

        let outcome = self
            .table
            .with(|table| {
                let round = table.round();
                let showdown = !table.is_all_folded();
                let winners = if showdown {
                    table.winners()
                } else {
                    table.active_players()
                }
                .into_iter()
                .map(|p| p.player_id().clone())
                .collect::<Vec<_>>();

                let pot = match winners.as_slice() {
                    [winner] => table.flush_pot(winner)?,
                    winners => table.split_pot(winners)?,
                };

                let eliminated = table
                    .collect_players()
                    .into_iter()
                    .map(|p| p.player_id().clone())
                    .collect();
                table.shift_roles();

                Ok::<_, TableError>(RoundOutcome {
                    round,
                    winners,
                    pot,
                    showdown,
                    eliminated,
                })
            })
            .await??;

        let snapshot = self.table.snapshot().await?;
        self.db
            .save_table(&self.table_id, outcome.round, snapshot)
            .await?;

        Ok(outcome)
    }

    /// Runs a betting street until all the players in the round have called
    /// or only one is left.
    async fn betting(&self) -> Result<()> {
        let mut raises = 0;

        for _ in 0..Self::MAX_ACTIONS {
            let view = self.table.view().await?;
            if view.is_all_called || view.is_all_folded {
                return Ok(());
            }

            if let Some(player) = view
                .current_turn()
                .filter(|p| !p.is_folded && !p.is_called)
            {
                let action = self.decide(player, raises).await?;
                match self.table.action(&player.player_id, action).await? {
                    Ok(chips) => {
                        if action == TableAction::Raise {
                            raises += 1;
                        }
                        debug!("{} {action:?} {chips}", player.nickname);
                    }
                    Err(err) => warn!("{} {action:?} rejected: {err}", player.nickname),
                }
            }

            self.table
                .with(|table| {
                    table.turn();
                })
                .await?;
        }

        warn!("Betting stopped after {} actions", Self::MAX_ACTIONS);
        Ok(())
    }

    /// Picks the action for a player, seats that are not bots check or call.
    async fn decide(&self, player: &PlayerView, raises: usize) -> Result<TableAction> {
        if player.chips.is_zero() || !player.is_bot {
            return Ok(TableAction::Call);
        }

        let chance = self.table.chance(&player.player_id).await?.unwrap_or(0.5);
        let action = if chance >= Self::RAISE_CHANCE && raises < Self::MAX_RAISES {
            TableAction::Raise
        } else if chance >= Self::CALL_CHANCE || player.call.is_zero() {
            TableAction::Call
        } else {
            TableAction::Fold
        };

        debug!("{} chance {chance:.3} {action:?}", player.nickname);
        Ok(action)
    }
}
