// Copyright (C) 2025 Holdem Table Developers
// SPDX-License-Identifier: Apache-2.0

//! Table errors.
use thiserror::Error;

use crate::poker::{ExhaustedDeck, PlayerId};

/// A player action that was rejected, the table state is unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// There is no seat for this player.
    #[error("player {0} is not seated at the table")]
    NotSeated(PlayerId),
    /// The player has already met the current bet.
    #[error("player has already called")]
    AlreadyCalled,
    /// The player has folded this round.
    #[error("player has folded")]
    Folded,
    /// The player has no chips left.
    #[error("player has no chips")]
    NoChips,
}

/// Table errors that are not player actions.
#[derive(Debug, Error)]
pub enum TableError {
    /// More cards were drawn than the deck holds.
    #[error(transparent)]
    Deck(#[from] ExhaustedDeck),
    /// The board has already five cards.
    #[error("the board is complete")]
    BoardComplete,
    /// The player already holds two cards.
    #[error("player {0} already holds two cards")]
    HandFull(PlayerId),
    /// A player with the same id is already at the table.
    #[error("player {0} is already seated")]
    AlreadySeated(PlayerId),
    /// The action was rejected.
    #[error(transparent)]
    Action(#[from] ActionError),
    /// The table snapshot could not be encoded or decoded.
    #[error("snapshot error {0}")]
    Snapshot(#[from] bincode::Error),
}
