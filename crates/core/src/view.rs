// Copyright (C) 2025 Holdem Table Developers
// SPDX-License-Identifier: Apache-2.0

//! Read only table projections for observers.
use serde::{Deserialize, Serialize};

use crate::{
    player::{Player, Role},
    poker::{Card, Chips, PlayerId},
};

/// A player state as seen from outside the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    /// The player id.
    pub player_id: PlayerId,
    /// The player nickname.
    pub nickname: String,
    /// The player is a bot.
    pub is_bot: bool,
    /// The player chips.
    pub chips: Chips,
    /// The chips the player owes to match the bet.
    pub call: Chips,
    /// The player blind role.
    pub role: Role,
    /// The player has folded this round.
    pub is_folded: bool,
    /// The player has met the bet.
    pub is_called: bool,
    /// It's this player turn.
    pub has_turn: bool,
    /// The player hole cards.
    pub cards: Vec<Card>,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            player_id: player.player_id().clone(),
            nickname: player.nickname().to_string(),
            is_bot: player.is_bot(),
            chips: player.chips(),
            call: player.call(),
            role: player.role(),
            is_folded: player.is_folded(),
            is_called: player.is_called(),
            has_turn: player.has_turn(),
            cards: player.cards().to_vec(),
        }
    }
}

/// A table state as seen from outside the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    /// The players in seating order.
    pub players: Vec<PlayerView>,
    /// The board cards.
    pub board: Vec<Card>,
    /// The chips in the pot.
    pub pot: Chips,
    /// The round number.
    pub round: u32,
    /// The small blind.
    pub small_blind: Chips,
    /// The raise amount.
    pub raise: Chips,
    /// All the players in the round have met the bet.
    pub is_all_called: bool,
    /// At most one player is left in the round.
    pub is_all_folded: bool,
    /// The board has at least one card.
    pub is_flopped: bool,
    /// The board is complete.
    pub is_showdown: bool,
}

impl TableView {
    /// The player who has the turn.
    pub fn current_turn(&self) -> Option<&PlayerView> {
        self.players.iter().find(|p| p.has_turn)
    }

    /// A player by id.
    pub fn player(&self, player_id: &PlayerId) -> Option<&PlayerView> {
        self.players.iter().find(|p| &p.player_id == player_id)
    }

    /// The total chips at the table, players stacks plus the pot.
    pub fn total_chips(&self) -> Chips {
        self.players.iter().map(|p| p.chips).sum::<Chips>() + self.pot
    }
}
