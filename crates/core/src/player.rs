// Copyright (C) 2025 Holdem Table Developers
// SPDX-License-Identifier: Apache-2.0

//! Table player types.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    error::TableError,
    poker::{Card, Chips, PlayerId},
};

/// The player blind role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Posts the small blind.
    SmallBlind,
    /// Posts the big blind.
    BigBlind,
    /// No blind.
    #[default]
    None,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::SmallBlind => f.write_str("SB"),
            Role::BigBlind => f.write_str("BB"),
            Role::None => Ok(()),
        }
    }
}

/// A table player state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// The player id.
    player_id: PlayerId,
    /// This player nickname.
    nickname: String,
    /// This player is a bot.
    is_bot: bool,
    /// This player chips.
    chips: Chips,
    /// The hole cards.
    cards: Vec<Card>,
    /// The player blind role.
    role: Role,
    /// The player folded this round.
    is_folded: bool,
    /// It's this player turn.
    has_turn: bool,
    /// The chips this player still owes to match the bet.
    call: Chips,
    /// The player has met the bet.
    is_called: bool,
}

impl Player {
    /// Maximum number of hole cards.
    pub const HOLE_CARDS: usize = 2;

    /// Creates a new player.
    pub fn new(player_id: PlayerId, nickname: String, chips: Chips) -> Self {
        Self {
            player_id,
            nickname,
            is_bot: false,
            chips,
            cards: Vec::with_capacity(Self::HOLE_CARDS),
            role: Role::None,
            is_folded: false,
            has_turn: false,
            call: Chips::ZERO,
            is_called: false,
        }
    }

    /// Creates a new bot player.
    pub fn new_bot(player_id: PlayerId, nickname: String, chips: Chips) -> Self {
        Self {
            is_bot: true,
            ..Self::new(player_id, nickname, chips)
        }
    }

    /// The player id.
    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    /// The player nickname.
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// The nickname followed by the role if the player has one.
    pub fn nickname_with_role(&self) -> String {
        match self.role {
            Role::None => self.nickname.clone(),
            role => format!("{}({role})", self.nickname),
        }
    }

    /// Checks if this player is a bot.
    pub fn is_bot(&self) -> bool {
        self.is_bot
    }

    /// The player chips.
    pub fn chips(&self) -> Chips {
        self.chips
    }

    /// The player hole cards.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The player role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Checks if the player has folded this round.
    pub fn is_folded(&self) -> bool {
        self.is_folded
    }

    /// Checks if it's this player turn.
    pub fn has_turn(&self) -> bool {
        self.has_turn
    }

    /// The chips this player still owes to match the bet.
    pub fn call(&self) -> Chips {
        self.call
    }

    /// Checks if the player has met the bet.
    pub fn is_called(&self) -> bool {
        self.is_called
    }

    /// Adds a hole card, fails if the player already holds two cards.
    pub fn add_card(&mut self, card: Card) -> Result<(), TableError> {
        if self.cards.len() >= Self::HOLE_CARDS {
            return Err(TableError::HandFull(self.player_id.clone()));
        }

        self.cards.push(card);
        Ok(())
    }

    /// Takes the chips owed for the bet, or all the chips if the player
    /// doesn't have enough.
    pub fn take(&mut self) -> Chips {
        let take = self.call.min(self.chips);
        self.chips -= take;
        self.call -= take;
        take
    }

    /// Adds chips to this player stack.
    pub fn put(&mut self, chips: Chips) {
        self.chips += chips;
    }

    /// Raises the chips owed by this player, the player has to act again.
    pub fn raise_call(&mut self, raise: Chips) {
        self.call += raise;
        self.is_called = false;
    }

    /// Folds this player until the next round.
    pub fn fold(&mut self) {
        self.is_folded = true;
    }

    /// Reset state for a new round.
    pub fn reset(&mut self) {
        self.cards.clear();
        self.is_folded = false;
        self.call = Chips::ZERO;
        self.is_called = false;
    }

    pub(crate) fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub(crate) fn set_turn(&mut self, has_turn: bool) {
        self.has_turn = has_turn;
    }

    pub(crate) fn set_call(&mut self, call: Chips) {
        self.call = call;
    }

    pub(crate) fn set_called(&mut self, is_called: bool) {
        self.is_called = is_called;
    }
}
