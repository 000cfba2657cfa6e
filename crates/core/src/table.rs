// Copyright (C) 2025 Holdem Table Developers
// SPDX-License-Identifier: Apache-2.0

//! Table state types.
//!
//! A [Table] owns the seats, the board, the deck, and the pot of a single game
//! and applies the betting actions to them.
//!
//! The table has no interior locking: every mutation takes `&mut self` and runs
//! to completion, so an action either applies all its effects (pot, call
//! state, fold flag) or, when rejected with an [ActionError], none of them.
//! Callers that receive actions concurrently must route them through a single
//! owner, the server runs each table in its own task and sends it commands.
use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ActionError, TableError},
    player::{Player, Role},
    poker::{Card, Chips, Deck, HandValue, PlayerId, Probability},
    view::{PlayerView, TableView},
};

/// Table configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// The chips each player gets when seated.
    pub initial_chips: Chips,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_chips: Chips::new(100),
        }
    }
}

/// A single table game state.
#[derive(Debug, Serialize, Deserialize)]
pub struct Table {
    config: TableConfig,
    players: Vec<Player>,
    board: Vec<Card>,
    deck: Deck,
    pot: Chips,
    round: u32,
    raise: Chips,
    small_blind: Chips,
    #[serde(skip, default = "os_rng")]
    rng: StdRng,
}

fn os_rng() -> StdRng {
    StdRng::from_os_rng()
}

impl Table {
    const INITIAL_SMALL_BLIND: Chips = Chips::new(1);
    const INITIAL_RAISE: Chips = Chips::new(5);
    const BLIND_INCREASE: Chips = Chips::new(2);
    const RAISE_INCREASE: Chips = Chips::new(5);
    /// The small blind increases every this many rounds.
    const BLIND_ROUNDS: u32 = 3;
    /// The raise increases every this many rounds.
    const RAISE_ROUNDS: u32 = 5;
    const BOARD_SIZE: usize = 5;

    /// Creates a new table.
    pub fn new(config: TableConfig) -> Self {
        Self::with_rng(config, os_rng())
    }

    /// Creates a new table with user initialized randomness.
    pub fn with_rng(config: TableConfig, mut rng: StdRng) -> Self {
        Self {
            config,
            players: Vec::default(),
            board: Vec::default(),
            deck: Deck::new_and_shuffled(&mut rng),
            pot: Chips::ZERO,
            round: 0,
            raise: Self::INITIAL_RAISE,
            small_blind: Self::INITIAL_SMALL_BLIND,
            rng,
        }
    }

    /// Seats a player at the end of the seating order.
    ///
    /// The first player seated is the small blind and has the turn, the second
    /// one is the big blind.
    pub fn add_player(
        &mut self,
        player_id: PlayerId,
        nickname: &str,
        is_bot: bool,
    ) -> Result<&Player, TableError> {
        if self.position(&player_id).is_some() {
            return Err(TableError::AlreadySeated(player_id));
        }

        let chips = self.config.initial_chips;
        let mut player = if is_bot {
            Player::new_bot(player_id, nickname.to_string(), chips)
        } else {
            Player::new(player_id, nickname.to_string(), chips)
        };

        match self.players.len() {
            0 => {
                player.set_role(Role::SmallBlind);
                player.set_turn(true);
            }
            1 => player.set_role(Role::BigBlind),
            _ => {}
        }

        info!("Player {} joined as {}", player.player_id(), player.nickname());

        self.players.push(player);
        Ok(&self.players[self.players.len() - 1])
    }

    /// Removes a player from the table, the order of the other seats is kept.
    ///
    /// Returns `None` if the player is not at the table.
    pub fn remove_player(&mut self, player_id: &PlayerId) -> Option<Player> {
        let pos = self.position(player_id)?;
        let player = self.players.remove(pos);

        // The next seat takes the turn of the player who left.
        if player.has_turn() && !self.players.is_empty() {
            let next = self.next_unfolded(pos % self.players.len()).unwrap_or(0);
            self.players[next].set_turn(true);
        }

        info!("Player {player_id} left the table");
        Some(player)
    }

    /// Starts a new round.
    ///
    /// Increases the blind and raise amounts on schedule, replaces the deck,
    /// clears the board and the pot, and resets each player round state.
    pub fn shuffle(&mut self) {
        self.round += 1;
        self.pot = Chips::ZERO;

        if self.round % Self::BLIND_ROUNDS == 0 {
            self.small_blind += Self::BLIND_INCREASE;
        }

        if self.round % Self::RAISE_ROUNDS == 0 {
            self.raise += Self::RAISE_INCREASE;
        }

        self.deck = Deck::new_and_shuffled(&mut self.rng);
        self.board.clear();
        self.players.iter_mut().for_each(Player::reset);

        info!(
            "Round {} small blind {} raise {}",
            self.round, self.small_blind, self.raise
        );
    }

    /// Rotates the small and big blind to the next two seats.
    ///
    /// With two players the roles are swapped, with one or no player this is a
    /// no-op. If no seat has the small blind the roles go to the first seats.
    pub fn shift_roles(&mut self) {
        let n = self.players.len();
        if n <= 1 {
            return;
        }

        let sb = self
            .players
            .iter()
            .position(|p| p.role() == Role::SmallBlind)
            .map(|idx| (idx + 1) % n)
            .unwrap_or(0);
        let bb = (sb + 1) % n;

        for (idx, player) in self.players.iter_mut().enumerate() {
            let role = match idx {
                idx if idx == sb => Role::SmallBlind,
                idx if idx == bb => Role::BigBlind,
                _ => Role::None,
            };
            player.set_role(role);
        }
    }

    /// Deals a hole card to a player.
    pub fn deal_card(&mut self, player_id: &PlayerId) -> Result<Card, TableError> {
        let idx = self.seat(player_id)?;
        if self.players[idx].cards().len() >= Player::HOLE_CARDS {
            return Err(TableError::HandFull(player_id.clone()));
        }

        let card = self.deck.draw()?;
        self.players[idx].add_card(card)?;
        Ok(card)
    }

    /// Draws a card from the deck and adds it to the board.
    pub fn flop_card(&mut self) -> Result<Card, TableError> {
        if self.board.len() >= Self::BOARD_SIZE {
            return Err(TableError::BoardComplete);
        }

        let card = self.deck.draw()?;
        self.board.push(card);
        Ok(card)
    }

    /// Passes the turn to the next seat that has not folded.
    ///
    /// The scan visits each seat once and wraps around, so when all the other
    /// seats have folded the holder keeps the turn. Returns the player with the
    /// turn.
    pub fn turn(&mut self) -> Option<&Player> {
        let n = self.players.len();
        let next = match self.players.iter().position(Player::has_turn) {
            Some(current) if n > 1 => {
                self.players[current].set_turn(false);
                self.next_unfolded((current + 1) % n).unwrap_or(current)
            }
            Some(current) => current,
            None => self.next_unfolded(0).unwrap_or(0),
        };

        let player = self.players.get_mut(next)?;
        player.set_turn(true);
        Some(player)
    }

    /// The player who has the turn.
    pub fn current_turn(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.has_turn())
    }

    /// Posts the blind for the player role.
    ///
    /// The small blind posts the small blind and owes it once more, the big
    /// blind posts twice the small blind, players with no role owe the big
    /// blind. A player short of chips posts all they have. Returns the chips
    /// moved to the pot.
    pub fn blind(&mut self, player_id: &PlayerId) -> Result<Chips, ActionError> {
        let idx = self.seat(player_id)?;
        let small_blind = self.small_blind;
        let big_blind = small_blind * 2;

        let player = &mut self.players[idx];
        let posted = match player.role() {
            Role::SmallBlind => {
                player.set_call(small_blind);
                let take = player.take();
                player.set_call(small_blind);
                take
            }
            Role::BigBlind => {
                player.set_call(big_blind);
                player.take()
            }
            Role::None => {
                player.set_call(big_blind);
                Chips::ZERO
            }
        };

        self.pot += posted;
        Ok(posted)
    }

    /// The player pays what it owes, a player who runs out of chips is all in
    /// and counts as called. Returns the chips moved to the pot.
    pub fn call(&mut self, player_id: &PlayerId) -> Result<Chips, ActionError> {
        let idx = self.seat(player_id)?;
        let player = &mut self.players[idx];

        if player.is_folded() {
            return Self::reject(player_id, ActionError::Folded);
        }

        if player.is_called() {
            return Self::reject(player_id, ActionError::AlreadyCalled);
        }

        let take = player.take();
        let is_called = player.call().is_zero() || player.chips().is_zero();
        player.set_called(is_called);
        self.pot += take;
        Ok(take)
    }

    /// The player raises by the raise amount, or by all its chips if it has
    /// fewer, every other player has to act again. Returns the raise amount.
    pub fn raise(&mut self, player_id: &PlayerId) -> Result<Chips, ActionError> {
        let idx = self.seat(player_id)?;
        let player = &self.players[idx];

        if player.is_folded() {
            return Self::reject(player_id, ActionError::Folded);
        }

        if player.is_called() {
            return Self::reject(player_id, ActionError::AlreadyCalled);
        }

        if player.chips().is_zero() {
            return Self::reject(player_id, ActionError::NoChips);
        }

        let raise = self.raise.min(player.chips());
        self.raise_callers(raise);
        self.call(player_id)?;
        Ok(raise)
    }

    /// The player folds, a player who has called cannot fold.
    pub fn fold(&mut self, player_id: &PlayerId) -> Result<(), ActionError> {
        let idx = self.seat(player_id)?;
        let player = &mut self.players[idx];

        if player.is_folded() {
            return Self::reject(player_id, ActionError::Folded);
        }

        if player.is_called() {
            return Self::reject(player_id, ActionError::AlreadyCalled);
        }

        player.fold();
        Ok(())
    }

    /// Raises what each player in the round owes and reopens their action.
    fn raise_callers(&mut self, raise: Chips) {
        self.players
            .iter_mut()
            .filter(|p| !p.is_folded())
            .for_each(|p| p.raise_call(raise));
    }

    /// Starts a new betting street without changing the players chips.
    pub fn new_bet(&mut self) {
        for player in self.players.iter_mut() {
            player.set_call(Chips::ZERO);
            player.set_called(false);
        }
    }

    /// Pays the whole pot to a player. Returns the chips paid.
    pub fn flush_pot(&mut self, player_id: &PlayerId) -> Result<Chips, ActionError> {
        let idx = self.seat(player_id)?;
        let pot = std::mem::take(&mut self.pot);
        self.players[idx].put(pot);

        info!("Player {player_id} wins {pot}");
        Ok(pot)
    }

    /// Splits the pot in equal shares among tied players, the odd chips go to
    /// the first player in the list. Returns the chips paid.
    pub fn split_pot(&mut self, player_ids: &[PlayerId]) -> Result<Chips, ActionError> {
        let seats = player_ids
            .iter()
            .map(|id| self.seat(id))
            .collect::<Result<Vec<_>, _>>()?;
        if seats.is_empty() {
            return Ok(Chips::ZERO);
        }

        let pot = std::mem::take(&mut self.pot);
        let share = Chips::new(pot.amount() / seats.len() as u32);
        let odd = Chips::new(pot.amount() % seats.len() as u32);

        for (n, idx) in seats.into_iter().enumerate() {
            let win = if n == 0 { share + odd } else { share };
            self.players[idx].put(win);
            info!("Player {} wins {win}", self.players[idx].player_id());
        }

        Ok(pot)
    }

    /// Pays back the amount from the pot to each player who called and has not
    /// folded, the pot never goes below zero. Returns the chips paid back.
    pub fn refund(&mut self, amount: Chips) -> Chips {
        let mut refunded = Chips::ZERO;
        for player in self
            .players
            .iter_mut()
            .filter(|p| p.is_called() && !p.is_folded())
        {
            let refund = amount.min(self.pot);
            self.pot -= refund;
            player.put(refund);
            refunded += refund;
        }

        refunded
    }

    /// Removes and returns the players who have run out of chips.
    pub fn collect_players(&mut self) -> Vec<Player> {
        let (losers, players): (Vec<_>, Vec<_>) = std::mem::take(&mut self.players)
            .into_iter()
            .partition(|p| p.chips().is_zero());
        self.players = players;

        if losers.iter().any(Player::has_turn) && !self.players.is_empty() {
            let next = self.next_unfolded(0).unwrap_or(0);
            self.players[next].set_turn(true);
        }

        for player in &losers {
            info!("Player {} is out of chips", player.player_id());
        }

        losers
    }

    /// Checks if a player has run out of chips.
    pub fn is_someone_kaputt(&self) -> bool {
        self.players.iter().any(|p| p.chips().is_zero())
    }

    /// The player with the best hand among those who have not folded, ties go
    /// to the first seat.
    pub fn get_winner(&self) -> Option<&Player> {
        self.winners().into_iter().next()
    }

    /// All the players who have not folded and share the best hand.
    pub fn winners(&self) -> Vec<&Player> {
        let hands = self
            .players
            .iter()
            .filter(|p| !p.is_folded())
            .filter_map(|p| self.hand_value(p).map(|v| (p, v)))
            .collect::<Vec<_>>();

        let Some(best) = hands.iter().map(|(_, v)| *v).max() else {
            return Vec::default();
        };

        hands
            .into_iter()
            .filter(|(_, v)| *v == best)
            .map(|(p, _)| p)
            .collect()
    }

    /// The value of the best hand a player makes with the board.
    pub fn player_hand(&self, player_id: &PlayerId) -> Option<HandValue> {
        self.player(player_id).and_then(|p| self.hand_value(p))
    }

    /// The best five cards a player makes with the board.
    pub fn best_hand(&self, player_id: &PlayerId) -> Option<(HandValue, [Card; 5])> {
        let player = self.player(player_id)?;
        self.has_hand(player)
            .then(|| HandValue::eval_with_best_hand(&self.player_cards(player)))
    }

    /// The estimated chance a player wins at showdown against a random hand.
    pub fn chance(&self, player_id: &PlayerId) -> Option<f64> {
        let player = self.player(player_id)?;
        (player.cards().len() == Player::HOLE_CARDS)
            .then(|| Probability::new(&self.board).chance(player.cards()))
    }

    /// A player at this table.
    pub fn player(&self, player_id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.player_id() == player_id)
    }

    /// All players in seating order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The players who have not folded.
    pub fn active_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| !p.is_folded()).collect()
    }

    /// The players who have folded.
    pub fn folded_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| p.is_folded()).collect()
    }

    /// All players sorted by chips, most chips first.
    pub fn top_players(&self) -> Vec<&Player> {
        let mut players = self.players.iter().collect::<Vec<_>>();
        players.sort_by(|p1, p2| p2.chips().cmp(&p1.chips()));
        players
    }

    /// Checks if at most one player has not folded.
    pub fn is_all_folded(&self) -> bool {
        self.active_players().len() <= 1
    }

    /// Checks if every player who has not folded has met the bet.
    pub fn is_all_called(&self) -> bool {
        self.players
            .iter()
            .filter(|p| !p.is_folded())
            .all(Player::is_called)
    }

    /// Checks if the board has all five cards.
    pub fn is_showdown(&self) -> bool {
        self.board.len() == Self::BOARD_SIZE
    }

    /// Checks if any board card has been dealt.
    pub fn is_flopped(&self) -> bool {
        !self.board.is_empty()
    }

    /// The board cards.
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// The chips in the pot.
    pub fn pot(&self) -> Chips {
        self.pot
    }

    /// The round number, 0 before the first round.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// The current small blind.
    pub fn small_blind(&self) -> Chips {
        self.small_blind
    }

    /// The current raise amount.
    pub fn raise_amount(&self) -> Chips {
        self.raise
    }

    /// The number of cards left in the deck.
    pub fn deck_count(&self) -> usize {
        self.deck.count()
    }

    /// The players nicknames with their role, as `Alice(SB) | Bob(BB) | Carol`.
    pub fn seats_summary(&self) -> String {
        self.players
            .iter()
            .map(Player::nickname_with_role)
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// A read only projection of the table.
    pub fn view(&self) -> TableView {
        TableView {
            players: self.players.iter().map(PlayerView::from).collect(),
            board: self.board.clone(),
            pot: self.pot,
            round: self.round,
            small_blind: self.small_blind,
            raise: self.raise,
            is_all_called: self.is_all_called(),
            is_all_folded: self.is_all_folded(),
            is_flopped: self.is_flopped(),
            is_showdown: self.is_showdown(),
        }
    }

    /// Encodes the table state.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TableError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decodes a table state encoded with [Table::to_bytes].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TableError> {
        Ok(bincode::deserialize(bytes)?)
    }

    fn position(&self, player_id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.player_id() == player_id)
    }

    fn seat(&self, player_id: &PlayerId) -> Result<usize, ActionError> {
        self.position(player_id)
            .ok_or_else(|| ActionError::NotSeated(player_id.clone()))
    }

    /// First seat that has not folded starting from `start` and wrapping
    /// around, visits each seat at most once.
    fn next_unfolded(&self, start: usize) -> Option<usize> {
        let n = self.players.len();
        (0..n)
            .map(|offset| (start + offset) % n)
            .find(|&idx| !self.players[idx].is_folded())
    }

    fn player_cards(&self, player: &Player) -> Vec<Card> {
        player.cards().iter().chain(&self.board).copied().collect()
    }

    /// A player makes a hand once dealt with at least the flop.
    fn has_hand(&self, player: &Player) -> bool {
        player.cards().len() == Player::HOLE_CARDS && self.board.len() >= 3
    }

    fn hand_value(&self, player: &Player) -> Option<HandValue> {
        self.has_hand(player)
            .then(|| HandValue::eval(&self.player_cards(player)))
    }

    fn reject<T>(player_id: &PlayerId, err: ActionError) -> Result<T, ActionError> {
        debug!("Rejected action from {player_id}: {err}");
        Err(err)
    }
}
