// Copyright (C) 2025 Holdem Table Developers
// SPDX-License-Identifier: Apache-2.0

//! Cards deck.
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Card, Rank, Suit};

/// Error returned when drawing from a deck with no cards left.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("the deck has no cards left")]
pub struct ExhaustedDeck;

/// A cards Deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.cards.shuffle(rng);
        deck
    }

    /// Draws a card from the deck, the card is removed from the deck.
    pub fn draw(&mut self) -> Result<Card, ExhaustedDeck> {
        self.cards.pop().ok_or(ExhaustedDeck)
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// Removes a card from the deck.
    pub fn remove(&mut self, card: Card) {
        self.cards.retain(|c| c != &card);
    }

    /// Checks if a card is still in the deck.
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Returns the cards left in the deck.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Calls the `f` closure for each k-cards hand.
    ///
    /// Panics if k is not 1 <= k <= 7.
    pub fn for_each<F>(&self, k: usize, mut f: F)
    where
        F: FnMut(&[Card]),
    {
        assert!((1..=7).contains(&k), "1 <= k <= 7");

        let n = self.cards.len();
        if k > n {
            return;
        }

        // Indices of the current subset, always strictly increasing.
        let mut idx = [0usize; 7];
        for (i, v) in idx.iter_mut().enumerate().take(k) {
            *v = i;
        }

        let mut hand = [Card::default(); 7];
        loop {
            for i in 0..k {
                hand[i] = self.cards[idx[i]];
            }

            f(&hand[..k]);

            // Find the rightmost index that can move forward.
            let Some(pos) = (0..k).rev().find(|&i| idx[i] < n - k + i) else {
                break;
            };

            idx[pos] += 1;
            for i in pos + 1..k {
                idx[i] = idx[i - 1] + 1;
            }
        }
    }

    /// Calls the `f` closure for `n` random k-cards hands.
    ///
    /// Panics if k is not 1 <= k <= 7.
    pub fn sample<R, F>(&self, rng: &mut R, n: usize, k: usize, mut f: F)
    where
        R: Rng,
        F: FnMut(&[Card]),
    {
        assert!((1..=7).contains(&k), "1 <= k <= 7");

        if k > self.cards.len() {
            return;
        }

        let mut hand = [Card::default(); 7];
        for _ in 0..n {
            for (pos, c) in self.cards.choose_multiple(rng, k).enumerate() {
                hand[pos] = *c;
            }

            f(&hand[..k]);
        }
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Suit::suits()
            .flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
            .collect::<Vec<_>>();
        Self { cards }
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}
