// Copyright (C) 2025 Holdem Table Developers
// SPDX-License-Identifier: Apache-2.0

//! Holdem table cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use holdem_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd = Card::new(Rank::King, Suit::Diamonds);
//! assert!(ah.rank() > kd.rank());
//! ```
//!
//! and a [Deck] type for shuffling, drawing, sampling, and iterating cards in
//! the deck. Each card can be drawn at most once from a deck:
//!
//! ```
//! # use holdem_cards::{Deck, ExhaustedDeck};
//! let mut deck = Deck::new_and_shuffled(&mut rand::rng());
//! for _ in 0..Deck::SIZE {
//!     deck.draw().unwrap();
//! }
//! assert_eq!(deck.draw(), Err(ExhaustedDeck));
//! ```
//!
//! To iterate through all two cards hands:
//!
//! ```
//! # use holdem_cards::Deck;
//! let mut counter = 0;
//! Deck::default().for_each(2, |hand| {
//!     assert_eq!(hand.len(), 2);
//!     counter += 1;
//! });
//! assert_eq!(counter, 1_326);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod cards;
pub use cards::{Card, ParseCardError, Rank, Suit};

mod deck;
pub use deck::{Deck, ExhaustedDeck};
