// Copyright (C) 2025 Holdem Table Developers
// SPDX-License-Identifier: Apache-2.0

//! Holdem table hand evaluator.
//!
//! Poker hand evaluator for 5, 6 and 7 cards hands and a win probability
//! estimator for partially revealed boards.
//!
//! To use the evaluator create a hand and use [HandValue] to evaluate the hand
//! and get its rank:
//!
//! ```
//! # use holdem_eval::*;
//! // 2C, 3C, .., JC
//! let cards = Deck::default().into_iter().take(10).collect::<Vec<_>>();
//! let v1 = HandValue::eval(&cards[0..5]);
//! let v2 = HandValue::eval(&cards[5..]);
//! assert_eq!(v1.rank(), HandRank::StraightFlush);
//! assert!(v2 > v1);
//! ```
//!
//! To estimate the chance of a hand winning against a random hand given the
//! board use [Probability]:
//!
//! ```
//! # use holdem_eval::*;
//! let board = ["AS", "KD", "7C", "7H", "2S"].map(|c| c.parse::<Card>().unwrap());
//! let hole = ["AD", "AH"].map(|c| c.parse::<Card>().unwrap());
//! let chance = Probability::new(&board).chance(&hole);
//! assert!(chance > 0.9);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod equity;
pub use equity::Probability;

pub mod eval;
pub use eval::{HandRank, HandValue};

// Reexport cards types.
pub use holdem_cards::{Card, Deck, ExhaustedDeck, Rank, Suit};
