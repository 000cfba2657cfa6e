// Copyright (C) 2025 Holdem Table Developers
// SPDX-License-Identifier: Apache-2.0

//! Win probability estimator.
//!
//! Estimates the probability that a player hole cards beat a single random
//! opponent at showdown, with the opponent hole cards and any undealt board
//! card drawn from the cards that are not on the board or in the player hand.
//!
//! When the space of runouts and opponent hands is small enough (turn and
//! river) it is enumerated exhaustively, otherwise it is sampled.
use rand::prelude::*;

use holdem_cards::{Card, Deck};

use crate::HandValue;

/// Win probability estimator for a board.
#[derive(Debug, Clone)]
pub struct Probability {
    board: Vec<Card>,
    samples: usize,
}

impl Probability {
    /// Number of the board cards at showdown.
    pub const BOARD_SIZE: usize = 5;

    /// Default number of samples when the space is too large to enumerate.
    pub const SAMPLES: usize = 20_000;

    /// Largest number of showdowns that is enumerated exhaustively.
    const EXHAUSTIVE_LIMIT: usize = 100_000;

    /// Creates an estimator for the given board.
    ///
    /// Panics if the board has more than 5 cards.
    pub fn new(board: &[Card]) -> Self {
        assert!(board.len() <= Self::BOARD_SIZE, "board <= 5 cards");

        Self {
            board: board.to_vec(),
            samples: Self::SAMPLES,
        }
    }

    /// Sets the number of samples used when sampling.
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples.max(1);
        self
    }

    /// The number of two cards hands that can be drawn from the cards not on
    /// the board, 1326 for an empty board.
    pub fn combinations(&self) -> usize {
        nck(Deck::SIZE - self.board.len(), 2)
    }

    /// The probability in [0, 1] that the hole cards win against a random hand,
    /// a tie counts as half a win.
    ///
    /// Panics if there are not two hole cards.
    pub fn chance(&self, hole: &[Card]) -> f64 {
        self.chance_with_rng(hole, &mut SmallRng::from_os_rng())
    }

    /// Same as [Probability::chance] using the given randomness for sampling.
    pub fn chance_with_rng<R: Rng>(&self, hole: &[Card], rng: &mut R) -> f64 {
        assert_eq!(hole.len(), 2, "two hole cards");

        let mut unseen = Deck::default();
        for &card in self.board.iter().chain(hole) {
            unseen.remove(card);
        }

        let missing = Self::BOARD_SIZE - self.board.len();
        let showdowns = nck(unseen.count(), missing) * nck(unseen.count() - missing, 2);

        let mut score = Score::default();
        if showdowns <= Self::EXHAUSTIVE_LIMIT {
            self.enumerate(hole, &unseen, missing, &mut score);
        } else {
            self.sample(hole, &unseen, missing, rng, &mut score);
        }

        score.chance()
    }

    fn enumerate(&self, hole: &[Card], unseen: &Deck, missing: usize, score: &mut Score) {
        if missing == 0 {
            let hand = Showdown::new(hole, &self.board);
            let hero = hand.hero();
            unseen.for_each(2, |opp| score.add(hero, hand.opponent(opp)));
            return;
        }

        unseen.for_each(missing, |runout| {
            let mut hand = Showdown::new(hole, &self.board);
            hand.complete(runout);
            let hero = hand.hero();

            let mut opponents = unseen.clone();
            runout.iter().for_each(|&c| opponents.remove(c));
            opponents.for_each(2, |opp| score.add(hero, hand.opponent(opp)));
        });
    }

    fn sample<R: Rng>(
        &self,
        hole: &[Card],
        unseen: &Deck,
        missing: usize,
        rng: &mut R,
        score: &mut Score,
    ) {
        // Each sample has the opponent hole cards followed by the runout.
        unseen.sample(rng, self.samples, missing + 2, |sample| {
            let mut hand = Showdown::new(hole, &self.board);
            hand.complete(&sample[2..]);
            let hero = hand.hero();
            score.add(hero, hand.opponent(&sample[..2]));
        });
    }
}

/// Seven cards with the hole cards in the first two slots.
struct Showdown {
    cards: [Card; 7],
    len: usize,
}

impl Showdown {
    fn new(hole: &[Card], board: &[Card]) -> Self {
        let mut cards = [Card::default(); 7];
        cards[..2].copy_from_slice(hole);
        cards[2..2 + board.len()].copy_from_slice(board);
        Self {
            cards,
            len: 2 + board.len(),
        }
    }

    fn complete(&mut self, runout: &[Card]) {
        self.cards[self.len..self.len + runout.len()].copy_from_slice(runout);
        self.len += runout.len();
    }

    fn hero(&self) -> HandValue {
        HandValue::eval(&self.cards[..self.len])
    }

    fn opponent(&self, hole: &[Card]) -> HandValue {
        let mut cards = self.cards;
        cards[..2].copy_from_slice(hole);
        HandValue::eval(&cards[..self.len])
    }
}

/// Showdowns results counted in half wins.
#[derive(Debug, Default)]
struct Score {
    half_wins: u64,
    games: u64,
}

impl Score {
    fn add(&mut self, hero: HandValue, opponent: HandValue) {
        self.half_wins += match hero.cmp(&opponent) {
            std::cmp::Ordering::Greater => 2,
            std::cmp::Ordering::Equal => 1,
            std::cmp::Ordering::Less => 0,
        };
        self.games += 1;
    }

    fn chance(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.half_wins as f64 / (2 * self.games) as f64
        }
    }
}

/// Returns the binomial coefficient for n choose k.
fn nck(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }

    let k = k.min(n - k);
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    fn cards(pairs: &[(u8, u8)]) -> Vec<Card> {
        pairs
            .iter()
            .map(|&(s, r)| Card::from_indices(s, r).unwrap())
            .collect()
    }

    fn chance(board: &[(u8, u8)], hole: &[(u8, u8)]) -> f64 {
        let mut rng = StdRng::seed_from_u64(42);
        Probability::new(&cards(board)).chance_with_rng(&cards(hole), &mut rng)
    }

    #[test]
    fn test_nck() {
        assert_eq!(nck(2, 3), 0);
        assert_eq!(nck(52, 2), 1_326);
        assert_eq!(nck(52, 5), 2_598_960);
        assert_eq!(nck(47, 2), 1_081);
        assert_eq!(nck(45, 0), 1);
    }

    #[test]
    fn preflop_combinations() {
        let probability = Probability::new(&[]);
        assert_eq!(probability.combinations(), 1326);

        // The hole cards do not change the normalization.
        let _ = probability.chance_with_rng(&cards(&[(0, 12), (1, 12)]), &mut StdRng::seed_from_u64(1));
        assert_eq!(probability.combinations(), 1326);
    }

    #[test]
    fn flop_pair_beats_high_card() {
        let board = [(1, 0), (2, 6), (1, 8)];
        let c1 = chance(&board, &[(1, 7), (0, 2)]);
        let c2 = chance(&board, &[(2, 0), (2, 1)]);
        assert!(c1 < c2, "{c1} < {c2}");
    }

    #[test]
    fn turn_better_kicker() {
        let board = [(1, 12), (2, 10), (1, 9), (0, 9)];
        let c1 = chance(&board, &[(1, 0), (0, 1)]);
        let c2 = chance(&board, &[(2, 0), (2, 7)]);
        assert!(c1 < c2, "{c1} < {c2}");
    }

    #[test]
    fn river_better_kicker() {
        let board = [(1, 12), (2, 10), (1, 9), (0, 9), (0, 4)];
        let c1 = chance(&board, &[(1, 0), (0, 1)]);
        let c2 = chance(&board, &[(2, 0), (2, 7)]);
        assert!(c1 < c2, "{c1} < {c2}");
    }

    #[test]
    fn river_nuts_and_ties() {
        // Royal flush on the board, every hand ties.
        let board = [(3, 8), (3, 9), (3, 10), (3, 11), (3, 12)];
        let c = chance(&board, &[(0, 0), (1, 1)]);
        assert!((c - 0.5).abs() < 1e-9, "{c}");

        // Quad aces on a board with no flush or straight flush draws.
        let board = [(0, 12), (1, 12), (2, 0), (3, 5), (0, 3)];
        let c = chance(&board, &[(2, 12), (3, 12)]);
        assert!(c > 0.99, "{c}");
    }

    #[test]
    fn preflop_aces_over_seven_deuce() {
        let aces = chance(&[], &[(0, 12), (1, 12)]);
        let junk = chance(&[], &[(0, 5), (1, 0)]);
        assert!(aces > 0.8, "{aces}");
        assert!(junk < 0.4, "{junk}");
    }

    #[test]
    fn chance_in_range() {
        let board = [(0, 3), (1, 7), (2, 11)];
        let c = Probability::new(&cards(&board))
            .with_samples(500)
            .chance(&cards(&[(3, 3), (3, 4)]));
        assert!((0.0..=1.0).contains(&c));
    }
}
