// Copyright (C) 2025 Holdem Table Developers
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// A Poker card.
///
/// A card is a plain `(rank, suit)` pair. Two cards are equal only if both
/// rank and suit match, card strength is compared by [Card::rank]:
///
/// ```
/// # use holdem_cards::{Card, Rank, Suit};
/// let ah = Card::new(Rank::Ace, Suit::Hearts);
/// let ad = Card::new(Rank::Ace, Suit::Diamonds);
/// assert_ne!(ah, ad);
/// assert_eq!(ah.rank(), ad.rank());
/// ```
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    /// Create a card given a suit and rank.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    /// Creates a card from its numeric suit (0..=3) and rank (0..=12) values.
    ///
    /// Returns `None` if any of the values is out of range.
    pub fn from_indices(suit: u8, rank: u8) -> Option<Card> {
        Some(Card::new(Rank::from_index(rank)?, Suit::from_index(suit)?))
    }

    /// This card unique id in the range `0..52`.
    pub fn id(&self) -> u8 {
        self.suit as u8 * 13 + self.rank as u8
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        self.rank
    }
}

impl Default for Card {
    fn default() -> Self {
        Card::new(Rank::Deuce, Suit::Clubs)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank(), self.suit())
    }
}

/// Error returned when parsing a card string like `"AS"` fails.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid card {0:?}")]
pub struct ParseCardError(String);

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCardError(s.to_string());

        let mut chars = s.chars();
        let (Some(r), Some(c), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(err());
        };

        let rank = Rank::ranks()
            .find(|rank| rank.symbol() == r.to_ascii_uppercase())
            .ok_or_else(err)?;
        let suit = Suit::suits()
            .find(|suit| suit.symbol() == c.to_ascii_uppercase())
            .ok_or_else(err)?;

        Ok(Card::new(rank, suit))
    }
}

/// Card rank, Deuce is the lowest and Ace the highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    const ALL: [Rank; 13] = {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
    };

    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        Self::ALL.into_iter()
    }

    /// Returns the rank for a value in the range 0..=12.
    pub fn from_index(idx: u8) -> Option<Rank> {
        Self::ALL.get(idx as usize).copied()
    }

    fn symbol(&self) -> char {
        match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit.
    Clubs = 0,
    /// Diamonds suit.
    Diamonds,
    /// Hearts suit.
    Hearts,
    /// Spades suit.
    Spades,
}

impl Suit {
    const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        Self::ALL.into_iter()
    }

    /// Returns the suit for a value in the range 0..=3.
    pub fn from_index(idx: u8) -> Option<Suit> {
        Self::ALL.get(idx as usize).copied()
    }

    fn symbol(&self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;

    #[test]
    fn card_ids() {
        let ids = Suit::suits()
            .flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s).id()))
            .collect::<HashSet<_>>();
        assert_eq!(ids.len(), 52);
        assert!(ids.iter().all(|&id| id < 52));

        assert_eq!(Card::new(Rank::Deuce, Suit::Clubs).id(), 0);
        assert_eq!(Card::new(Rank::Ace, Suit::Spades).id(), 51);
    }

    #[test]
    fn card_from_indices() {
        let c = Card::from_indices(1, 12).unwrap();
        assert_eq!(c, Card::new(Rank::Ace, Suit::Diamonds));

        let c = Card::from_indices(3, 0).unwrap();
        assert_eq!(c, Card::new(Rank::Deuce, Suit::Spades));

        // Thirteen ranks only, there is no rank 13.
        assert!(Card::from_indices(0, 13).is_none());
        assert!(Card::from_indices(4, 0).is_none());
    }

    #[test]
    fn card_to_string() {
        let c = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(c.to_string(), "KD");

        let c = Card::new(Rank::Five, Suit::Spades);
        assert_eq!(c.to_string(), "5S");

        let c = Card::new(Rank::Ten, Suit::Hearts);
        assert_eq!(c.to_string(), "TH");

        let c = Card::new(Rank::Ace, Suit::Hearts);
        assert_eq!(format!("{c:?}"), "Card(AH)");
    }

    #[test]
    fn card_from_str() {
        assert_eq!("AS".parse(), Ok(Card::new(Rank::Ace, Suit::Spades)));
        assert_eq!("tc".parse(), Ok(Card::new(Rank::Ten, Suit::Clubs)));
        assert_eq!("2H".parse(), Ok(Card::new(Rank::Deuce, Suit::Hearts)));

        assert!("1S".parse::<Card>().is_err());
        assert!("AX".parse::<Card>().is_err());
        assert!("ASS".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
    }

    #[test]
    fn rank_ordering() {
        let ranks = Rank::ranks().collect::<Vec<_>>();
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(Rank::from_index(12), Some(Rank::Ace));
    }
}
