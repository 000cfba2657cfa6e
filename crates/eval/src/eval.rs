// Copyright (C) 2025 Holdem Table Developers
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! A hand is classified by matching rank groups (quads, trips, pairs) and by
//! straight and flush detection into a [HandRank] category plus an ordered
//! list of tie-break ranks, most significant first. Hands compare by category
//! first and then by their tie-break ranks, two hands with the same category
//! and tie-break ranks are equal and split the pot.
//!
//! The Ace is the highest rank and plays low only in the A-2-3-4-5 straight
//! (the wheel) whose high card is the Five.
//!
//! It provides a [HandValue::eval] method that computes the best five cards
//! value of a 5, 6, or 7 cards hand without extracting the best hand, useful
//! for computing odds, and a slower [HandValue::eval_with_best_hand] that also
//! returns the five best cards, useful to show a winning hand.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

use holdem_cards::{Card, Rank};

/// The hand category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// High card.
    HighCard = 0,
    /// One pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Straight.
    Straight,
    /// Flush.
    Flush,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight flush.
    StraightFlush,
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pairs",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
        };

        f.write_str(s)
    }
}

/// The value of a poker hand.
///
/// Values are totally ordered, a greater value wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandValue {
    rank: HandRank,
    kickers: [Rank; 5],
    len: u8,
}

/// Bit mask of the ranks in a hand, bit `r` is set for rank `r`.
type RankMask = u16;

const WHEEL: RankMask = 1 << Rank::Ace as u16 | 0b1111;

impl HandValue {
    /// Evaluates a 5, 6, or 7 cards hand.
    ///
    /// Panics if the number of cards is not in the range 5..=7.
    pub fn eval(cards: &[Card]) -> Self {
        assert!((5..=7).contains(&cards.len()), "5 <= cards <= 7");

        let mut counts = [0u8; 13];
        let mut suits = [0 as RankMask; 4];
        for card in cards {
            counts[card.rank() as usize] += 1;
            suits[card.suit() as usize] |= bit(card.rank());
        }

        let all = suits.iter().fold(0, |acc, m| acc | m);

        // Ranks grouped by multiplicity, by_count[n] has the ranks seen n times.
        let mut by_count = [0 as RankMask; 8];
        for (rank, &n) in counts.iter().enumerate() {
            by_count[n as usize] |= 1 << rank;
        }

        let flush = suits.iter().copied().find(|m| m.count_ones() >= 5);
        if let Some(high) = flush.and_then(straight_high) {
            return Self::new(HandRank::StraightFlush, [high]);
        }

        if let Some(quads) = highest(by_count[4]) {
            let kicker = ranks_desc(all & !bit(quads)).take(1);
            return Self::new(HandRank::FourOfAKind, [quads].into_iter().chain(kicker));
        }

        let trips = highest(by_count[3]);
        if let Some(trips) = trips {
            // A second set of trips plays as the pair.
            let rest = (by_count[3] & !bit(trips)) | by_count[2];
            if let Some(pair) = highest(rest) {
                return Self::new(HandRank::FullHouse, [trips, pair]);
            }
        }

        if let Some(flush) = flush {
            return Self::new(HandRank::Flush, ranks_desc(flush).take(5));
        }

        if let Some(high) = straight_high(all) {
            return Self::new(HandRank::Straight, [high]);
        }

        if let Some(trips) = trips {
            let kickers = ranks_desc(all & !bit(trips)).take(2);
            return Self::new(HandRank::ThreeOfAKind, [trips].into_iter().chain(kickers));
        }

        let mut pairs = ranks_desc(by_count[2]);
        match (pairs.next(), pairs.next()) {
            (Some(p1), Some(p2)) => {
                let kicker = ranks_desc(all & !bit(p1) & !bit(p2)).take(1);
                Self::new(HandRank::TwoPair, [p1, p2].into_iter().chain(kicker))
            }
            (Some(p), None) => {
                let kickers = ranks_desc(all & !bit(p)).take(3);
                Self::new(HandRank::OnePair, [p].into_iter().chain(kickers))
            }
            _ => Self::new(HandRank::HighCard, ranks_desc(all).take(5)),
        }
    }

    /// Evaluates a 5, 6, or 7 cards hand and returns the five cards that make
    /// the best hand.
    ///
    /// Panics if the number of cards is not in the range 5..=7.
    pub fn eval_with_best_hand(cards: &[Card]) -> (Self, [Card; 5]) {
        assert!((5..=7).contains(&cards.len()), "5 <= cards <= 7");

        let n = cards.len();
        let first = [cards[0], cards[1], cards[2], cards[3], cards[4]];
        let mut best = (Self::eval(&first), first);

        for subset in (0u32..1 << n).filter(|s| s.count_ones() == 5) {
            let mut hand = [Card::default(); 5];
            let picked = (0..n).filter(|i| subset & (1 << i) != 0);
            for (slot, i) in hand.iter_mut().zip(picked) {
                *slot = cards[i];
            }

            let value = Self::eval(&hand);
            if value > best.0 {
                best = (value, hand);
            }
        }

        best
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        self.rank
    }

    /// The tie-break ranks, most significant first.
    pub fn kickers(&self) -> &[Rank] {
        &self.kickers[..self.len as usize]
    }

    fn new(rank: HandRank, ranks: impl IntoIterator<Item = Rank>) -> Self {
        let mut kickers = [Rank::Deuce; 5];
        let mut len = 0;
        for (slot, r) in kickers.iter_mut().zip(ranks) {
            *slot = r;
            len += 1;
        }

        Self { rank, kickers, len }
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.kickers().cmp(other.kickers()))
    }
}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rank)?;
        for (idx, r) in self.kickers().iter().enumerate() {
            let sep = if idx == 0 { " " } else { "," };
            write!(f, "{sep}{r}")?;
        }

        Ok(())
    }
}

#[inline]
fn bit(rank: Rank) -> RankMask {
    1 << rank as u16
}

fn highest(mask: RankMask) -> Option<Rank> {
    ranks_desc(mask).next()
}

fn ranks_desc(mask: RankMask) -> impl Iterator<Item = Rank> {
    Rank::ranks().rev().filter(move |&r| mask & bit(r) != 0)
}

/// Returns the high card of the best straight in the mask.
fn straight_high(mask: RankMask) -> Option<Rank> {
    const FIVE_IN_A_ROW: RankMask = 0b11111;

    let high = Rank::ranks()
        .rev()
        .filter(|&r| r >= Rank::Six)
        .find(|&r| {
            let window = FIVE_IN_A_ROW << (r as u16 - 4);
            mask & window == window
        });

    high.or_else(|| (mask & WHEEL == WHEEL).then_some(Rank::Five))
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_cards::{Deck, Suit};

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    fn eval(s: &str) -> HandValue {
        HandValue::eval(&cards(s))
    }

    fn numeric(pairs: &[(u8, u8)]) -> HandValue {
        let cards = pairs
            .iter()
            .map(|&(s, r)| Card::from_indices(s, r).unwrap())
            .collect::<Vec<_>>();
        HandValue::eval(&cards)
    }

    #[test]
    fn categories() {
        use HandRank::*;

        assert_eq!(eval("AS KD 9C 5H 3S").rank(), HighCard);
        assert_eq!(eval("AS AD 9C 5H 3S").rank(), OnePair);
        assert_eq!(eval("AS AD 9C 9H 3S").rank(), TwoPair);
        assert_eq!(eval("AS AD AC 9H 3S").rank(), ThreeOfAKind);
        assert_eq!(eval("9S TD JC QH KS").rank(), Straight);
        assert_eq!(eval("AS 2D 3C 4H 5S").rank(), Straight);
        assert_eq!(eval("2H 7H 9H JH KH").rank(), Flush);
        assert_eq!(eval("AS AD AC 9H 9S").rank(), FullHouse);
        assert_eq!(eval("AS AD AC AH 9S").rank(), FourOfAKind);
        assert_eq!(eval("9S TS JS QS KS").rank(), StraightFlush);
        assert_eq!(eval("AD 2D 3D 4D 5D").rank(), StraightFlush);
    }

    #[test]
    fn pair_of_aces_over_pair_of_eights() {
        let h1 = numeric(&[(1, 12), (2, 12), (1, 0), (1, 1), (1, 2)]);
        let h2 = numeric(&[(1, 6), (2, 6), (1, 0), (1, 1), (1, 2)]);
        assert_eq!(h1.cmp(&h2), Ordering::Greater);
    }

    #[test]
    fn pair_of_kings_over_pair_of_eights() {
        let h1 = numeric(&[(1, 11), (2, 11), (1, 0), (1, 1), (1, 2)]);
        let h2 = numeric(&[(1, 6), (2, 6), (0, 0), (0, 1), (0, 2)]);
        assert_eq!(h1.cmp(&h2), Ordering::Greater);
    }

    #[test]
    fn pair_of_twos_under_pair_of_eights() {
        let h1 = numeric(&[(1, 0), (2, 0), (1, 1), (1, 2), (1, 3)]);
        let h2 = numeric(&[(1, 6), (2, 6), (0, 1), (0, 2), (0, 3)]);
        assert_eq!(h1.cmp(&h2), Ordering::Less);
    }

    #[test]
    fn high_card_kickers() {
        // Ace high beats eight high.
        assert!(eval("AS 3S 4C 5S 6D") > eval("8S 3S 4S 5D 6H"));
        // Ace-king beats ace-queen.
        assert!(eval("AS KD 4C 5S 6D") > eval("AD QH 4S 5D 6H"));
        // Same top three cards, the fourth decides.
        assert!(eval("AC KC QC 5S 6S") > eval("AS KS QS 4D 6H"));
        // Same ranks different suits is a tie.
        assert_eq!(
            eval("AC KC QC 5S 7S").cmp(&eval("AS KS QS 5D 7H")),
            Ordering::Equal
        );
    }

    #[test]
    fn three_of_a_kind_aces_over_kings() {
        assert!(eval("AC AD AH 5S 6H") > eval("KC KH KS 5H 6S"));
    }

    #[test]
    fn two_pair_kickers() {
        assert!(eval("AS AD 3C 3H 9S") > eval("KS KD QC QH 9D"));
        assert!(eval("AS AD 3C 3H 9S") > eval("AC AH 3D 3S 8D"));
        // Third pair of a seven cards hand can be the kicker.
        assert_eq!(eval("AS AD 9C 9H 7S 7D 2C").kickers(), &[Rank::Ace, Rank::Nine, Rank::Seven]);
    }

    #[test]
    fn straights() {
        // The wheel is the lowest straight.
        assert!(eval("2S 3D 4C 5H 6S") > eval("AS 2D 3C 4H 5S"));
        assert_eq!(eval("AS 2D 3C 4H 5S").kickers(), &[Rank::Five]);
        assert_eq!(eval("TS JD QC KH AS").kickers(), &[Rank::Ace]);
        // A king high wrap around is not a straight.
        assert_eq!(eval("QS KD AC 2H 3S").rank(), HandRank::HighCard);
        // Highest straight out of seven cards.
        assert_eq!(eval("4S 5D 6C 7H 8S 9D 2C").kickers(), &[Rank::Nine]);
    }

    #[test]
    fn category_dominates_kickers() {
        let quads = eval("2S 2D 2C 2H 3S");
        assert!(quads > eval("TS JD QC KH AS"));
        assert!(quads > eval("AS AD AC KH KS"));
        assert!(eval("AS 2S 3S 4S 5S") > quads);
        assert!(eval("2H 3H 4H 5H 7H") > eval("TS JD QC KH AS"));
    }

    #[test]
    fn full_house_from_two_trips() {
        let v = eval("9S 9D 9C 4H 4S 4D KC");
        assert_eq!(v.rank(), HandRank::FullHouse);
        assert_eq!(v.kickers(), &[Rank::Nine, Rank::Four]);
    }

    #[test]
    fn flush_beats_straight_in_seven_cards() {
        let v = eval("2H 7H 9H JH KH TS QD");
        assert_eq!(v.rank(), HandRank::Flush);
        assert_eq!(
            v.kickers(),
            &[Rank::King, Rank::Jack, Rank::Nine, Rank::Seven, Rank::Deuce]
        );
    }

    #[test]
    fn best_hand_matches_eval() {
        let hand = cards("AS AD 9C 9H 7S 7D 2C");
        let (value, best) = HandValue::eval_with_best_hand(&hand);
        assert_eq!(value, HandValue::eval(&hand));
        assert_eq!(HandValue::eval(&best), value);
        assert!(best.contains(&Card::new(Rank::Ace, Suit::Spades)));
        assert!(!best.contains(&Card::new(Rank::Deuce, Suit::Clubs)));
    }

    #[test]
    fn best_hand_over_sampled_hands() {
        use rand::{SeedableRng, rngs::StdRng};

        let mut rng = StdRng::seed_from_u64(101);
        Deck::default().sample(&mut rng, 2_000, 7, |hand| {
            let (value, best) = HandValue::eval_with_best_hand(hand);
            assert_eq!(value, HandValue::eval(hand), "{hand:?}");
            assert_eq!(HandValue::eval(&best), value);

            // Five distinct cards from the hand.
            let unique = best.iter().collect::<ahash::HashSet<_>>();
            assert_eq!(unique.len(), 5);
            assert!(best.iter().all(|c| hand.contains(c)));
        });
    }

    #[test]
    fn ordering_is_total() {
        use rand::{SeedableRng, rngs::StdRng};

        let mut rng = StdRng::seed_from_u64(5);
        let mut values = Vec::new();
        Deck::default().sample(&mut rng, 200, 5, |hand| values.push(HandValue::eval(hand)));

        for a in &values {
            for b in &values {
                assert_eq!(a.cmp(b), b.cmp(a).reverse());
                if a.rank() != b.rank() {
                    assert_eq!(a.cmp(b), a.rank().cmp(&b.rank()));
                }
            }
        }

        values.sort();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    #[ignore]
    fn count_all_5cards_hands() {
        let mut counts = [0usize; 9];
        Deck::default().for_each(5, |hand| {
            counts[HandValue::eval(hand).rank() as usize] += 1;
        });

        assert_eq!(
            counts,
            [1_302_540, 1_098_240, 123_552, 54_912, 10_200, 5_108, 3_744, 624, 40]
        );
    }
}
