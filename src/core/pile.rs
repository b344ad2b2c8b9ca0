//! Ordered card piles.
//!
//! Every location on the table (tableau, deck, waste, foundation) is a
//! `Pile`. The top of a pile is the most recently added card and the first
//! one removed. Cards are stored bottom to top, so the top is the last
//! element of the backing vector; accessors say which end they start from.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use super::card::{Card, Rank, Suit, RANK_COUNT};
use super::rng::GameRng;

/// Cards moved together in one transfer. A tableau run is at most 13 long.
pub type Run = SmallVec<[Card; RANK_COUNT]>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PileError {
    #[error("pile is empty")]
    Empty,
    #[error("requested {requested} cards from a pile of {available}")]
    NotEnoughCards { requested: usize, available: usize },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    /// Bottom to top.
    cards: Vec<Card>,
}

impl Pile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pile from cards listed bottom to top.
    #[must_use]
    pub fn from_bottom_up(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards bottom to top.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Cards top to bottom.
    pub fn iter_top_first(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter().rev()
    }

    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    /// The card `n` positions below the top (0 = top).
    #[must_use]
    pub fn nth_from_top(&self, n: usize) -> Option<&Card> {
        self.cards.iter().rev().nth(n)
    }

    /// Push a card onto the top. Always succeeds.
    pub fn insert_top(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Pop the top card.
    pub fn remove_top(&mut self) -> Result<Card, PileError> {
        self.cards.pop().ok_or(PileError::Empty)
    }

    /// Toggle the top card's orientation. No-op on an empty pile.
    pub fn flip_top(&mut self) {
        if let Some(card) = self.cards.last_mut() {
            card.flip();
        }
    }

    /// Number of consecutive face-up cards from the top.
    #[must_use]
    pub fn face_up_count(&self) -> usize {
        self.iter_top_first().take_while(|c| c.is_face_up()).count()
    }

    /// The maximal face-up prefix, top first.
    #[must_use]
    pub fn face_up_run(&self) -> Vec<Card> {
        self.iter_top_first()
            .take_while(|c| c.is_face_up())
            .copied()
            .collect()
    }

    /// Remove the top `n` cards, keeping their relative order (bottom to top).
    pub fn take_top(&mut self, n: usize) -> Result<Run, PileError> {
        let available = self.cards.len();
        if n > available {
            return Err(PileError::NotEnoughCards {
                requested: n,
                available,
            });
        }
        Ok(self.cards.drain(available - n..).collect())
    }

    /// Place a run (bottom to top) on the top, keeping its order.
    pub fn put_top(&mut self, run: impl IntoIterator<Item = Card>) {
        self.cards.extend(run);
    }

    /// Empty the pile, returning its cards turned face-down in reversed order.
    ///
    /// The old top becomes the new bottom, which is how the waste is turned
    /// over into the deck.
    pub fn drain_reversed_face_down(&mut self) -> Vec<Card> {
        self.cards
            .drain(..)
            .rev()
            .map(|mut card| {
                card.set_face_up(false);
                card
            })
            .collect()
    }

    /// Add one face-down card per (rank, suit) pair, suit-major.
    ///
    /// The order is fixed; call [`Pile::shuffle`] to randomize.
    pub fn deal(&mut self, ranks: &[Rank], suits: &[Suit]) {
        self.cards.reserve(ranks.len() * suits.len());
        for &suit in suits {
            for &rank in ranks {
                self.cards.push(Card::new(rank, suit));
            }
        }
    }

    /// Uniformly permute the pile.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(rank: u8, suit: Suit) -> Card {
        Card::face_up(Rank::new(rank).unwrap(), suit)
    }

    #[test]
    fn test_insert_and_remove_top() {
        let mut pile = Pile::new();
        pile.insert_top(card(0, Suit::Spades));
        pile.insert_top(card(1, Suit::Spades));

        assert_eq!(pile.top(), Some(&card(1, Suit::Spades)));
        assert_eq!(pile.remove_top(), Ok(card(1, Suit::Spades)));
        assert_eq!(pile.remove_top(), Ok(card(0, Suit::Spades)));
        assert_eq!(pile.remove_top(), Err(PileError::Empty));
    }

    #[test]
    fn test_flip_top() {
        let mut pile = Pile::new();
        pile.flip_top(); // empty: no-op

        pile.insert_top(Card::new(Rank::ACE, Suit::Hearts));
        pile.insert_top(Card::new(Rank::KING, Suit::Hearts));
        pile.flip_top();

        assert!(pile.top().unwrap().is_face_up());
        assert!(!pile.cards()[0].is_face_up());

        pile.flip_top();
        assert!(!pile.top().unwrap().is_face_up());
    }

    #[test]
    fn test_face_up_run() {
        let mut pile = Pile::new();
        pile.insert_top(card(9, Suit::Clubs));
        pile.insert_top(Card::new(Rank::ACE, Suit::Clubs));
        pile.insert_top(card(8, Suit::Hearts));
        pile.insert_top(card(7, Suit::Spades));

        let run = pile.face_up_run();
        assert_eq!(run, vec![card(7, Suit::Spades), card(8, Suit::Hearts)]);
        assert_eq!(pile.face_up_count(), 2);
    }

    #[test]
    fn test_take_and_put_preserve_order() {
        let mut src = Pile::from_bottom_up(vec![
            card(12, Suit::Spades),
            card(11, Suit::Hearts),
            card(10, Suit::Clubs),
        ]);
        let mut dst = Pile::new();

        let run = src.take_top(2).unwrap();
        dst.put_top(run);

        assert_eq!(src.cards(), &[card(12, Suit::Spades)]);
        assert_eq!(dst.cards(), &[card(11, Suit::Hearts), card(10, Suit::Clubs)]);
        assert_eq!(
            src.take_top(5),
            Err(PileError::NotEnoughCards {
                requested: 5,
                available: 1
            })
        );
    }

    #[test]
    fn test_drain_reversed_face_down() {
        let mut waste = Pile::from_bottom_up(vec![card(0, Suit::Spades), card(1, Suit::Spades)]);
        let cards = waste.drain_reversed_face_down();

        assert!(waste.is_empty());
        assert_eq!(cards, vec![card(1, Suit::Spades), card(0, Suit::Spades)]);
        assert!(cards.iter().all(|c| !c.is_face_up()));
    }

    #[test]
    fn test_deal_and_shuffle() {
        let ranks: Vec<_> = Rank::all().collect();
        let mut pile = Pile::new();
        pile.deal(&ranks, &Suit::ALL);

        assert_eq!(pile.len(), 52);
        assert!(pile.cards().iter().all(|c| !c.is_face_up()));
        assert_eq!(pile.cards()[0], Card::new(Rank::ACE, Suit::Spades));

        let before = pile.clone();
        pile.shuffle(&mut GameRng::new(3));
        assert_eq!(pile.len(), 52);
        assert_ne!(pile, before);
    }
}
