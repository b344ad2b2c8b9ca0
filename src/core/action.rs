//! Move representation.
//!
//! A `Move` is what the caller proposes: a source location, a destination
//! location and a card count. `MoveKind` is what the engine derives from the
//! two locations; it selects both the reward and the execution routine.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::location::{Category, DECK_INDEX, WASTE_INDEX};

/// A caller-supplied move.
///
/// `count` is the number of cards taken from the top of `current`.
/// When `current == next` the move is a flip of that pile's top card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub current: usize,
    pub next: usize,
    pub count: usize,
}

impl Move {
    #[must_use]
    pub const fn new(current: usize, next: usize, count: usize) -> Self {
        Self {
            current,
            next,
            count,
        }
    }

    /// Flip the top card of `location`.
    #[must_use]
    pub const fn flip(location: usize) -> Self {
        Self::new(location, location, 1)
    }

    /// Draw one card from the deck onto the waste.
    #[must_use]
    pub const fn draw() -> Self {
        Self::new(DECK_INDEX, WASTE_INDEX, 1)
    }

    /// Turn the waste over into the empty deck.
    #[must_use]
    pub const fn recycle() -> Self {
        Self::new(WASTE_INDEX, DECK_INDEX, 0)
    }

    #[must_use]
    pub const fn is_flip(&self) -> bool {
        self.current == self.next
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} x{}", self.current, self.next, self.count)
    }
}

/// Classification of a move by its source and destination categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Flip,
    PileToPile,
    PileToFoundation,
    DeckToWaste,
    WasteToDeck,
    WasteToPile,
    WasteToFoundation,
    FoundationToPile,
}

impl MoveKind {
    pub const ALL: [MoveKind; 8] = [
        MoveKind::Flip,
        MoveKind::PileToPile,
        MoveKind::PileToFoundation,
        MoveKind::DeckToWaste,
        MoveKind::WasteToDeck,
        MoveKind::WasteToPile,
        MoveKind::WasteToFoundation,
        MoveKind::FoundationToPile,
    ];

    /// Classify a route between two distinct locations.
    ///
    /// Returns `None` for routes the game never allows (into the deck from
    /// anywhere but the waste, into the waste from anywhere but the deck,
    /// out of the deck to anywhere but the waste, foundation to foundation).
    #[must_use]
    pub fn between(from: Category, to: Category) -> Option<MoveKind> {
        use Category::{Deck, Foundation, Tableau, Waste};

        match (from, to) {
            (Tableau(_), Tableau(_)) => Some(MoveKind::PileToPile),
            (Tableau(_), Foundation(_)) => Some(MoveKind::PileToFoundation),
            (Deck, Waste) => Some(MoveKind::DeckToWaste),
            (Waste, Deck) => Some(MoveKind::WasteToDeck),
            (Waste, Tableau(_)) => Some(MoveKind::WasteToPile),
            (Waste, Foundation(_)) => Some(MoveKind::WasteToFoundation),
            (Foundation(_), Tableau(_)) => Some(MoveKind::FoundationToPile),
            _ => None,
        }
    }

    /// Does this kind transfer cards onto a stacking target?
    #[must_use]
    pub fn is_transfer(self) -> bool {
        !matches!(
            self,
            MoveKind::Flip | MoveKind::DeckToWaste | MoveKind::WasteToDeck
        )
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MoveKind::Flip => "flip",
            MoveKind::PileToPile => "pile_to_pile",
            MoveKind::PileToFoundation => "pile_to_foundation",
            MoveKind::DeckToWaste => "deck_to_waste",
            MoveKind::WasteToDeck => "waste_to_deck",
            MoveKind::WasteToPile => "waste_to_pile",
            MoveKind::WasteToFoundation => "waste_to_foundation",
            MoveKind::FoundationToPile => "foundation_to_pile",
        }
    }
}

/// An applied move, kept in the state's history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Move,
    pub kind: MoveKind,
    pub reward: f64,
    /// Step counter value when the move was applied.
    pub step: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::Suit;

    #[test]
    fn test_constructors() {
        assert!(Move::flip(3).is_flip());
        assert_eq!(Move::draw(), Move::new(7, 8, 1));
        assert_eq!(Move::recycle(), Move::new(8, 7, 0));
        assert!(!Move::draw().is_flip());
    }

    #[test]
    fn test_between() {
        use Category::*;

        assert_eq!(MoveKind::between(Tableau(0), Tableau(4)), Some(MoveKind::PileToPile));
        assert_eq!(
            MoveKind::between(Tableau(2), Foundation(Suit::Hearts)),
            Some(MoveKind::PileToFoundation)
        );
        assert_eq!(MoveKind::between(Deck, Waste), Some(MoveKind::DeckToWaste));
        assert_eq!(MoveKind::between(Waste, Deck), Some(MoveKind::WasteToDeck));
        assert_eq!(MoveKind::between(Waste, Tableau(6)), Some(MoveKind::WasteToPile));
        assert_eq!(
            MoveKind::between(Foundation(Suit::Spades), Tableau(1)),
            Some(MoveKind::FoundationToPile)
        );

        assert_eq!(MoveKind::between(Tableau(0), Deck), None);
        assert_eq!(MoveKind::between(Tableau(0), Waste), None);
        assert_eq!(MoveKind::between(Deck, Tableau(0)), None);
        assert_eq!(MoveKind::between(Deck, Foundation(Suit::Clubs)), None);
        assert_eq!(
            MoveKind::between(Foundation(Suit::Spades), Foundation(Suit::Hearts)),
            None
        );
    }

    #[test]
    fn test_move_serialization() {
        let mv = Move::new(2, 10, 1);
        let json = serde_json::to_string(&mv).unwrap();
        let back: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(mv, back);
    }
}
