//! Table locations and their categories.
//!
//! The 13 locations are addressed by a fixed index:
//!
//! | Index | Location |
//! |-------|----------|
//! | 0-6   | tableau piles (pile `i` is dealt `i + 1` cards) |
//! | 7     | deck (draw stock) |
//! | 8     | waste |
//! | 9-12  | foundations, one per suit in `Suit::ALL` order |
//!
//! [`category_of`] is the only place that interprets an index; the
//! validator, the executor and the encoders all go through it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::card::Suit;

pub const TABLEAU_COUNT: usize = 7;
pub const DECK_INDEX: usize = 7;
pub const WASTE_INDEX: usize = 8;
pub const FOUNDATION_START: usize = 9;
pub const LOCATION_COUNT: usize = 13;

/// What a location index denotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Tableau(usize),
    Deck,
    Waste,
    Foundation(Suit),
}

impl Category {
    #[must_use]
    pub fn is_tableau(self) -> bool {
        matches!(self, Category::Tableau(_))
    }

    #[must_use]
    pub fn is_foundation(self) -> bool {
        matches!(self, Category::Foundation(_))
    }
}

/// Map a location index to its category.
///
/// Returns `None` for indices outside 0..13.
#[must_use]
pub fn category_of(location: usize) -> Option<Category> {
    match location {
        0..=6 => Some(Category::Tableau(location)),
        DECK_INDEX => Some(Category::Deck),
        WASTE_INDEX => Some(Category::Waste),
        9..=12 => Suit::from_index(location - FOUNDATION_START).map(Category::Foundation),
        _ => None,
    }
}

/// A validated location index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location(usize);

impl Location {
    pub const DECK: Location = Location(DECK_INDEX);
    pub const WASTE: Location = Location(WASTE_INDEX);

    /// Validate a raw index.
    #[must_use]
    pub fn new(index: usize) -> Option<Self> {
        (index < LOCATION_COUNT).then_some(Self(index))
    }

    /// Tableau pile `i` (0..7).
    #[must_use]
    pub fn tableau(i: usize) -> Option<Self> {
        (i < TABLEAU_COUNT).then_some(Self(i))
    }

    /// The foundation that collects `suit`.
    #[must_use]
    pub const fn foundation(suit: Suit) -> Self {
        Self(FOUNDATION_START + suit.index())
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    #[must_use]
    pub fn category(self) -> Category {
        match category_of(self.0) {
            Some(category) => category,
            None => unreachable!("Location {} was validated on construction", self.0),
        }
    }

    /// All locations in index order.
    pub fn all() -> impl Iterator<Item = Location> {
        (0..LOCATION_COUNT).map(Location)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category() {
            Category::Tableau(i) => write!(f, "tableau {}", i),
            Category::Deck => f.write_str("deck"),
            Category::Waste => f.write_str("waste"),
            Category::Foundation(suit) => write!(f, "{} foundation", suit.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_contract() {
        for i in 0..7 {
            assert_eq!(category_of(i), Some(Category::Tableau(i)));
        }
        assert_eq!(category_of(7), Some(Category::Deck));
        assert_eq!(category_of(8), Some(Category::Waste));
        assert_eq!(category_of(9), Some(Category::Foundation(Suit::Spades)));
        assert_eq!(category_of(10), Some(Category::Foundation(Suit::Hearts)));
        assert_eq!(category_of(11), Some(Category::Foundation(Suit::Clubs)));
        assert_eq!(category_of(12), Some(Category::Foundation(Suit::Diamonds)));
        assert_eq!(category_of(13), None);
    }

    #[test]
    fn test_foundation_location() {
        for suit in Suit::ALL {
            let loc = Location::foundation(suit);
            assert_eq!(loc.category(), Category::Foundation(suit));
        }
    }

    #[test]
    fn test_location_validation() {
        assert!(Location::new(12).is_some());
        assert!(Location::new(13).is_none());
        assert!(Location::tableau(7).is_none());
        assert_eq!(Location::all().count(), LOCATION_COUNT);
    }

    #[test]
    fn test_display() {
        assert_eq!(Location::new(3).unwrap().to_string(), "tableau 3");
        assert_eq!(Location::DECK.to_string(), "deck");
        assert_eq!(Location::foundation(Suit::Clubs).to_string(), "clubs foundation");
    }
}
