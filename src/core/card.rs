//! Playing cards: ranks, suits, colors.
//!
//! A `Card` is identified by its rank and suit. The face-up flag is the only
//! mutable part and is deliberately excluded from equality and hashing, so a
//! card keeps its identity while it is turned over.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Number of ranks per suit.
pub const RANK_COUNT: usize = 13;

/// Number of suits in a deck.
pub const SUIT_COUNT: usize = 4;

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = RANK_COUNT * SUIT_COUNT;

/// Card rank, Ace (0) through King (12).
///
/// Ranks never wrap: the Ace has no predecessor and the King no successor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rank(u8);

impl TryFrom<u8> for Rank {
    type Error = String;

    fn try_from(ordinal: u8) -> Result<Self, Self::Error> {
        Rank::new(ordinal).ok_or_else(|| format!("rank ordinal {ordinal} is outside 0..13"))
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> u8 {
        rank.0
    }
}

impl Rank {
    pub const ACE: Rank = Rank(0);
    pub const KING: Rank = Rank(12);

    /// Create a rank from its ordinal (0 = Ace, 12 = King).
    ///
    /// Returns `None` for ordinals outside 0..13.
    #[must_use]
    pub const fn new(ordinal: u8) -> Option<Self> {
        if (ordinal as usize) < RANK_COUNT {
            Some(Self(ordinal))
        } else {
            None
        }
    }

    /// Get the ordinal (0 = Ace, 12 = King).
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// All ranks in ascending order.
    pub fn all() -> impl Iterator<Item = Rank> {
        (0..RANK_COUNT as u8).map(Rank)
    }

    /// The rank directly above this one, if any.
    #[must_use]
    pub fn successor(self) -> Option<Rank> {
        Rank::new(self.0 + 1)
    }

    /// The rank directly below this one, if any.
    #[must_use]
    pub fn predecessor(self) -> Option<Rank> {
        self.0.checked_sub(1).map(Rank)
    }

    #[must_use]
    pub fn is_ace(self) -> bool {
        self == Rank::ACE
    }

    #[must_use]
    pub fn is_king(self) -> bool {
        self == Rank::KING
    }

    /// Short label: `A`, `2`..`10`, `J`, `Q`, `K`.
    #[must_use]
    pub fn label(self) -> &'static str {
        const LABELS: [&str; RANK_COUNT] = [
            "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
        ];
        LABELS[self.0 as usize]
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Card color. Stacking on the tableau requires alternating colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

/// Card suit.
///
/// The declaration order is also the foundation order: foundation `f`
/// (location `9 + f`) holds suit `Suit::ALL[f]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

impl Suit {
    /// All suits in foundation order.
    pub const ALL: [Suit; SUIT_COUNT] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

    /// Position in `Suit::ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Suit at a position in `Suit::ALL`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Suit> {
        Suit::ALL.get(index).copied()
    }

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Spades | Suit::Clubs => Color::Black,
            Suit::Hearts | Suit::Diamonds => Color::Red,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Spades => "spades",
            Suit::Hearts => "hearts",
            Suit::Clubs => "clubs",
            Suit::Diamonds => "diamonds",
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Spades => '\u{2660}',
            Suit::Hearts => '\u{2665}',
            Suit::Clubs => '\u{2663}',
            Suit::Diamonds => '\u{2666}',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A playing card.
///
/// Two cards are equal iff rank and suit match; `face_up` is ignored.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
    face_up: bool,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            face_up: false,
        }
    }

    /// Create a face-up card.
    #[must_use]
    pub const fn face_up(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            face_up: true,
        }
    }

    #[must_use]
    pub const fn is_face_up(&self) -> bool {
        self.face_up
    }

    /// Toggle the face-up flag.
    pub fn flip(&mut self) {
        self.face_up = !self.face_up;
    }

    pub fn set_face_up(&mut self, face_up: bool) {
        self.face_up = face_up;
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.suit.color()
    }

    /// Dense identifier in 0..52, suit-major.
    #[must_use]
    pub fn id(&self) -> usize {
        self.suit.index() * RANK_COUNT + self.rank.index() as usize
    }

    /// Inverse of [`Card::id`]; the result is face-down.
    #[must_use]
    pub fn from_id(id: usize) -> Option<Card> {
        let suit = Suit::from_index(id / RANK_COUNT)?;
        let rank = Rank::new((id % RANK_COUNT) as u8)?;
        Some(Card::new(rank, suit))
    }

    /// Can `self` sit directly on `below` in a tableau run?
    ///
    /// True when `below` is exactly one rank higher and of the opposite color.
    #[must_use]
    pub fn stacks_on(&self, below: &Card) -> bool {
        self.color() != below.color() && self.rank.successor() == Some(below.rank)
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank && self.suit == other.suit
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank.hash(state);
        self.suit.hash(state);
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(n: u8) -> Rank {
        Rank::new(n).unwrap()
    }

    #[test]
    fn test_rank_bounds() {
        assert_eq!(Rank::new(0), Some(Rank::ACE));
        assert_eq!(Rank::new(12), Some(Rank::KING));
        assert_eq!(Rank::new(13), None);
        assert_eq!(Rank::all().count(), RANK_COUNT);
    }

    #[test]
    fn test_rank_no_wrap() {
        assert_eq!(Rank::ACE.predecessor(), None);
        assert_eq!(Rank::KING.successor(), None);
        assert_eq!(rank(6).successor(), Some(rank(7)));
        assert_eq!(rank(6).predecessor(), Some(rank(5)));
    }

    #[test]
    fn test_suit_colors() {
        assert_eq!(Suit::Spades.color(), Color::Black);
        assert_eq!(Suit::Clubs.color(), Color::Black);
        assert_eq!(Suit::Hearts.color(), Color::Red);
        assert_eq!(Suit::Diamonds.color(), Color::Red);
    }

    #[test]
    fn test_equality_ignores_orientation() {
        let mut a = Card::new(rank(4), Suit::Hearts);
        let b = Card::face_up(rank(4), Suit::Hearts);
        assert_eq!(a, b);

        a.flip();
        assert!(a.is_face_up());
        assert_eq!(a, b);
        assert_ne!(a, Card::new(rank(4), Suit::Diamonds));
    }

    #[test]
    fn test_id_round_trip() {
        for id in 0..DECK_SIZE {
            let card = Card::from_id(id).unwrap();
            assert_eq!(card.id(), id);
        }
        assert!(Card::from_id(DECK_SIZE).is_none());
    }

    #[test]
    fn test_stacks_on() {
        let red_seven = Card::face_up(rank(6), Suit::Hearts);
        let black_eight = Card::face_up(rank(7), Suit::Spades);
        let red_eight = Card::face_up(rank(7), Suit::Diamonds);

        assert!(red_seven.stacks_on(&black_eight));
        assert!(!red_seven.stacks_on(&red_eight));
        assert!(!black_eight.stacks_on(&red_seven));
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::new(Rank::ACE, Suit::Spades).to_string(), "A\u{2660}");
        assert_eq!(Card::new(rank(9), Suit::Hearts).to_string(), "10\u{2665}");
        assert_eq!(Card::new(Rank::KING, Suit::Diamonds).to_string(), "K\u{2666}");
    }

    #[test]
    fn test_deserialize_rejects_bad_rank() {
        let king: Card = serde_json::from_str(r#"{"rank":12,"suit":"Spades","face_up":true}"#).unwrap();
        assert_eq!(king, Card::face_up(Rank::KING, Suit::Spades));
        assert_eq!(serde_json::to_string(&Rank::KING).unwrap(), "12");

        let bad = serde_json::from_str::<Card>(r#"{"rank":13,"suit":"Spades","face_up":true}"#);
        assert!(bad.is_err());
        assert!(bincode::deserialize::<Rank>(&[200]).is_err());
        assert_eq!(bincode::deserialize::<Rank>(&[0]).unwrap(), Rank::ACE);
    }
}
