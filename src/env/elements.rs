//! What the caller sees: the masked observation and the full element dump.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Card, GameState, Location, Pile, Rank, Suit, DECK_INDEX, TABLEAU_COUNT, WASTE_INDEX};

/// Per-location view of the table for an agent.
///
/// `piles[i]` lists location `i` bottom to top. Face-down cards are `None`,
/// so the observation carries exactly what a player could see.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub piles: Vec<Vec<Option<Card>>>,
}

impl Observation {
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        let piles = state
            .piles()
            .iter()
            .map(|pile| {
                pile.cards()
                    .iter()
                    .map(|card| card.is_face_up().then_some(*card))
                    .collect()
            })
            .collect();
        Self { piles }
    }

    /// Number of cards at a location.
    #[must_use]
    pub fn len(&self, location: usize) -> usize {
        self.piles.get(location).map_or(0, Vec::len)
    }

    /// Visible top card of a location, if it has one.
    #[must_use]
    pub fn top(&self, location: usize) -> Option<Card> {
        self.piles.get(location)?.last().copied().flatten()
    }
}

/// One card as it lies on the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub rank: Rank,
    pub suit: Suit,
    pub face_up: bool,
}

impl From<&Card> for CardSnapshot {
    fn from(card: &Card) -> Self {
        Self {
            rank: card.rank,
            suit: card.suit,
            face_up: card.is_face_up(),
        }
    }
}

impl fmt::Display for CardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Full, unmasked dump of every pile, bottom to top. For display and tests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameElements {
    pub deck: Vec<CardSnapshot>,
    pub waste: Vec<CardSnapshot>,
    pub tableau: Vec<Vec<CardSnapshot>>,
    /// In `Suit::ALL` order.
    pub foundations: Vec<Vec<CardSnapshot>>,
}

fn snapshot(pile: &Pile) -> Vec<CardSnapshot> {
    pile.cards().iter().map(CardSnapshot::from).collect()
}

impl GameElements {
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        Self {
            deck: snapshot(state.pile(Location::DECK)),
            waste: snapshot(state.pile(Location::WASTE)),
            tableau: (0..TABLEAU_COUNT).map(|i| snapshot(state.tableau(i))).collect(),
            foundations: Suit::ALL
                .iter()
                .map(|&suit| snapshot(state.foundation(suit)))
                .collect(),
        }
    }

    /// Pretty JSON for logs and debugging.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// "3 cards flipped down, 9♣, 8♥" style summary of a pile.
fn write_pile(f: &mut fmt::Formatter<'_>, cards: &[CardSnapshot]) -> fmt::Result {
    let hidden = cards.iter().filter(|c| !c.face_up).count();
    let mut parts: Vec<String> = Vec::new();
    if hidden > 0 {
        parts.push(format!("{hidden} cards flipped down"));
    }
    parts.extend(cards.iter().filter(|c| c.face_up).map(ToString::to_string));
    f.write_str(&parts.join(", "))
}

impl fmt::Display for GameElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "deck ({DECK_INDEX}): ")?;
        write_pile(f, &self.deck)?;
        write!(f, "\nwaste ({WASTE_INDEX}): ")?;
        write_pile(f, &self.waste)?;
        for (i, pile) in self.tableau.iter().enumerate() {
            write!(f, "\ntableau {i}: ")?;
            write_pile(f, pile)?;
        }
        for (suit, pile) in Suit::ALL.iter().zip(&self.foundations) {
            write!(f, "\n{suit} foundation: ")?;
            write_pile(f, pile)?;
        }
        Ok(())
    }
}
