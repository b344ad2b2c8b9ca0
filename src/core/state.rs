//! Game state: the 13 piles plus episode bookkeeping.
//!
//! `GameState` exclusively owns every pile. It is created by [`GameState::deal`]
//! once per episode and afterwards mutated only by the rules engine.
//! [`GameState::empty`] and [`GameState::pile_mut`] exist so drivers and tests
//! can set up arbitrary positions; such positions bypass validation.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::action::MoveRecord;
use super::card::{Card, Rank, Suit, DECK_SIZE, RANK_COUNT};
use super::location::{Category, Location, DECK_INDEX, LOCATION_COUNT, TABLEAU_COUNT, WASTE_INDEX};
use super::pile::Pile;
use super::rng::GameRng;

/// A broken structural invariant. Indicates an engine bug or a hand-built
/// position that could never arise from legal play.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("expected 52 cards on the table, found {found}")]
    CardCount { found: usize },
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("{card} sits on the {expected:?} foundation")]
    FoundationWrongSuit { card: Card, expected: Suit },
    #[error("{card} at height {height} of its foundation")]
    FoundationOutOfOrder { card: Card, height: usize },
}

/// Snapshot encoding errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot encoding failed: {0}")]
    Bincode(#[from] bincode::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Indexed by location (see `core::location`).
    piles: [Pile; LOCATION_COUNT],

    /// Number of `step` calls this episode, valid or not.
    pub steps: u32,

    /// Sum of rewards this episode.
    pub score: f64,

    /// Applied moves, oldest first.
    pub history: Vector<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::empty()
    }
}

impl GameState {
    /// A state with all 13 piles empty.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            piles: std::array::from_fn(|_| Pile::new()),
            steps: 0,
            score: 0.0,
            history: Vector::new(),
        }
    }

    /// Deal a fresh game.
    ///
    /// Tableau pile `i` receives `i + 1` cards with only its top card face
    /// up; the remaining 24 cards form the face-down deck.
    #[must_use]
    pub fn deal(rng: &mut GameRng) -> Self {
        let ranks: Vec<Rank> = Rank::all().collect();
        let mut stock = Pile::new();
        stock.deal(&ranks, &Suit::ALL);
        stock.shuffle(rng);

        let mut state = Self::empty();
        for i in 0..TABLEAU_COUNT {
            let pile = &mut state.piles[i];
            for _ in 0..=i {
                match stock.remove_top() {
                    Ok(card) => pile.insert_top(card),
                    Err(e) => unreachable!("a full deck covers the tableau: {e}"),
                }
            }
            pile.flip_top();
        }
        state.piles[DECK_INDEX] = stock;
        state
    }

    // === Pile access ===

    #[must_use]
    pub fn pile(&self, location: Location) -> &Pile {
        &self.piles[location.index()]
    }

    /// Mutable access to a pile. Changes made here are not validated.
    pub fn pile_mut(&mut self, location: Location) -> &mut Pile {
        &mut self.piles[location.index()]
    }

    /// Pile at a raw index, or `None` when out of range.
    #[must_use]
    pub fn pile_at(&self, index: usize) -> Option<&Pile> {
        self.piles.get(index)
    }

    /// All piles in location order.
    #[must_use]
    pub fn piles(&self) -> &[Pile] {
        &self.piles
    }

    #[must_use]
    pub fn tableau(&self, i: usize) -> &Pile {
        &self.piles[i]
    }

    #[must_use]
    pub fn deck(&self) -> &Pile {
        &self.piles[DECK_INDEX]
    }

    #[must_use]
    pub fn waste(&self) -> &Pile {
        &self.piles[WASTE_INDEX]
    }

    #[must_use]
    pub fn foundation(&self, suit: Suit) -> &Pile {
        self.pile(Location::foundation(suit))
    }

    /// Borrow two distinct piles mutably.
    ///
    /// Panics if `a == b`.
    pub fn pile_pair_mut(&mut self, a: Location, b: Location) -> (&mut Pile, &mut Pile) {
        let (a, b) = (a.index(), b.index());
        assert_ne!(a, b, "cannot borrow pile {a} twice");
        if a < b {
            let (lo, hi) = self.piles.split_at_mut(b);
            (&mut lo[a], &mut hi[0])
        } else {
            let (lo, hi) = self.piles.split_at_mut(a);
            (&mut hi[0], &mut lo[b])
        }
    }

    // === Terminal detection ===

    /// True iff all tableau piles, the deck and the waste are empty.
    ///
    /// With card conservation this is the same as every foundation holding
    /// its full suit.
    #[must_use]
    pub fn check_if_completed(&self) -> bool {
        self.piles[..=WASTE_INDEX].iter().all(Pile::is_empty)
    }

    // === Invariants ===

    /// Total number of cards across all piles.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.piles.iter().map(Pile::len).sum()
    }

    /// Verify card conservation and foundation order.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let found = self.card_count();
        if found != DECK_SIZE {
            return Err(InvariantError::CardCount { found });
        }

        let mut seen = FxHashSet::default();
        for card in self.piles.iter().flat_map(|p| p.cards()) {
            if !seen.insert(*card) {
                return Err(InvariantError::DuplicateCard(*card));
            }
        }

        for location in Location::all() {
            let Category::Foundation(suit) = location.category() else {
                continue;
            };
            for (height, card) in self.pile(location).cards().iter().enumerate() {
                if card.suit != suit {
                    return Err(InvariantError::FoundationWrongSuit {
                        card: *card,
                        expected: suit,
                    });
                }
                if card.rank.index() as usize != height || height >= RANK_COUNT {
                    return Err(InvariantError::FoundationOutOfOrder {
                        card: *card,
                        height,
                    });
                }
            }
        }

        Ok(())
    }

    // === Snapshots ===

    /// Encode the full state with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a state produced by [`GameState::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dealt(seed: u64) -> GameState {
        GameState::deal(&mut GameRng::new(seed))
    }

    #[test]
    fn test_deal_layout() {
        let state = dealt(42);

        for i in 0..TABLEAU_COUNT {
            let pile = state.tableau(i);
            assert_eq!(pile.len(), i + 1);
            assert!(pile.top().unwrap().is_face_up());
            assert_eq!(pile.cards().iter().filter(|c| c.is_face_up()).count(), 1);
        }
        assert_eq!(state.deck().len(), 24);
        assert!(state.deck().cards().iter().all(|c| !c.is_face_up()));
        assert!(state.waste().is_empty());
        for suit in Suit::ALL {
            assert!(state.foundation(suit).is_empty());
        }
        assert_eq!(state.steps, 0);
        assert!(!state.check_if_completed());
    }

    #[test]
    fn test_deal_conserves_cards() {
        assert_eq!(dealt(7).check_invariants(), Ok(()));
    }

    #[test]
    fn test_deal_is_seeded() {
        assert_eq!(dealt(9), dealt(9));
        assert_ne!(dealt(9).deck(), dealt(10).deck());
    }

    #[test]
    fn test_empty_is_completed() {
        assert!(GameState::empty().check_if_completed());
        assert!(!dealt(1).check_if_completed());
    }

    #[test]
    fn test_detects_duplicate_card() {
        let mut state = dealt(3);
        let card = *state.tableau(0).top().unwrap();
        state.pile_mut(Location::WASTE).insert_top(card);
        let _ = state.pile_mut(Location::DECK).remove_top();

        assert_eq!(state.check_invariants(), Err(InvariantError::DuplicateCard(card)));
    }

    #[test]
    fn test_detects_foundation_disorder() {
        let mut state = GameState::empty();
        for suit in Suit::ALL {
            let location = Location::foundation(suit);
            for rank in Rank::all() {
                state.pile_mut(location).insert_top(Card::face_up(rank, suit));
            }
        }
        assert_eq!(state.check_invariants(), Ok(()));

        let spades = Location::foundation(Suit::Spades);
        let king = state.pile_mut(spades).remove_top().unwrap();
        let queen = state.pile_mut(spades).remove_top().unwrap();
        state.pile_mut(spades).insert_top(king);
        state.pile_mut(spades).insert_top(queen);

        assert_eq!(
            state.check_invariants(),
            Err(InvariantError::FoundationOutOfOrder {
                card: king,
                height: 11
            })
        );
    }

    #[test]
    fn test_pile_pair_mut() {
        let mut state = dealt(5);
        let a = Location::tableau(1).unwrap();
        let b = Location::tableau(4).unwrap();

        let (first, second) = state.pile_pair_mut(b, a);
        assert_eq!(first.len(), 5);
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let state = dealt(11);
        let bytes = state.to_bytes().unwrap();
        let restored = GameState::from_bytes(&bytes).unwrap();

        assert_eq!(state, restored);
        for (a, b) in state.piles().iter().zip(restored.piles()) {
            let flags_a: Vec<_> = a.cards().iter().map(|c| c.is_face_up()).collect();
            let flags_b: Vec<_> = b.cards().iter().map(|c| c.is_face_up()).collect();
            assert_eq!(flags_a, flags_b);
        }
    }
}
