//! Move execution.
//!
//! The routines here assume the move has passed `validator::validate`. A pile
//! turning out empty at this point means validation and execution disagree,
//! which is an engine bug, so it panics instead of returning an error.

use crate::core::{GameState, Location, Move, MoveKind};

/// Observable side effects of an executed move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Effects {
    /// The source pile's new top card was turned face up.
    pub revealed: bool,
}

/// Apply a validated move of the given kind.
pub fn execute(state: &mut GameState, mv: &Move, kind: MoveKind) -> Effects {
    let (Some(source), Some(target)) = (Location::new(mv.current), Location::new(mv.next)) else {
        panic!("executing unvalidated move {mv}");
    };

    match kind {
        MoveKind::Flip => {
            state.pile_mut(source).flip_top();
            Effects::default()
        }
        MoveKind::DeckToWaste => {
            draw(state);
            Effects::default()
        }
        MoveKind::WasteToDeck => {
            recycle(state);
            Effects::default()
        }
        MoveKind::PileToPile
        | MoveKind::PileToFoundation
        | MoveKind::WasteToPile
        | MoveKind::WasteToFoundation
        | MoveKind::FoundationToPile => transfer(state, source, target, mv.count),
    }
}

/// Move `count` cards from the top of `source` onto `target`, keeping their
/// order, then turn up the newly exposed source card if it is face down.
fn transfer(state: &mut GameState, source: Location, target: Location, count: usize) -> Effects {
    let (from, to) = state.pile_pair_mut(source, target);
    let run = from
        .take_top(count)
        .unwrap_or_else(|e| panic!("validated transfer out of {source}: {e}"));
    to.put_top(run);

    let revealed = from.top().is_some_and(|card| !card.is_face_up());
    if revealed {
        from.flip_top();
    }
    Effects { revealed }
}

/// Turn the deck's top card face up onto the waste.
fn draw(state: &mut GameState) {
    let (deck, waste) = state.pile_pair_mut(Location::DECK, Location::WASTE);
    let mut card = deck
        .remove_top()
        .unwrap_or_else(|e| panic!("validated draw from the deck: {e}"));
    card.set_face_up(true);
    waste.insert_top(card);
}

/// Turn the whole waste over into the empty deck.
///
/// The waste's top card ends at the bottom of the deck, so cards come back
/// out in the order they were first drawn.
fn recycle(state: &mut GameState) {
    let (waste, deck) = state.pile_pair_mut(Location::WASTE, Location::DECK);
    debug_assert!(deck.is_empty(), "recycling into a non-empty deck");
    let cards = waste.drain_reversed_face_down();
    deck.put_top(cards);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, Rank, Suit};

    fn up(rank: u8, suit: Suit) -> Card {
        Card::face_up(Rank::new(rank).unwrap(), suit)
    }

    fn down(rank: u8, suit: Suit) -> Card {
        Card::new(Rank::new(rank).unwrap(), suit)
    }

    fn tab(i: usize) -> Location {
        Location::tableau(i).unwrap()
    }

    #[test]
    fn test_transfer_keeps_order_and_reveals() {
        let mut state = GameState::empty();
        for card in [down(2, Suit::Clubs), up(12, Suit::Hearts), up(11, Suit::Spades)] {
            state.pile_mut(tab(0)).insert_top(card);
        }

        let effects = execute(&mut state, &Move::new(0, 3, 2), MoveKind::PileToPile);

        assert!(effects.revealed);
        assert_eq!(state.tableau(3).cards(), &[up(12, Suit::Hearts), up(11, Suit::Spades)]);
        assert_eq!(state.tableau(0).len(), 1);
        assert!(state.tableau(0).top().unwrap().is_face_up());
    }

    #[test]
    fn test_transfer_without_reveal() {
        let mut state = GameState::empty();
        state.pile_mut(tab(0)).insert_top(up(7, Suit::Spades));
        state.pile_mut(tab(0)).insert_top(up(6, Suit::Hearts));
        state.pile_mut(tab(1)).insert_top(up(7, Suit::Clubs));

        let effects = execute(&mut state, &Move::new(0, 1, 1), MoveKind::PileToPile);

        assert!(!effects.revealed);
        assert_eq!(state.tableau(0).cards(), &[up(7, Suit::Spades)]);
        assert_eq!(state.tableau(1).len(), 2);
    }

    #[test]
    fn test_draw_turns_card_up() {
        let mut state = GameState::empty();
        state.pile_mut(Location::DECK).insert_top(down(4, Suit::Diamonds));
        state.pile_mut(Location::DECK).insert_top(down(9, Suit::Clubs));

        execute(&mut state, &Move::draw(), MoveKind::DeckToWaste);

        assert_eq!(state.deck().len(), 1);
        let top = state.waste().top().unwrap();
        assert_eq!(*top, down(9, Suit::Clubs));
        assert!(top.is_face_up());
    }

    #[test]
    fn test_recycle_reverses_and_turns_down() {
        let mut state = GameState::empty();
        for card in [up(0, Suit::Spades), up(5, Suit::Hearts), up(9, Suit::Clubs)] {
            state.pile_mut(Location::WASTE).insert_top(card);
        }
        let waste_top_first: Vec<Card> = state.waste().iter_top_first().copied().collect();

        execute(&mut state, &Move::recycle(), MoveKind::WasteToDeck);

        assert!(state.waste().is_empty());
        let deck_top_first: Vec<Card> = state.deck().iter_top_first().copied().collect();
        let reversed: Vec<Card> = waste_top_first.into_iter().rev().collect();
        assert_eq!(deck_top_first, reversed);
        assert!(state.deck().cards().iter().all(|c| !c.is_face_up()));
        // First card drawn originally is drawn first again.
        assert_eq!(state.deck().top(), Some(&up(0, Suit::Spades)));
    }

    #[test]
    fn test_flip() {
        let mut state = GameState::empty();
        state.pile_mut(tab(5)).insert_top(down(3, Suit::Hearts));

        execute(&mut state, &Move::flip(5), MoveKind::Flip);
        assert!(state.tableau(5).top().unwrap().is_face_up());
    }

    #[test]
    #[should_panic(expected = "validated transfer")]
    fn test_transfer_from_empty_panics() {
        let mut state = GameState::empty();
        execute(&mut state, &Move::new(0, 1, 1), MoveKind::PileToPile);
    }
}
