//! Move legality.
//!
//! [`validate`] runs the checks in a fixed order and reports the first one
//! that fails:
//!
//! 1. both locations exist
//! 2. the source holds at least `count` cards (and at least one)
//! 3. the deck only receives the waste, and only when empty
//! 4. a flip turns a face-down tableau top face up
//! 5. deck and waste are never stacking targets
//! 6. every moved card is face up and a multi-card run is a valid sequence
//! 7. foundations take one card of their suit, Ace first, then ascending
//! 8. tableau piles take a King when empty, otherwise the next lower rank
//!    of the opposite color
//!
//! A rejected move is an ordinary outcome, not a fault: the caller gets a
//! `MoveError` describing the reason and the state is untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{category_of, Card, Category, GameState, Location, Move, MoveKind, Pile, Suit};

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MoveError {
    #[error("location {location} is out of range 0..13")]
    LocationOutOfRange { location: usize },
    #[error("source location {location} is empty")]
    EmptySource { location: usize },
    #[error("cannot move {count} cards from a pile of {available}")]
    CountExceedsPile { count: usize, available: usize },
    #[error("a move must carry at least one card")]
    ZeroCount,
    #[error("this move takes exactly one card, got {count}")]
    CountNotOne { count: usize },
    #[error("the deck only receives the recycled waste")]
    DeckNotTarget,
    #[error("the waste can only be recycled into an empty deck")]
    DeckNotEmpty,
    #[error("only tableau piles can be flipped")]
    NotFlippable,
    #[error("the top card is already face up")]
    AlreadyFaceUp,
    #[error("cards cannot move from location {from} to location {to}")]
    IllegalRoute { from: usize, to: usize },
    #[error("the moved cards include a face-down card")]
    FaceDownCard,
    #[error("the moved cards do not form a descending alternating run")]
    BrokenRun,
    #[error("a {found:?} card cannot go on the {expected:?} foundation")]
    WrongSuit { expected: Suit, found: Suit },
    #[error("an empty foundation only accepts an Ace")]
    AceRequired,
    #[error("an empty tableau pile only accepts a King")]
    KingRequired,
    #[error("the target's top card is face down")]
    TargetFaceDown,
    #[error("stacked cards must alternate colors")]
    SameColor,
    #[error("the rank does not follow the target's top card")]
    NotNextRank,
}

/// Resolve a raw index into a location.
pub fn location(index: usize) -> Result<Location, MoveError> {
    Location::new(index).ok_or(MoveError::LocationOutOfRange { location: index })
}

/// Classify a move from its locations alone.
///
/// Same-location moves are always flips. Routes the game never allows are
/// reported as errors.
pub fn classify(mv: &Move) -> Result<MoveKind, MoveError> {
    let from = category_of(mv.current).ok_or(MoveError::LocationOutOfRange {
        location: mv.current,
    })?;
    let to = category_of(mv.next).ok_or(MoveError::LocationOutOfRange { location: mv.next })?;

    if mv.is_flip() {
        return Ok(MoveKind::Flip);
    }
    MoveKind::between(from, to).ok_or(MoveError::IllegalRoute {
        from: mv.current,
        to: mv.next,
    })
}

/// Check a move against the current state.
///
/// On success returns the move's classification.
pub fn validate(state: &GameState, mv: &Move) -> Result<MoveKind, MoveError> {
    // 1. range
    let source_loc = location(mv.current)?;
    let target_loc = location(mv.next)?;
    let source = state.pile(source_loc);
    let target = state.pile(target_loc);

    // 2. source size
    if source.is_empty() {
        return Err(MoveError::EmptySource {
            location: mv.current,
        });
    }
    if mv.count > source.len() {
        return Err(MoveError::CountExceedsPile {
            count: mv.count,
            available: source.len(),
        });
    }

    // 3. deck as target: recycle only
    if target_loc == Location::DECK {
        if source_loc != Location::WASTE {
            return Err(MoveError::DeckNotTarget);
        }
        if !target.is_empty() {
            return Err(MoveError::DeckNotEmpty);
        }
        return Ok(MoveKind::WasteToDeck);
    }

    // 4. flip
    if mv.is_flip() {
        if !source_loc.category().is_tableau() {
            return Err(MoveError::NotFlippable);
        }
        if mv.count > 1 {
            return Err(MoveError::CountNotOne { count: mv.count });
        }
        if source.top().is_some_and(Card::is_face_up) {
            return Err(MoveError::AlreadyFaceUp);
        }
        return Ok(MoveKind::Flip);
    }

    // 5. routes: deck and waste are never stacking targets
    let kind = MoveKind::between(source_loc.category(), target_loc.category()).ok_or(
        MoveError::IllegalRoute {
            from: mv.current,
            to: mv.next,
        },
    )?;
    if kind == MoveKind::DeckToWaste {
        if mv.count > 1 {
            return Err(MoveError::CountNotOne { count: mv.count });
        }
        return Ok(kind);
    }

    // 6. moved cards
    if mv.count == 0 {
        return Err(MoveError::ZeroCount);
    }
    if !source_loc.category().is_tableau() && mv.count != 1 {
        return Err(MoveError::CountNotOne { count: mv.count });
    }
    check_run(source, mv.count)?;

    // The card that lands directly on the target.
    let landing = match source.nth_from_top(mv.count - 1) {
        Some(card) => *card,
        None => unreachable!("count was checked against the pile size"),
    };

    match target_loc.category() {
        // 7. foundation
        Category::Foundation(suit) => check_foundation(target, suit, &landing, mv.count)?,
        // 8. tableau
        Category::Tableau(_) => check_tableau(target, &landing)?,
        Category::Deck | Category::Waste => unreachable!("excluded by the route check"),
    }
    Ok(kind)
}

/// Is the move legal in this state?
#[must_use]
pub fn is_legal(state: &GameState, mv: &Move) -> bool {
    validate(state, mv).is_ok()
}

/// The top `count` cards must be face up and, read top down, strictly
/// ascending in rank with alternating colors.
fn check_run(source: &Pile, count: usize) -> Result<(), MoveError> {
    let run: Vec<&Card> = source.iter_top_first().take(count).collect();
    if run.iter().any(|card| !card.is_face_up()) {
        return Err(MoveError::FaceDownCard);
    }
    if run.windows(2).any(|pair| !pair[0].stacks_on(pair[1])) {
        return Err(MoveError::BrokenRun);
    }
    Ok(())
}

fn check_foundation(
    target: &Pile,
    suit: Suit,
    card: &Card,
    count: usize,
) -> Result<(), MoveError> {
    if count != 1 {
        return Err(MoveError::CountNotOne { count });
    }
    if card.suit != suit {
        return Err(MoveError::WrongSuit {
            expected: suit,
            found: card.suit,
        });
    }
    match target.top() {
        None if card.rank.is_ace() => Ok(()),
        None => Err(MoveError::AceRequired),
        Some(top) if top.rank.successor() == Some(card.rank) => Ok(()),
        Some(_) => Err(MoveError::NotNextRank),
    }
}

fn check_tableau(target: &Pile, card: &Card) -> Result<(), MoveError> {
    let Some(top) = target.top() else {
        return if card.rank.is_king() {
            Ok(())
        } else {
            Err(MoveError::KingRequired)
        };
    };
    if !top.is_face_up() {
        return Err(MoveError::TargetFaceDown);
    }
    if top.color() == card.color() {
        return Err(MoveError::SameColor);
    }
    if card.rank.successor() != Some(top.rank) {
        return Err(MoveError::NotNextRank);
    }
    Ok(())
}
