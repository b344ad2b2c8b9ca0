//! Flat action indices for discrete-action learners.
//!
//! The index range `0..ActionSpace::SIZE` is partitioned by move family:
//!
//! | Range     | Family                  | Moves |
//! |-----------|-------------------------|-------|
//! | 0..7      | flip tableau `i`        | 7     |
//! | 7         | draw deck -> waste      | 1     |
//! | 8         | recycle waste -> deck   | 1     |
//! | 9..16     | waste -> tableau `j`    | 7     |
//! | 16..20    | waste -> foundation `f` | 4     |
//! | 20..48    | tableau `i` -> foundation `f` | 28 |
//! | 48..594   | tableau `i` -> tableau `j != i`, `count` 1..=13 | 546 |
//! | 594..622  | foundation `f` -> tableau `j` | 28 |
//!
//! `decode` is total on the range and `encode` is its exact inverse on the
//! moves `decode` produces. Legality is not considered here.

use crate::core::{Move, DECK_INDEX, FOUNDATION_START, RANK_COUNT, SUIT_COUNT, TABLEAU_COUNT, WASTE_INDEX};

const FLIP: usize = 0;
const DRAW: usize = FLIP + TABLEAU_COUNT;
const RECYCLE: usize = DRAW + 1;
const WASTE_TO_TABLEAU: usize = RECYCLE + 1;
const WASTE_TO_FOUNDATION: usize = WASTE_TO_TABLEAU + TABLEAU_COUNT;
const TABLEAU_TO_FOUNDATION: usize = WASTE_TO_FOUNDATION + SUIT_COUNT;
const TABLEAU_TO_TABLEAU: usize = TABLEAU_TO_FOUNDATION + TABLEAU_COUNT * SUIT_COUNT;
const FOUNDATION_TO_TABLEAU: usize =
    TABLEAU_TO_TABLEAU + TABLEAU_COUNT * (TABLEAU_COUNT - 1) * RANK_COUNT;
const END: usize = FOUNDATION_TO_TABLEAU + SUIT_COUNT * TABLEAU_COUNT;

/// Bijection between flat indices and structured moves.
#[derive(Clone, Copy, Debug, Default)]
pub struct ActionSpace;

impl ActionSpace {
    pub const SIZE: usize = END;

    /// Map an index to its move. `None` outside `0..SIZE`.
    #[must_use]
    pub fn decode(index: usize) -> Option<Move> {
        let mv = match index {
            i if i < DRAW => Move::flip(i - FLIP),
            DRAW => Move::draw(),
            RECYCLE => Move::recycle(),
            i if i < WASTE_TO_FOUNDATION => Move::new(WASTE_INDEX, i - WASTE_TO_TABLEAU, 1),
            i if i < TABLEAU_TO_FOUNDATION => {
                Move::new(WASTE_INDEX, FOUNDATION_START + i - WASTE_TO_FOUNDATION, 1)
            }
            i if i < TABLEAU_TO_TABLEAU => {
                let offset = i - TABLEAU_TO_FOUNDATION;
                Move::new(
                    offset / SUIT_COUNT,
                    FOUNDATION_START + offset % SUIT_COUNT,
                    1,
                )
            }
            i if i < FOUNDATION_TO_TABLEAU => {
                let offset = i - TABLEAU_TO_TABLEAU;
                let count = offset % RANK_COUNT + 1;
                let pair = offset / RANK_COUNT;
                let from = pair / (TABLEAU_COUNT - 1);
                let slot = pair % (TABLEAU_COUNT - 1);
                // Skip the source pile when numbering targets.
                let to = if slot < from { slot } else { slot + 1 };
                Move::new(from, to, count)
            }
            i if i < END => {
                let offset = i - FOUNDATION_TO_TABLEAU;
                Move::new(
                    FOUNDATION_START + offset / TABLEAU_COUNT,
                    offset % TABLEAU_COUNT,
                    1,
                )
            }
            _ => return None,
        };
        Some(mv)
    }

    /// Map a move to its index. `None` for moves outside the space.
    #[must_use]
    pub fn encode(mv: &Move) -> Option<usize> {
        let is_tableau = |loc: usize| loc < TABLEAU_COUNT;
        let foundation = |loc: usize| {
            (FOUNDATION_START..FOUNDATION_START + SUIT_COUNT)
                .contains(&loc)
                .then(|| loc - FOUNDATION_START)
        };

        let Move {
            current,
            next,
            count,
        } = *mv;

        if *mv == Move::draw() {
            return Some(DRAW);
        }
        if *mv == Move::recycle() {
            return Some(RECYCLE);
        }
        if current == next {
            return (is_tableau(current) && count == 1).then_some(FLIP + current);
        }

        if is_tableau(current) && is_tableau(next) {
            if !(1..=RANK_COUNT).contains(&count) {
                return None;
            }
            let slot = if next < current { next } else { next - 1 };
            let pair = current * (TABLEAU_COUNT - 1) + slot;
            return Some(TABLEAU_TO_TABLEAU + pair * RANK_COUNT + count - 1);
        }

        if count != 1 {
            return None;
        }
        if current == WASTE_INDEX && is_tableau(next) {
            return Some(WASTE_TO_TABLEAU + next);
        }
        if current == WASTE_INDEX {
            return foundation(next).map(|f| WASTE_TO_FOUNDATION + f);
        }
        if is_tableau(current) {
            return foundation(next).map(|f| TABLEAU_TO_FOUNDATION + current * SUIT_COUNT + f);
        }
        if current == DECK_INDEX {
            return None;
        }
        match (foundation(current), is_tableau(next)) {
            (Some(f), true) => Some(FOUNDATION_TO_TABLEAU + f * TABLEAU_COUNT + next),
            _ => None,
        }
    }

    /// Every move in the space, in index order.
    pub fn iter() -> impl Iterator<Item = Move> {
        (0..Self::SIZE).filter_map(Self::decode)
    }
}
