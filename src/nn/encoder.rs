//! State encoding for neural network input.
//!
//! Transforms a `GameState` into a fixed-width tensor. The projection is
//! the only place that decides how a pile maps to numbers; nothing else in
//! the crate does index arithmetic on observations.

use crate::core::{GameState, DECK_SIZE, LOCATION_COUNT};
use crate::nn::action_space::ActionSpace;
use crate::nn::traits::EncodedState;

/// Encodes game state into tensors for neural network input.
pub trait StateEncoder: Send + Sync {
    /// Encode what the player can see. Face-down cards must not leak their
    /// identity.
    fn encode(&self, state: &GameState) -> EncodedState;

    /// Get the shape of encoded states.
    fn output_shape(&self) -> Vec<usize>;

    /// Size of the policy output vector.
    fn action_space_size(&self) -> usize;
}

/// Fixed-depth projection of the 13 piles.
///
/// Output shape is `[13, 1 + 3 * depth]`, one row per location in index
/// order. Each row holds:
///
/// - pile length / 52
/// - `depth` slots starting at the top card, each `[present, face_up, id]`
///   where `id = (card.id() + 1) / 52` for face-up cards and 0 otherwise
///
/// Cards deeper than `depth` are dropped; the length feature still counts
/// them.
#[derive(Clone, Debug)]
pub struct KlondikeEncoder {
    depth: usize,
}

const SLOT_FEATURES: usize = 3;

impl KlondikeEncoder {
    pub fn new(depth: usize) -> Self {
        assert!(depth > 0, "observation depth must be at least 1");
        Self { depth }
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn row_width(&self) -> usize {
        1 + SLOT_FEATURES * self.depth
    }
}

impl Default for KlondikeEncoder {
    fn default() -> Self {
        Self::new(24)
    }
}

impl StateEncoder for KlondikeEncoder {
    fn encode(&self, state: &GameState) -> EncodedState {
        let width = self.row_width();
        let mut tensor = vec![0.0f32; LOCATION_COUNT * width];

        for (loc, pile) in state.piles().iter().enumerate() {
            let row = &mut tensor[loc * width..(loc + 1) * width];
            row[0] = pile.len() as f32 / DECK_SIZE as f32;

            for (slot, card) in pile.iter_top_first().take(self.depth).enumerate() {
                let base = 1 + slot * SLOT_FEATURES;
                row[base] = 1.0;
                if card.is_face_up() {
                    row[base + 1] = 1.0;
                    row[base + 2] = (card.id() + 1) as f32 / DECK_SIZE as f32;
                }
            }
        }

        EncodedState::new(tensor, self.output_shape())
    }

    fn output_shape(&self) -> Vec<usize> {
        vec![LOCATION_COUNT, self.row_width()]
    }

    fn action_space_size(&self) -> usize {
        ActionSpace::SIZE
    }
}
