//! # klondike-env
//!
//! A Klondike solitaire rules engine packaged as an environment for RL
//! training.
//!
//! ## Design Principles
//!
//! 1. **Explicit Moves**: An agent names a source location, a destination
//!    and a card count. The engine validates and executes exactly that move;
//!    it never searches or enumerates on the agent's behalf.
//!
//! 2. **Fixed Location Contract**: Locations 0-6 are the tableau, 7 the
//!    deck, 8 the waste and 9-12 the Spades, Hearts, Clubs and Diamonds
//!    foundations. Every layer speaks this index.
//!
//! 3. **Rejection Is Free of Side Effects**: An illegal move costs a penalty
//!    and a step, never a change to the table.
//!
//! ## Modules
//!
//! - `core`: Cards, piles, locations, moves, state, RNG, configuration
//! - `rules`: Validation, execution and the `RulesEngine` trait
//! - `env`: `KlondikeEnv`, the reset/step loop
//! - `nn`: Flat tensor encoding and the flat action space
//! - `python`: PyO3 bindings (feature `python`)

pub mod core;
pub mod env;
pub mod nn;
pub mod rules;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Card, Color, Rank, Suit,
    Pile, Location, Category,
    Move, MoveKind, MoveRecord,
    GameRng, GameRngState,
    GameConfig, RewardTable,
    GameState,
};

pub use crate::rules::{GameResult, KlondikeRules, MoveError, RulesEngine};

pub use crate::env::{GameElements, KlondikeEnv, Observation, StepInfo, StepResult};

pub use crate::nn::{ActionSpace, EncodedState, KlondikeEncoder, StateEncoder};
