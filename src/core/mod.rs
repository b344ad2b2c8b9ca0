//! Core engine types: cards, piles, locations, moves, state, RNG, configuration.
//!
//! Nothing in here knows the rules of Klondike beyond the table layout;
//! legality and execution live in `rules`.

pub mod action;
pub mod card;
pub mod config;
pub mod location;
pub mod pile;
pub mod rng;
pub mod state;

pub use action::{Move, MoveKind, MoveRecord};
pub use card::{Card, Color, Rank, Suit, DECK_SIZE, RANK_COUNT, SUIT_COUNT};
pub use config::{ConfigError, GameConfig, RewardTable};
pub use location::{
    category_of, Category, Location, DECK_INDEX, FOUNDATION_START, LOCATION_COUNT, TABLEAU_COUNT,
    WASTE_INDEX,
};
pub use pile::{Pile, PileError, Run};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, InvariantError, SnapshotError};
