//! Environment surface for a learning agent.
//!
//! `KlondikeEnv` owns one game at a time and exposes the gym-style
//! `reset`/`step` loop on top of the rules engine.
//!
//! ```
//! use klondike_env::core::{GameConfig, Move};
//! use klondike_env::env::KlondikeEnv;
//!
//! let mut env = KlondikeEnv::new(GameConfig::default(), 42).unwrap();
//! let result = env.step(Move::draw());
//! assert!(result.info.valid);
//! assert!(!result.done);
//! ```

pub mod elements;
pub mod klondike;

pub use elements::{CardSnapshot, GameElements, Observation};
pub use klondike::{EnvCheckpoint, KlondikeEnv, StepInfo, StepResult};
