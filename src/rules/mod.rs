//! Klondike rules: legality, execution, rewards, terminal detection.
//!
//! - `validator`: ordered legality checks and `MoveError`
//! - `executor`: pile mutations per `MoveKind`
//! - `engine`: the `RulesEngine` trait and `KlondikeRules`

pub mod engine;
pub mod executor;
pub mod validator;

pub use engine::{GameResult, KlondikeRules, RulesEngine, Transition};
pub use executor::Effects;
pub use validator::{classify, is_legal, validate, MoveError};
