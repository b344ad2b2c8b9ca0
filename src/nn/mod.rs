//! Neural network boundary: numeric observations and flat actions.
//!
//! ## Overview
//!
//! - **Encoding**: `StateEncoder` trait and the `KlondikeEncoder` projection
//! - **Actions**: `ActionSpace`, a bijection between `0..622` and moves
//!
//! ## Usage
//!
//! ```
//! use klondike_env::core::{GameRng, GameState};
//! use klondike_env::nn::{ActionSpace, KlondikeEncoder, StateEncoder};
//!
//! let state = GameState::deal(&mut GameRng::new(42));
//! let encoder = KlondikeEncoder::new(24);
//!
//! let encoded = encoder.encode(&state);
//! assert_eq!(encoded.shape, encoder.output_shape());
//!
//! let mv = ActionSpace::decode(7).unwrap();
//! assert_eq!(ActionSpace::encode(&mv), Some(7));
//! ```

pub mod action_space;
pub mod encoder;
pub mod traits;

pub use action_space::ActionSpace;
pub use encoder::{KlondikeEncoder, StateEncoder};
pub use traits::EncodedState;
