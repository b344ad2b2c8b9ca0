//! Rules engine: validate, execute, reward, detect the end.
//!
//! `RulesEngine` is the seam between the table state and whatever drives it
//! (the environment, a replay tool, a benchmark). `KlondikeRules` is the
//! standard single-draw Klondike implementation.

use tracing::trace;

use crate::core::{GameConfig, GameState, Move, MoveKind, MoveRecord};

use super::executor::{self, Effects};
use super::validator::{self, MoveError};

/// How an episode ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Every card reached its foundation.
    Won,
    /// The configured step budget is spent. Reported for the driver; the
    /// engine keeps accepting moves.
    StepLimit,
}

/// Outcome of an applied move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub kind: MoveKind,
    pub reward: f64,
    pub revealed: bool,
    pub completed: bool,
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `validate` must not mutate anything
/// - `apply_move` must leave the state untouched when it returns an error
/// - `apply_move` must be deterministic
pub trait RulesEngine {
    /// Get the engine configuration.
    fn config(&self) -> &GameConfig;

    /// Check a move and classify it.
    fn validate(&self, state: &GameState, mv: &Move) -> Result<MoveKind, MoveError>;

    /// Validate and, if legal, apply a move.
    fn apply_move(&self, state: &mut GameState, mv: &Move) -> Result<Transition, MoveError>;

    /// Check if the episode is over.
    ///
    /// Returns `None` while the game continues.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    /// Convenience wrapper around `validate`.
    fn is_legal(&self, state: &GameState, mv: &Move) -> bool {
        self.validate(state, mv).is_ok()
    }
}

/// Standard Klondike rules: one card per draw, unlimited recycles.
#[derive(Clone, Debug, Default)]
pub struct KlondikeRules {
    config: GameConfig,
}

impl KlondikeRules {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }
}

impl RulesEngine for KlondikeRules {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn validate(&self, state: &GameState, mv: &Move) -> Result<MoveKind, MoveError> {
        validator::validate(state, mv)
    }

    fn apply_move(&self, state: &mut GameState, mv: &Move) -> Result<Transition, MoveError> {
        let kind = validator::validate(state, mv)?;
        let Effects { revealed } = executor::execute(state, mv, kind);

        let completed = state.check_if_completed();

        let reward = if completed {
            self.config.rewards.win
        } else {
            self.config.rewards.reward(kind)
        };

        state.history.push_back(MoveRecord {
            mv: *mv,
            kind,
            reward,
            step: state.steps,
        });
        trace!(%mv, kind = kind.name(), reward, revealed, "applied move");

        Ok(Transition {
            kind,
            reward,
            revealed,
            completed,
        })
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        if state.check_if_completed() {
            return Some(GameResult::Won);
        }
        match self.config.max_steps {
            Some(limit) if state.steps >= limit => Some(GameResult::StepLimit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, GameRng, Location, Rank, Suit};
    use crate::env::GameElements;

    fn nearly_won() -> GameState {
        // Everything on the foundations except the King of diamonds,
        // which sits alone on tableau 0.
        let mut state = GameState::empty();
        for suit in Suit::ALL {
            for rank in Rank::all() {
                let card = Card::face_up(rank, suit);
                if suit == Suit::Diamonds && rank == Rank::KING {
                    state.pile_mut(Location::tableau(0).unwrap()).insert_top(card);
                } else {
                    state.pile_mut(Location::foundation(suit)).insert_top(card);
                }
            }
        }
        state
    }

    #[test]
    fn test_valid_move_is_applied_and_recorded() {
        let rules = KlondikeRules::default();
        let mut state = GameState::deal(&mut GameRng::new(42));

        let transition = rules.apply_move(&mut state, &Move::draw()).unwrap();

        assert_eq!(transition.kind, MoveKind::DeckToWaste);
        assert_eq!(transition.reward, rules.config().rewards.deck_to_waste);
        assert_eq!(state.waste().len(), 1);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].mv, Move::draw());
    }

    #[test]
    fn test_invalid_move_leaves_state_untouched() {
        let rules = KlondikeRules::default();
        let mut state = GameState::deal(&mut GameRng::new(42));
        let before = GameElements::from_state(&state);

        let result = rules.apply_move(&mut state, &Move::recycle());
        assert_eq!(result, Err(MoveError::EmptySource { location: 8 }));

        // A flip of an already face-up top would change orientation only.
        let result = rules.apply_move(&mut state, &Move::flip(3));
        assert_eq!(result, Err(MoveError::AlreadyFaceUp));

        assert_eq!(GameElements::from_state(&state), before);
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_winning_move() {
        let rules = KlondikeRules::default();
        let mut state = nearly_won();
        assert_eq!(rules.is_terminal(&state), None);

        let diamonds = Location::foundation(Suit::Diamonds).index();
        let transition = rules.apply_move(&mut state, &Move::new(0, diamonds, 1)).unwrap();

        assert!(transition.completed);
        assert_eq!(transition.reward, rules.config().rewards.win);
        assert!(state.check_if_completed());
        assert_eq!(rules.is_terminal(&state), Some(GameResult::Won));
        assert_eq!(state.check_invariants(), Ok(()));
    }

    #[test]
    fn test_step_limit() {
        let rules = KlondikeRules::new(GameConfig::new().with_max_steps(3));
        let mut state = GameState::deal(&mut GameRng::new(1));

        state.steps = 2;
        assert_eq!(rules.is_terminal(&state), None);
        state.steps = 3;
        assert_eq!(rules.is_terminal(&state), Some(GameResult::StepLimit));
    }

    #[test]
    fn test_is_legal() {
        let rules = KlondikeRules::default();
        let state = GameState::deal(&mut GameRng::new(5));

        assert!(rules.is_legal(&state, &Move::draw()));
        assert!(!rules.is_legal(&state, &Move::recycle()));
        assert!(!rules.is_legal(&state, &Move::new(0, 42, 1)));
    }
}
