//! Engine configuration.
//!
//! - `RewardTable`: reward per move kind, plus the invalid-move penalty and
//!   the win reward
//! - `GameConfig`: reward table, observation depth, optional step limit
//!
//! Configs are plain serde data and can be loaded from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::action::MoveKind;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Reward assigned to each move classification.
///
/// Defaults follow the classic solitaire scoring: building on foundations
/// and bringing waste cards into play is rewarded, pulling cards back off a
/// foundation and recycling the waste are penalized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardTable {
    pub flip: f64,
    pub pile_to_pile: f64,
    pub pile_to_foundation: f64,
    pub deck_to_waste: f64,
    pub waste_to_deck: f64,
    pub waste_to_pile: f64,
    pub waste_to_foundation: f64,
    pub foundation_to_pile: f64,
    /// Returned for a rejected move; the state is left untouched.
    pub invalid: f64,
    /// Returned when the game is complete.
    pub win: f64,
}

impl Default for RewardTable {
    fn default() -> Self {
        Self {
            flip: 5.0,
            pile_to_pile: 0.0,
            pile_to_foundation: 10.0,
            deck_to_waste: 0.0,
            waste_to_deck: -10.0,
            waste_to_pile: 5.0,
            waste_to_foundation: 10.0,
            foundation_to_pile: -15.0,
            invalid: -1.0,
            win: 1.0,
        }
    }
}

impl RewardTable {
    /// Reward for an applied move of the given kind.
    #[must_use]
    pub fn reward(&self, kind: MoveKind) -> f64 {
        match kind {
            MoveKind::Flip => self.flip,
            MoveKind::PileToPile => self.pile_to_pile,
            MoveKind::PileToFoundation => self.pile_to_foundation,
            MoveKind::DeckToWaste => self.deck_to_waste,
            MoveKind::WasteToDeck => self.waste_to_deck,
            MoveKind::WasteToPile => self.waste_to_pile,
            MoveKind::WasteToFoundation => self.waste_to_foundation,
            MoveKind::FoundationToPile => self.foundation_to_pile,
        }
    }

    /// A table that rewards only winning and penalizes invalid moves.
    #[must_use]
    pub fn sparse() -> Self {
        Self {
            flip: 0.0,
            pile_to_pile: 0.0,
            pile_to_foundation: 0.0,
            deck_to_waste: 0.0,
            waste_to_deck: 0.0,
            waste_to_pile: 0.0,
            waste_to_foundation: 0.0,
            foundation_to_pile: 0.0,
            ..Self::default()
        }
    }
}

fn default_observation_depth() -> usize {
    24
}

/// Top-level engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub rewards: RewardTable,

    /// Cards per pile kept by the flat observation encoder, counted from
    /// the top.
    #[serde(default = "default_observation_depth")]
    pub observation_depth: usize,

    /// Step budget of the driving loop. The engine never ends an episode
    /// on its own; it only reports `truncated` once the budget is spent.
    #[serde(default)]
    pub max_steps: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rewards: RewardTable::default(),
            observation_depth: default_observation_depth(),
            max_steps: None,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_rewards(mut self, rewards: RewardTable) -> Self {
        self.rewards = rewards;
        self
    }

    #[must_use]
    pub fn with_observation_depth(mut self, depth: usize) -> Self {
        self.observation_depth = depth;
        self
    }

    #[must_use]
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.observation_depth == 0 {
            return Err(ConfigError::Invalid(
                "observation_depth must be at least 1".to_string(),
            ));
        }
        if self.max_steps == Some(0) {
            return Err(ConfigError::Invalid(
                "max_steps must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}
