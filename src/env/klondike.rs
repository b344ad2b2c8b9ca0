//! The step-driven environment an agent plays against.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{
    ConfigError, GameConfig, GameRng, GameRngState, GameState, Move, MoveKind, SnapshotError,
};
use crate::nn::{ActionSpace, EncodedState, KlondikeEncoder, StateEncoder};
use crate::rules::{GameResult, KlondikeRules, MoveError, RulesEngine};

use super::elements::{GameElements, Observation};

/// Side information about one step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Whether the move was legal and applied.
    pub valid: bool,
    pub kind: Option<MoveKind>,
    /// Why the move was rejected.
    pub error: Option<MoveError>,
    /// A face-down card was turned up by the move.
    pub revealed: bool,
    pub steps: u32,
    pub score: f64,
    /// The configured step budget is spent.
    pub truncated: bool,
}

/// Everything `step` hands back to the agent.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f64,
    pub done: bool,
    pub info: StepInfo,
}

/// Everything needed to resume an environment mid-episode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvCheckpoint {
    pub state: GameState,
    pub rng: GameRngState,
    pub episode: u64,
}

impl EnvCheckpoint {
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// A Klondike game with a seeded dealer.
///
/// Each `reset` deals from a fresh fork of the environment RNG, so a given
/// seed always produces the same sequence of deals.
#[derive(Clone, Debug)]
pub struct KlondikeEnv {
    rules: KlondikeRules,
    encoder: KlondikeEncoder,
    state: GameState,
    rng: GameRng,
    episode: u64,
}

impl KlondikeEnv {
    /// Create an environment and deal the first game.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut env = Self {
            encoder: KlondikeEncoder::new(config.observation_depth),
            rules: KlondikeRules::new(config),
            state: GameState::empty(),
            rng: GameRng::new(seed),
            episode: 0,
        };
        env.reset();
        Ok(env)
    }

    /// Wrap an existing position, e.g. one built with `GameState::empty`.
    pub fn from_state(config: GameConfig, state: GameState) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            encoder: KlondikeEncoder::new(config.observation_depth),
            rules: KlondikeRules::new(config),
            state,
            rng: GameRng::new(0),
            episode: 0,
        })
    }

    /// Deal a new game and return its first observation.
    pub fn reset(&mut self) -> Observation {
        let mut dealer = self.rng.fork();
        self.state = GameState::deal(&mut dealer);
        self.episode += 1;
        info!(seed = self.rng.seed(), episode = self.episode, "dealt new game");
        self.observe()
    }

    /// Reseed the dealer, then reset.
    pub fn reset_with_seed(&mut self, seed: u64) -> Observation {
        self.rng = GameRng::new(seed);
        self.episode = 0;
        self.reset()
    }

    /// Attempt one move.
    ///
    /// Every call counts as a step. A rejected move costs the invalid-move
    /// penalty and leaves the table untouched. Once the game is complete,
    /// further calls return the win reward without touching the table.
    pub fn step(&mut self, mv: Move) -> StepResult {
        self.state.steps = self.state.steps.saturating_add(1);

        let mut info = StepInfo {
            valid: false,
            kind: None,
            error: None,
            revealed: false,
            steps: self.state.steps,
            score: 0.0,
            truncated: false,
        };

        let reward = if self.state.check_if_completed() {
            self.rules.config().rewards.win
        } else {
            match self.rules.apply_move(&mut self.state, &mv) {
                Ok(transition) => {
                    info.valid = true;
                    info.kind = Some(transition.kind);
                    info.revealed = transition.revealed;
                    if transition.completed {
                        info!(steps = self.state.steps, "game won");
                    }
                    transition.reward
                }
                Err(error) => {
                    debug!(%mv, %error, "rejected move");
                    info.error = Some(error);
                    self.rules.config().rewards.invalid
                }
            }
        };

        self.state.score += reward;
        info.score = self.state.score;
        info.truncated = self.rules.is_terminal(&self.state) == Some(GameResult::StepLimit);

        StepResult {
            observation: self.observe(),
            reward,
            done: self.state.check_if_completed(),
            info,
        }
    }

    /// Attempt the move behind a flat action index.
    ///
    /// An index outside the action space is an invalid move like any other.
    pub fn step_index(&mut self, index: usize) -> StepResult {
        match ActionSpace::decode(index) {
            Some(mv) => self.step(mv),
            // Out of range on every axis, so validation rejects it.
            None => self.step(Move::new(usize::MAX, usize::MAX, 0)),
        }
    }

    #[must_use]
    pub fn check_if_completed(&self) -> bool {
        self.state.check_if_completed()
    }

    #[must_use]
    pub fn get_game_elements(&self) -> GameElements {
        GameElements::from_state(&self.state)
    }

    #[must_use]
    pub fn observe(&self) -> Observation {
        Observation::from_state(&self.state)
    }

    /// The flat tensor view of the current table.
    #[must_use]
    pub fn observe_encoded(&self) -> EncodedState {
        self.encoder.encode(&self.state)
    }

    #[must_use]
    pub fn is_legal(&self, mv: &Move) -> bool {
        self.rules.is_legal(&self.state, mv)
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        self.rules.config()
    }

    #[must_use]
    pub fn encoder(&self) -> &KlondikeEncoder {
        &self.encoder
    }

    /// Capture the table and the dealer position.
    #[must_use]
    pub fn checkpoint(&self) -> EnvCheckpoint {
        EnvCheckpoint {
            state: self.state.clone(),
            rng: self.rng.state(),
            episode: self.episode,
        }
    }

    /// Resume from a checkpoint. Later resets deal what they would have
    /// dealt at capture time.
    pub fn restore(&mut self, checkpoint: &EnvCheckpoint) {
        self.state = checkpoint.state.clone();
        self.rng = GameRng::from_state(&checkpoint.rng);
        self.episode = checkpoint.episode;
    }

    /// Episodes dealt since the dealer was last seeded.
    #[must_use]
    pub fn episode(&self) -> u64 {
        self.episode
    }
}
