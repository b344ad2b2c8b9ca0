//! Environment bindings for Python.

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::core::{GameConfig, Move};
use crate::env::{KlondikeEnv, StepResult};
use crate::nn::{ActionSpace, StateEncoder};

/// Python wrapper for KlondikeEnv.
///
/// Observations are the flat encoder output as a `(13, 1 + 3 * depth)`
/// float32 array.
#[pyclass(name = "KlondikeEnv")]
pub struct PyKlondikeEnv {
    env: KlondikeEnv,
}

impl PyKlondikeEnv {
    fn observation<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f32>>> {
        let encoded = self.env.observe_encoded();
        let [rows, cols] = encoded.shape[..] else {
            return Err(PyValueError::new_err("encoder produced a non 2-D tensor"));
        };
        PyArray1::from_vec_bound(py, encoded.tensor)
            .reshape([rows, cols])
            .map_err(|e| PyValueError::new_err(format!("{}", e)))
    }

    fn step_tuple<'py>(
        &self,
        py: Python<'py>,
        result: StepResult,
    ) -> PyResult<(Bound<'py, PyArray2<f32>>, f64, bool, Bound<'py, PyDict>)> {
        let info = PyDict::new_bound(py);
        info.set_item("valid", result.info.valid)?;
        info.set_item("kind", result.info.kind.map(|k| k.name()))?;
        info.set_item("error", result.info.error.map(|e| e.to_string()))?;
        info.set_item("revealed", result.info.revealed)?;
        info.set_item("steps", result.info.steps)?;
        info.set_item("score", result.info.score)?;
        info.set_item("truncated", result.info.truncated)?;
        Ok((self.observation(py)?, result.reward, result.done, info))
    }
}

#[pymethods]
impl PyKlondikeEnv {
    /// Create an environment and deal the first game.
    ///
    /// # Arguments
    /// - seed: RNG seed for deterministic deals
    /// - config_json: optional JSON config (rewards, observation_depth, max_steps)
    #[new]
    #[pyo3(signature = (seed = 42, config_json = None))]
    fn new(seed: u64, config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => GameConfig::from_json(json)
                .map_err(|e| PyValueError::new_err(e.to_string()))?,
            None => GameConfig::default(),
        };
        let env = KlondikeEnv::new(config, seed).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { env })
    }

    /// Deal a new game, optionally reseeding first.
    #[pyo3(signature = (seed = None))]
    fn reset<'py>(&mut self, py: Python<'py>, seed: Option<u64>) -> PyResult<Bound<'py, PyArray2<f32>>> {
        match seed {
            Some(seed) => self.env.reset_with_seed(seed),
            None => self.env.reset(),
        };
        self.observation(py)
    }

    /// Attempt a move. Returns `(obs, reward, done, info)`.
    #[pyo3(signature = (current, next, count = 1))]
    fn step<'py>(
        &mut self,
        py: Python<'py>,
        current: usize,
        next: usize,
        count: usize,
    ) -> PyResult<(Bound<'py, PyArray2<f32>>, f64, bool, Bound<'py, PyDict>)> {
        let result = self.env.step(Move::new(current, next, count));
        self.step_tuple(py, result)
    }

    /// Attempt the move behind a flat action index.
    fn step_index<'py>(
        &mut self,
        py: Python<'py>,
        index: usize,
    ) -> PyResult<(Bound<'py, PyArray2<f32>>, f64, bool, Bound<'py, PyDict>)> {
        let result = self.env.step_index(index);
        self.step_tuple(py, result)
    }

    /// Whether a move would be accepted right now.
    #[pyo3(signature = (current, next, count = 1))]
    fn is_legal(&self, current: usize, next: usize, count: usize) -> bool {
        self.env.is_legal(&Move::new(current, next, count))
    }

    fn check_if_completed(&self) -> bool {
        self.env.check_if_completed()
    }

    /// Human-readable dump of every pile.
    fn get_game_elements(&self) -> String {
        self.env.get_game_elements().to_string()
    }

    /// JSON dump of every pile, face-down cards included.
    fn get_game_elements_json(&self) -> PyResult<String> {
        self.env
            .get_game_elements()
            .to_json()
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    #[getter]
    fn steps(&self) -> u32 {
        self.env.state().steps
    }

    #[getter]
    fn score(&self) -> f64 {
        self.env.state().score
    }

    #[getter]
    fn action_space_size(&self) -> usize {
        ActionSpace::SIZE
    }

    #[getter]
    fn observation_shape(&self) -> Vec<usize> {
        self.env.encoder().output_shape()
    }

    fn __repr__(&self) -> String {
        let status = if self.env.check_if_completed() {
            "won"
        } else {
            "ongoing"
        };
        format!(
            "KlondikeEnv(steps={}, score={}, status={})",
            self.env.state().steps,
            self.env.state().score,
            status
        )
    }
}
