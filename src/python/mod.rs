//! Python bindings for the Klondike environment.
//!
//! # Quick Start
//!
//! ```python
//! import klondike_env as ke
//!
//! env = ke.KlondikeEnv(seed=42)
//! obs = env.reset()
//!
//! # Draw from the deck, then try waste -> tableau 0
//! obs, reward, done, info = env.step(7, 8)
//! obs, reward, done, info = env.step(8, 0)
//!
//! print(env.get_game_elements())
//! ```

use pyo3::prelude::*;

mod py_env;

pub use py_env::*;

/// klondike_env: a Klondike solitaire environment for RL training.
#[pymodule]
fn klondike_env(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyKlondikeEnv>()?;
    m.add("ACTION_SPACE_SIZE", crate::nn::ActionSpace::SIZE)?;
    Ok(())
}
