//! Tensor container shared by the encoder and the Python boundary.

use serde::{Deserialize, Serialize};

/// Row-major `f32` buffer plus its shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedState {
    pub tensor: Vec<f32>,
    /// `[rows, features]` for the Klondike encoder.
    pub shape: Vec<usize>,
}

impl EncodedState {
    pub fn new(tensor: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(
            tensor.len(),
            shape.iter().product::<usize>(),
            "buffer length disagrees with shape {shape:?}"
        );
        Self { tensor, shape }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    /// Row `i` of a two-dimensional tensor.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        let [rows, cols] = self.shape[..] else {
            return None;
        };
        (i < rows).then(|| &self.tensor[i * cols..(i + 1) * cols])
    }

    /// Every row of a two-dimensional tensor; empty for other ranks.
    pub fn rows(&self) -> std::slice::Chunks<'_, f32> {
        match self.shape[..] {
            [_, cols] if cols > 0 => self.tensor.chunks(cols),
            _ => self.tensor[..0].chunks(1),
        }
    }
}
