use std::fmt::Debug;

use ndarray::{Array1, Array2, ArrayView2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A row-wise map from `input_dim` to `output_dim` columns.
///
/// The graph scorer only ever sees projections through this trait, so learned
/// parameters (or an entirely different model) can replace the default
/// [`Linear`] layers without touching the propagation loop.
pub trait Transform: Debug + Send + Sync {
    fn input_dim(&self) -> usize;

    fn output_dim(&self) -> usize;

    /// Apply to every row of `input` (`[rows, input_dim]` -> `[rows, output_dim]`).
    fn apply(&self, input: ArrayView2<'_, f32>) -> Array2<f32>;
}

/// Affine layer `y = x · Wᵀ + b` with `W` of shape `[output_dim, input_dim]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Linear {
    weight: Array2<f32>,
    bias: Array1<f32>,
}

impl Linear {
    /// Construct a layer from explicit parameters.
    pub fn new(weight: Array2<f32>, bias: Array1<f32>) -> Result<Self, ConfigError> {
        let layer = Self { weight, bias };
        layer.check()?;
        Ok(layer)
    }

    /// Layer with weights and biases drawn uniformly from `±1/sqrt(input_dim)`.
    pub fn seeded<R: Rng + ?Sized>(input_dim: usize, output_dim: usize, rng: &mut R) -> Self {
        assert!(input_dim > 0, "input_dim must be positive");
        let bound = 1.0 / (input_dim as f32).sqrt();
        let weight = Array2::from_shape_fn((output_dim, input_dim), |_| rng.random_range(-bound..=bound));
        let bias = Array1::from_shape_fn(output_dim, |_| rng.random_range(-bound..=bound));
        Self { weight, bias }
    }

    /// Check that the bias length matches the weight rows.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.bias.len() != self.weight.nrows() {
            return Err(ConfigError::BiasLength { expected: self.weight.nrows(), found: self.bias.len() });
        }
        Ok(())
    }

    #[inline] pub fn weight(&self) -> &Array2<f32> { &self.weight }

    #[inline] pub fn bias(&self) -> &Array1<f32> { &self.bias }
}

impl Transform for Linear {
    #[inline] fn input_dim(&self) -> usize { self.weight.ncols() }

    #[inline] fn output_dim(&self) -> usize { self.weight.nrows() }

    fn apply(&self, input: ArrayView2<'_, f32>) -> Array2<f32> {
        input.dot(&self.weight.t()) + &self.bias
    }
}
