use ndarray::{Array2, ArrayView2};

use crate::error::ConfigError;
use crate::scorer::{ScorerParams, Transform};

/// Fixed-depth message passing over a dense graph.
///
/// ```text
/// h   = relu(fc_in(x))
/// h   = relu(fc_msg(A · h))      (repeated `steps` times)
/// out = sigmoid(fc_out(h))
/// ```
///
/// The scorer holds no mutable state; `score` is a pure function of its inputs
/// and the projection parameters.
#[derive(Debug)]
pub struct GraphScorer {
    fc_in: Box<dyn Transform>,
    fc_msg: Box<dyn Transform>,
    fc_out: Box<dyn Transform>,
    steps: usize,
}

impl GraphScorer {
    /// Assemble a scorer, checking that the projections chain together.
    pub fn new(
        fc_in: Box<dyn Transform>,
        fc_msg: Box<dyn Transform>,
        fc_out: Box<dyn Transform>,
        steps: usize,
    ) -> Result<Self, ConfigError> {
        let hidden = fc_in.output_dim();
        if fc_msg.input_dim() != hidden {
            return Err(ConfigError::InputWidth { layer: "fc_msg", expected: fc_msg.input_dim(), found: hidden });
        }
        if fc_msg.output_dim() != hidden {
            return Err(ConfigError::OutputWidth { layer: "fc_msg", expected: hidden, found: fc_msg.output_dim() });
        }
        if fc_out.input_dim() != hidden {
            return Err(ConfigError::InputWidth { layer: "fc_out", expected: fc_out.input_dim(), found: hidden });
        }

        Ok(Self { fc_in, fc_msg, fc_out, steps })
    }

    /// Scorer backed by linear layers.
    pub fn from_params(params: ScorerParams, steps: usize) -> Result<Self, ConfigError> {
        let ScorerParams { fc_in, fc_msg, fc_out } = params;
        for layer in [&fc_in, &fc_msg, &fc_out] { layer.check()? }
        Self::new(Box::new(fc_in), Box::new(fc_msg), Box::new(fc_out), steps)
    }

    /// Feature width consumed per node.
    #[inline] pub fn input_dim(&self) -> usize { self.fc_in.input_dim() }

    #[inline] pub fn hidden_dim(&self) -> usize { self.fc_in.output_dim() }

    /// Number of classes scored per node.
    #[inline] pub fn output_dim(&self) -> usize { self.fc_out.output_dim() }

    /// Default number of propagation rounds.
    #[inline] pub fn steps(&self) -> usize { self.steps }

    /// Check that this scorer fits features of `width` columns and produces `classes` outputs.
    pub fn check_shape(&self, width: usize, classes: usize) -> Result<(), ConfigError> {
        if self.input_dim() != width {
            return Err(ConfigError::InputWidth { layer: "fc_in", expected: self.input_dim(), found: width });
        }
        if self.output_dim() != classes {
            return Err(ConfigError::OutputWidth { layer: "fc_out", expected: classes, found: self.output_dim() });
        }
        Ok(())
    }

    /// Score every node with the configured number of steps.
    /// `features` is `[N, F]`, `adjacency` is `[N, N]`; the result is `[N, D]` in (0, 1).
    #[inline]
    pub fn score(&self, features: ArrayView2<'_, f32>, adjacency: ArrayView2<'_, f32>) -> Array2<f32> {
        self.score_with_steps(features, adjacency, self.steps)
    }

    /// Score every node with an explicit number of propagation steps.
    pub fn score_with_steps(&self, features: ArrayView2<'_, f32>, adjacency: ArrayView2<'_, f32>, steps: usize) -> Array2<f32> {
        let n = features.nrows();
        assert_eq!(features.ncols(), self.input_dim(), "features must have {} columns", self.input_dim());
        assert_eq!(adjacency.dim(), (n, n), "adjacency must be {n}x{n}");

        let mut h = relu(self.fc_in.apply(features));
        for _ in 0..steps {
            let m = adjacency.dot(&h);
            h = relu(self.fc_msg.apply(m.view()));
        }

        let mut out = self.fc_out.apply(h.view());
        out.mapv_inplace(sigmoid);
        out
    }
}

#[inline]
fn relu(mut x: Array2<f32>) -> Array2<f32> {
    x.mapv_inplace(|v| v.max(0.0));
    x
}

#[inline]
fn sigmoid(x: f32) -> f32 { 1.0 / (1.0 + (-x).exp()) }
