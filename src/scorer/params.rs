use std::{fs::File, io::{BufReader, BufWriter, Write}, path::Path};

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::scorer::{Linear, Transform};

/// Parameters of the three projections of a [`GraphScorer`](crate::scorer::GraphScorer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerParams {
    /// Feature width -> hidden width.
    pub fc_in: Linear,
    /// Hidden width -> hidden width, applied after each aggregation.
    pub fc_msg: Linear,
    /// Hidden width -> department count.
    pub fc_out: Linear,
}

impl ScorerParams {
    /// Untrained parameters generated deterministically from `seed`.
    pub fn seeded(input_dim: usize, hidden_dim: usize, output_dim: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self {
            fc_in: Linear::seeded(input_dim, hidden_dim, &mut rng),
            fc_msg: Linear::seeded(hidden_dim, hidden_dim, &mut rng),
            fc_out: Linear::seeded(hidden_dim, output_dim, &mut rng),
        }
    }

    /// Feature width expected by `fc_in`.
    #[inline] pub fn input_dim(&self) -> usize { self.fc_in.input_dim() }

    /// Number of scored classes produced by `fc_out`.
    #[inline] pub fn output_dim(&self) -> usize { self.fc_out.output_dim() }

    /// Read parameters from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let params: ScorerParams = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| ConfigError::Params { path: path.to_path_buf(), source })?;

        for layer in [&params.fc_in, &params.fc_msg, &params.fc_out] { layer.check()? }
        Ok(params)
    }

    /// Write parameters to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let write_error = |source: std::io::Error| ConfigError::Write { path: path.to_path_buf(), source };

        let mut writer = BufWriter::new(File::create(path).map_err(write_error)?);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|err| write_error(err.into()))?;
        writer.flush().map_err(write_error)
    }
}
