//! Tunable constants for feature extraction, scoring and routing.
//!
//! Every field has a default equal to the reference routing policy, so an
//! empty TOML document yields the standard reasoner:
//!
//! ```toml
//! [features]
//! width = 8
//! large_waste_area = 0.02
//!
//! [scorer]
//! hidden_dim = 16
//! steps = 2
//! seed = 0
//! # params = "weights/scorer.json"
//!
//! [router]
//! primary_threshold = 0.35
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Thresholds used to turn detection measurements into situation attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Width of each node's feature vector (at least 3).
    pub width: usize,
    /// `area_pct` above which waste counts as large.
    pub large_waste_area: f64,
    /// `area_pct` above which a pothole counts as large.
    pub large_pothole_area: f64,
    /// `est_depth_m` above which a pothole counts as deep.
    pub deep_pothole_depth_m: f64,
    /// Lower-case substrings of a waste class name that mark it hazardous.
    pub hazardous_keywords: Vec<String>,
    /// Constant written into each department's prior column.
    pub department_prior: f32,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            width: 8,
            large_waste_area: 0.02,
            large_pothole_area: 0.01,
            deep_pothole_depth_m: 0.05,
            hazardous_keywords: vec!["battery".into(), "chemical".into()],
            department_prior: 0.1,
        }
    }
}

/// Shape and parameter source of the graph scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    pub hidden_dim: usize,
    /// Number of message-passing rounds.
    pub steps: usize,
    /// Seed for generated parameters (ignored when `params` is set).
    pub seed: u64,
    /// Optional JSON file holding trained layer parameters. When loaded from a
    /// file, a relative path is taken from the config file's directory.
    pub params: Option<PathBuf>,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self { hidden_dim: 16, steps: 2, seed: 0, params: None }
    }
}

/// Selection and priority thresholds applied to the department score map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Departments scoring strictly above this are selected outright.
    pub primary_threshold: f64,
    /// Minimum score for the runner-up to join a fallback selection.
    pub fallback_min_score: f64,
    /// Largest top-to-runner-up gap that still counts as a near tie.
    pub fallback_max_gap: f64,
    /// Max selected score strictly above this is high priority.
    pub high_priority: f64,
    /// Max selected score strictly above this is medium priority.
    pub medium_priority: f64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            primary_threshold: 0.35,
            fallback_min_score: 0.1,
            fallback_max_gap: 0.3,
            high_priority: 0.7,
            medium_priority: 0.4,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub features: FeatureConfig,
    pub scorer: ScorerConfig,
    pub router: RouterConfig,
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let mut config = Self::from_toml_str(&text)?;

        // parameter files are named relative to the config file
        if let (Some(params), Some(dir)) = (&config.scorer.params, path.parent()) {
            if params.is_relative() {
                config.scorer.params = Some(dir.join(params));
            }
        }
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let features = &self.features;
        if features.width < 3 {
            return Err(ConfigError::invalid("features.width",
                format!("must be at least 3, got {}", features.width)));
        }
        if features.hazardous_keywords.iter().any(|word| word.is_empty()) {
            return Err(ConfigError::invalid("features.hazardous_keywords",
                "keywords must not be empty"));
        }
        if !features.department_prior.is_finite() {
            return Err(ConfigError::invalid("features.department_prior", "must be finite"));
        }
        for (field, value) in [
            ("features.large_waste_area", features.large_waste_area),
            ("features.large_pothole_area", features.large_pothole_area),
            ("features.deep_pothole_depth_m", features.deep_pothole_depth_m),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::invalid(field, "must be finite"));
            }
        }

        if self.scorer.hidden_dim == 0 {
            return Err(ConfigError::invalid("scorer.hidden_dim", "must be at least 1"));
        }

        let router = &self.router;
        for (field, value) in [
            ("router.primary_threshold", router.primary_threshold),
            ("router.fallback_min_score", router.fallback_min_score),
            ("router.fallback_max_gap", router.fallback_max_gap),
            ("router.high_priority", router.high_priority),
            ("router.medium_priority", router.medium_priority),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::invalid(field, format!("must lie in [0, 1], got {value}")));
            }
        }
        if router.medium_priority > router.high_priority {
            return Err(ConfigError::invalid("router.medium_priority",
                "must not exceed router.high_priority"));
        }

        Ok(())
    }
}
