#![doc = "Department routing for municipal pothole and waste reports"]
mod config;
mod detection;
mod error;
mod features;
mod graph;
mod reasoner;
mod router;
mod scorer;
mod types;

#[cfg(test)]
mod testing;

#[doc(inline)]
pub use config::{Config, FeatureConfig, RouterConfig, ScorerConfig};

#[doc(inline)]
pub use detection::{
    DetectedObject, DetectionKind, DetectionParams, DetectionRecord,
    PotholeProcessor, Processor, RawBox, RawFrame, WasteProcessor, estimate_depth_m,
};

#[doc(inline)]
pub use error::ConfigError;

#[doc(inline)]
pub use features::{AttributeSet, FeatureExtractor};

#[doc(inline)]
pub use graph::{Node, RoutingGraph, row_normalized_adjacency};

#[doc(inline)]
pub use reasoner::{DetectionReport, Reasoner};

#[doc(inline)]
pub use router::{Router, RoutingDecision, route};

#[doc(inline)]
pub use scorer::{GraphScorer, Linear, ScorerParams, Transform, aggregate, department_scores, min_max_normalize};

#[doc(inline)]
pub use types::{Department, DepartmentScoreMap, Priority, SituationAttribute};
