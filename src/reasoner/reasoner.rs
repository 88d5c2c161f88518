use std::sync::Arc;

use ndarray::{Array2, ArrayView2};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::detection::{DetectionRecord, PotholeProcessor, Processor, RawFrame, WasteProcessor};
use crate::error::ConfigError;
use crate::features::{AttributeSet, FeatureExtractor};
use crate::graph::RoutingGraph;
use crate::reasoner::DetectionReport;
use crate::router::{Router, RoutingDecision};
use crate::scorer::{GraphScorer, ScorerParams, department_scores};
use crate::types::{Department, DepartmentScoreMap};

/// The department-routing pipeline: feature extraction, graph scoring and routing.
///
/// A `Reasoner` is immutable once built and can be shared across threads
/// (e.g. behind an `Arc`); every call works on its own feature matrix.
#[derive(Debug)]
pub struct Reasoner {
    graph: Arc<RoutingGraph>,
    adjacency: Array2<f32>,
    extractor: FeatureExtractor,
    scorer: GraphScorer,
    router: Router,
}

impl Reasoner {
    /// Build a reasoner from configuration, loading scorer parameters from
    /// `config.scorer.params` or generating them from `config.scorer.seed`.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let params = match &config.scorer.params {
            Some(path) => ScorerParams::load(path)?,
            None => ScorerParams::seeded(
                config.features.width,
                config.scorer.hidden_dim,
                Department::COUNT,
                config.scorer.seed,
            ),
        };
        let scorer = GraphScorer::from_params(params, config.scorer.steps)?;

        Self::with_scorer(config, Arc::new(RoutingGraph::new()), scorer)
    }

    /// Build a reasoner around an existing graph and scorer.
    pub fn with_scorer(config: &Config, graph: impl Into<Arc<RoutingGraph>>, scorer: GraphScorer) -> Result<Self, ConfigError> {
        config.validate()?;
        let graph: Arc<RoutingGraph> = graph.into();
        scorer.check_shape(config.features.width, graph.departments().count())?;

        let adjacency = graph.adjacency();
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            hidden = scorer.hidden_dim(),
            steps = scorer.steps(),
            "routing reasoner ready"
        );

        Ok(Self {
            graph,
            adjacency,
            extractor: FeatureExtractor::new(config.features.clone()),
            scorer,
            router: Router::new(config.router.clone()),
        })
    }

    #[inline] pub fn graph(&self) -> &Arc<RoutingGraph> { &self.graph }

    /// Get the cached propagation matrix.
    #[inline] pub fn adjacency(&self) -> ArrayView2<'_, f32> { self.adjacency.view() }

    #[inline] pub fn extractor(&self) -> &FeatureExtractor { &self.extractor }

    #[inline] pub fn scorer(&self) -> &GraphScorer { &self.scorer }

    #[inline] pub fn router(&self) -> &Router { &self.router }

    /// Department scores for a loosely-typed detection record.
    pub fn reason(&self, record: &Value) -> DepartmentScoreMap {
        self.score_attributes(&self.extractor.attributes(record))
    }

    /// Department scores for a processed detection record.
    pub fn reason_record(&self, record: &DetectionRecord) -> DepartmentScoreMap {
        self.score_attributes(&self.extractor.record_attributes(record))
    }

    /// Full routing decision for a loosely-typed detection record.
    pub fn decide(&self, record: &Value) -> RoutingDecision {
        self.route_attributes(&self.extractor.attributes(record))
    }

    /// Full routing decision for a processed detection record.
    pub fn decide_record(&self, record: &DetectionRecord) -> RoutingDecision {
        self.route_attributes(&self.extractor.record_attributes(record))
    }

    /// Route a processed record and assemble the caller-facing report.
    pub fn report(&self, record: &DetectionRecord) -> DetectionReport {
        DetectionReport::new(record, &self.decide_record(record))
    }

    /// Report on the first detector that found something, pothole before waste.
    pub fn report_frames(&self, pothole: Option<&RawFrame>, waste: Option<&RawFrame>) -> DetectionReport {
        let candidates: [(&dyn Processor, Option<&RawFrame>); 2] = [
            (&PotholeProcessor, pothole),
            (&WasteProcessor, waste),
        ];

        candidates.into_iter()
            .find_map(|(processor, frame)| frame.filter(|f| !f.is_empty()).map(|f| processor.process(f)))
            .map_or_else(DetectionReport::none, |record| self.report(&record))
    }

    fn score_attributes(&self, attributes: &AttributeSet) -> DepartmentScoreMap {
        let feats = self.extractor.feature_matrix(&self.graph, attributes);
        let out = self.scorer.score(feats.view(), self.adjacency.view());
        let scores = department_scores(out.view(), self.graph.departments());
        debug!(%attributes, best = ?scores.best().map(|(name, _)| name), "scored detection");
        scores
    }

    fn route_attributes(&self, attributes: &AttributeSet) -> RoutingDecision {
        let decision = self.router.route(&self.score_attributes(attributes));
        debug!(
            %attributes,
            departments = ?decision.departments,
            priority = %decision.priority,
            "routed detection"
        );
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::{Linear, Transform};
    use ndarray::Array1;
    use serde_json::json;

    fn reasoner() -> Reasoner { Reasoner::new(&Config::default()).unwrap() }

    #[test]
    fn score_only_calls_are_logged() {
        let reasoner = reasoner();
        let logs = crate::testing::capture_logs(|| {
            reasoner.reason(&json!({ "type": "waste", "params": { "primary": { "class_name": "battery" } } }));
        });
        assert!(logs.contains("DEBUG"), "{logs}");
        assert!(logs.contains("scored detection"), "{logs}");
        assert!(logs.contains("hazardous_waste"), "{logs}");
    }

    #[test]
    fn scores_cover_every_department() {
        let scores = reasoner().reason(&json!({
            "type": "pothole",
            "params": { "primary": { "area_pct": 0.04, "est_depth_m": 0.12 } }
        }));

        assert_eq!(scores.len(), Department::COUNT);
        let names = scores.iter().map(|(n, _)| n).collect::<Vec<_>>();
        assert_eq!(names, Department::ALL.iter().map(Department::to_str).collect::<Vec<_>>());
        assert!(scores.iter().all(|(_, s)| (0.0..=1.0).contains(&s)));
    }

    #[test]
    fn reasoning_is_reproducible() {
        let record = json!({ "type": "waste", "params": { "primary": { "area_pct": 0.3, "class_name": "battery" } } });
        let a = reasoner();
        let b = reasoner();
        assert_eq!(a.reason(&record), a.reason(&record));
        assert_eq!(a.reason(&record), b.reason(&record));
    }

    #[test]
    fn decisions_are_never_empty() {
        let r = reasoner();
        for record in [json!(null), json!({ "type": "waste" }), json!({ "type": "pothole", "params": { "primary": { "area_pct": 1.0 } } })] {
            assert!(!r.decide(&record).departments.is_empty());
        }
    }

    #[test]
    fn mismatched_feature_width_fails_at_construction() {
        let mut config = Config::default();
        let scorer = GraphScorer::from_params(ScorerParams::seeded(6, 4, Department::COUNT, 0), 2).unwrap();
        assert!(matches!(
            Reasoner::with_scorer(&config, RoutingGraph::new(), scorer),
            Err(ConfigError::InputWidth { layer: "fc_in", expected: 6, found: 8 })
        ));

        config.features.width = 6;
        let scorer = GraphScorer::from_params(ScorerParams::seeded(6, 4, Department::COUNT, 0), 2).unwrap();
        assert!(Reasoner::with_scorer(&config, RoutingGraph::new(), scorer).is_ok());
    }

    #[test]
    fn wrong_class_count_fails_at_construction() {
        let mut config = Config::default();
        config.scorer.hidden_dim = 4;
        let scorer = GraphScorer::from_params(ScorerParams::seeded(8, 4, 5, 0), 2).unwrap();
        assert!(matches!(
            Reasoner::with_scorer(&config, RoutingGraph::new(), scorer),
            Err(ConfigError::OutputWidth { layer: "fc_out", expected: 7, found: 5 })
        ));
    }

    #[test]
    fn loads_parameters_from_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scorer.json");
        ScorerParams::seeded(8, 16, Department::COUNT, 99).save(&path).unwrap();

        let mut config = Config::default();
        config.scorer.params = Some(path);
        let loaded = Reasoner::new(&config).unwrap();

        config.scorer.params = None;
        config.scorer.seed = 99;
        let seeded = Reasoner::new(&config).unwrap();

        let record = json!({ "type": "pothole", "params": { "primary": { "area_pct": 0.02 } } });
        assert_eq!(loaded.reason(&record), seeded.reason(&record));
    }

    #[test]
    fn custom_transforms_plug_into_the_scorer() {
        /// Projection that ignores its input and emits a fixed row.
        #[derive(Debug)]
        struct Constant { input: usize, row: Array1<f32> }

        impl Transform for Constant {
            fn input_dim(&self) -> usize { self.input }
            fn output_dim(&self) -> usize { self.row.len() }
            fn apply(&self, input: ArrayView2<'_, f32>) -> Array2<f32> {
                let mut out = Array2::zeros((input.nrows(), self.row.len()));
                out.rows_mut().into_iter().for_each(|mut r| r.assign(&self.row));
                out
            }
        }

        let hidden = 3;
        // Roads gets the strongest logit, Water the weakest.
        let logits = Array1::from_vec(vec![0.0, 0.0, 0.0, 4.0, 0.0, -4.0, 0.0]);
        let scorer = GraphScorer::new(
            Box::new(Linear::new(Array2::zeros((hidden, 8)), Array1::zeros(hidden)).unwrap()),
            Box::new(Linear::new(Array2::zeros((hidden, hidden)), Array1::zeros(hidden)).unwrap()),
            Box::new(Constant { input: hidden, row: logits }),
            2,
        ).unwrap();

        let reasoner = Reasoner::with_scorer(&Config::default(), RoutingGraph::new(), scorer).unwrap();
        let decision = reasoner.decide(&json!({ "type": "pothole" }));

        assert_eq!(decision.scores.get("Roads"), Some(1.0));
        assert_eq!(decision.scores.get("Water"), Some(0.0));
        assert_eq!(decision.departments, vec!["Waste Management", "Construction", "Municipality", "Roads", "Electricity", "Ward Office"]);
        assert_eq!(decision.priority, crate::types::Priority::High);
    }

    #[test]
    fn reasoner_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Reasoner>();
    }
}
