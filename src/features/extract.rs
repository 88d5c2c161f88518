use ndarray::Array2;
use serde_json::Value;

use crate::config::FeatureConfig;
use crate::detection::{DetectionKind, DetectionRecord};
use crate::features::AttributeSet;
use crate::graph::{Node, RoutingGraph};
use crate::types::SituationAttribute;

/// The measurements of a primary object that the attribute rules look at.
#[derive(Debug)]
struct Observation<'a> {
    area_pct: f64,
    est_depth_m: f64,
    class_name: &'a str,
}

/// Derives situation attributes from a detection and encodes them as node features.
///
/// Extraction is total: missing or mistyped fields read as zero / empty, and
/// anything unrecognised simply leaves attributes inactive.
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    config: FeatureConfig,
}

impl FeatureExtractor {
    pub fn new(mut config: FeatureConfig) -> Self {
        assert!(config.width >= 3, "feature width must be at least 3, got {}", config.width);
        for word in &mut config.hazardous_keywords {
            *word = word.to_lowercase();
        }
        Self { config }
    }

    /// Width of each node's feature vector.
    #[inline] pub fn width(&self) -> usize { self.config.width }

    /// Attributes active for a loosely-typed record `{"type": .., "params": {"primary": {..}}}`.
    pub fn attributes(&self, record: &Value) -> AttributeSet {
        let kind = match record.get("type").and_then(Value::as_str) {
            Some("pothole") => DetectionKind::Pothole,
            Some("waste") => DetectionKind::Waste,
            _ => return AttributeSet::empty(),
        };

        let primary = record.get("params")
            .and_then(|params| params.get("primary"))
            .and_then(Value::as_object)
            .filter(|primary| !primary.is_empty());

        let observation = primary.map(|primary| {
            let number = |key: &str| primary.get(key).and_then(Value::as_f64).unwrap_or(0.0);
            Observation {
                area_pct: number("area_pct"),
                est_depth_m: number("est_depth_m"),
                class_name: primary.get("class_name").and_then(Value::as_str).unwrap_or(""),
            }
        });

        self.classify(kind, observation)
    }

    /// Attributes active for a typed record produced by a processor.
    pub fn record_attributes(&self, record: &DetectionRecord) -> AttributeSet {
        let observation = record.primary().map(|primary| Observation {
            area_pct: primary.area_pct,
            est_depth_m: primary.est_depth_m.unwrap_or(0.0),
            class_name: &primary.class_name,
        });

        self.classify(record.kind, observation)
    }

    fn classify(&self, kind: DetectionKind, observation: Option<Observation<'_>>) -> AttributeSet {
        let mut set = AttributeSet::empty();
        let Some(obs) = observation else { return set };

        match kind {
            DetectionKind::Waste => {
                if obs.area_pct > self.config.large_waste_area {
                    set.insert(SituationAttribute::LargeWaste);
                }
                let class = obs.class_name.to_lowercase();
                if self.config.hazardous_keywords.iter().any(|word| class.contains(word.as_str())) {
                    set.insert(SituationAttribute::HazardousWaste);
                }
            }
            DetectionKind::Pothole => {
                if obs.area_pct > self.config.large_pothole_area {
                    set.insert(SituationAttribute::LargePothole);
                }
                if obs.est_depth_m > self.config.deep_pothole_depth_m {
                    set.insert(SituationAttribute::DeepPothole);
                }
            }
        }

        set
    }

    /// Encode an attribute set as a `[num_nodes, width]` feature matrix.
    ///
    /// Attribute rows carry the activation in both columns 0 and 1; department
    /// rows carry a constant prior in column `2 + index % (width - 2)`.
    pub fn feature_matrix(&self, graph: &RoutingGraph, attributes: &AttributeSet) -> Array2<f32> {
        let width = self.config.width;
        let mut feats = Array2::<f32>::zeros((graph.node_count(), width));

        for (idx, node) in graph.nodes().iter().enumerate() {
            match node {
                Node::Attribute(attr) => {
                    let val = if attributes.contains(*attr) { 1.0 } else { 0.0 };
                    feats[[idx, 0]] = val;
                    feats[[idx, 1]] = val;
                }
                Node::Department(_) => {
                    feats[[idx, 2 + idx % (width - 2)]] = self.config.department_prior;
                }
            }
        }

        feats
    }

    /// Attributes and feature matrix for a loosely-typed record.
    pub fn extract(&self, graph: &RoutingGraph, record: &Value) -> (AttributeSet, Array2<f32>) {
        let attributes = self.attributes(record);
        let feats = self.feature_matrix(graph, &attributes);
        (attributes, feats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Department;
    use serde_json::json;

    fn extractor() -> FeatureExtractor { FeatureExtractor::default() }

    #[test]
    fn large_deep_pothole() {
        let set = extractor().attributes(&json!({
            "type": "pothole",
            "params": { "primary": { "area_pct": 0.04, "est_depth_m": 0.12 } }
        }));
        assert_eq!(set.iter().collect::<Vec<_>>(),
            vec![SituationAttribute::LargePothole, SituationAttribute::DeepPothole]);
    }

    #[test]
    fn pothole_thresholds_are_strict() {
        let set = extractor().attributes(&json!({
            "type": "pothole",
            "params": { "primary": { "area_pct": 0.01, "est_depth_m": 0.05 } }
        }));
        assert!(set.is_empty());
    }

    #[test]
    fn hazardous_waste_matches_case_insensitively() {
        let set = extractor().attributes(&json!({
            "type": "waste",
            "params": { "primary": { "area_pct": 0.5, "class_name": "Car-Battery" } }
        }));
        assert_eq!(set.iter().collect::<Vec<_>>(),
            vec![SituationAttribute::LargeWaste, SituationAttribute::HazardousWaste]);

        let set = extractor().attributes(&json!({
            "type": "waste",
            "params": { "primary": { "class_name": "CHEMICAL drum" } }
        }));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![SituationAttribute::HazardousWaste]);
    }

    #[test]
    fn configured_keywords_ignore_case() {
        let fx = FeatureExtractor::new(FeatureConfig {
            hazardous_keywords: vec!["Battery".into(), "PAINT".into()],
            ..FeatureConfig::default()
        });
        let waste = |class_name: &str| fx.attributes(&json!({
            "type": "waste",
            "params": { "primary": { "class_name": class_name } }
        }));

        assert!(waste("Battery").contains(SituationAttribute::HazardousWaste));
        assert!(waste("spray paint").contains(SituationAttribute::HazardousWaste));
        assert!(!waste("plastic").contains(SituationAttribute::HazardousWaste));
    }

    #[test]
    fn measurements_only_count_for_their_kind() {
        // A deep "waste" object is not a deep pothole, and hazardous potholes do not exist.
        let set = extractor().attributes(&json!({
            "type": "waste",
            "params": { "primary": { "area_pct": 0.015, "est_depth_m": 1.0 } }
        }));
        assert!(set.is_empty());

        let set = extractor().attributes(&json!({
            "type": "pothole",
            "params": { "primary": { "class_name": "battery" } }
        }));
        assert!(set.is_empty());
    }

    #[test]
    fn malformed_records_activate_nothing() {
        let fx = extractor();
        for record in [
            json!(null),
            json!([1, 2, 3]),
            json!({ "type": "graffiti", "params": { "primary": { "area_pct": 1.0 } } }),
            json!({ "type": "pothole" }),
            json!({ "type": "pothole", "params": { "primary": null } }),
            json!({ "type": "pothole", "params": { "primary": {} } }),
            json!({ "type": "pothole", "params": { "primary": { "area_pct": "huge", "est_depth_m": null } } }),
            json!({ "type": "waste", "params": { "primary": { "class_name": 42 } } }),
        ] {
            assert!(fx.attributes(&record).is_empty(), "expected no attributes for {record}");
        }
    }

    #[test]
    fn reserved_attributes_stay_inactive() {
        let set = extractor().attributes(&json!({
            "type": "waste",
            "params": { "primary": { "area_pct": 0.9, "class_name": "battery near water and electric pole" } }
        }));
        assert!(!set.contains(SituationAttribute::NearElectric));
        assert!(!set.contains(SituationAttribute::NearWater));
    }

    #[test]
    fn feature_matrix_layout() {
        let graph = RoutingGraph::new();
        let fx = extractor();
        let attrs: AttributeSet = [SituationAttribute::DeepPothole].into_iter().collect();
        let feats = fx.feature_matrix(&graph, &attrs);

        assert_eq!(feats.dim(), (13, 8));

        let deep = graph.attribute_index(SituationAttribute::DeepPothole);
        assert_eq!(feats.row(deep).to_vec(), vec![1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);

        let large = graph.attribute_index(SituationAttribute::LargePothole);
        assert_eq!(feats.row(large).sum(), 0.0);

        // Departments start at index 6: columns 2, 3, .., 7, then wrap back to 2.
        for dept in Department::ALL {
            let idx = graph.department_index(dept);
            let col = 2 + idx % 6;
            assert_eq!(feats[[idx, 0]], 0.0);
            assert_eq!(feats[[idx, 1]], 0.0);
            assert_eq!(feats[[idx, col]], 0.1);
            assert_eq!(feats.row(idx).sum(), 0.1);
        }
        assert_eq!(feats[[graph.department_index(Department::WardOffice), 2]], 0.1);
    }

    #[test]
    fn typed_and_untyped_records_agree() {
        use crate::detection::{DetectedObject, DetectionParams};

        let primary = DetectedObject {
            xyxy: [0.0, 0.0, 1.0, 1.0],
            conf: 0.7,
            class_id: 3,
            class_name: "Battery".into(),
            area_px: 1.0,
            area_pct: 0.03,
            est_depth_m: None,
            risk_score: None,
            density: Some(1.0),
            proximity_pct: Some(0.2),
        };
        let record = DetectionRecord {
            kind: DetectionKind::Waste,
            params: DetectionParams { primary: Some(primary), ..Default::default() },
        };

        let fx = extractor();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(fx.record_attributes(&record), fx.attributes(&value));
        assert_eq!(fx.record_attributes(&record).len(), 2);
    }
}
