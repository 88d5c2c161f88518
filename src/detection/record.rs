use serde::{Deserialize, Serialize};

/// Which detector produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionKind {
    Pothole,
    Waste,
}

impl DetectionKind {
    pub fn to_str(&self) -> &'static str {
        match self {
            DetectionKind::Pothole => "pothole",
            DetectionKind::Waste => "waste",
        }
    }

    /// Tag names auto-assigned to records of this kind by the persistence layer.
    pub fn default_tags(&self) -> &'static [&'static str] {
        match self {
            DetectionKind::Pothole => &["pothole", "road_damage"],
            DetectionKind::Waste => &["waste", "garbage", "trash"],
        }
    }
}

/// A measured detection. Kind-specific measurements are `None` for the other kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub xyxy: [f64; 4],
    pub conf: f64,
    pub class_id: i64,
    pub class_name: String,
    pub area_px: f64,
    /// Box area as a fraction of the image area.
    pub area_pct: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub est_depth_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proximity_pct: Option<f64>,
}

/// Per-image measurements: every object (most salient first) plus the primary one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionParams {
    #[serde(default)]
    pub detections: Vec<DetectedObject>,
    #[serde(default)]
    pub primary: Option<DetectedObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waste_type: Option<String>,
}

/// The record handed to the reasoner: `{"type": .., "params": {"primary": {..}}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    #[serde(rename = "type")]
    pub kind: DetectionKind,
    #[serde(default)]
    pub params: DetectionParams,
}

impl DetectionRecord {
    /// Get the primary object, if anything was detected.
    #[inline] pub fn primary(&self) -> Option<&DetectedObject> { self.params.primary.as_ref() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_uses_type_key() {
        let record = DetectionRecord { kind: DetectionKind::Waste, params: DetectionParams::default() };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "waste");
        assert!(value["params"]["primary"].is_null());
    }

    #[test]
    fn sparse_record_deserializes() {
        let record: DetectionRecord = serde_json::from_value(json!({ "type": "pothole" })).unwrap();
        assert_eq!(record.kind, DetectionKind::Pothole);
        assert!(record.primary().is_none());
    }

    #[test]
    fn default_tags_per_kind() {
        assert_eq!(DetectionKind::Pothole.default_tags(), &["pothole", "road_damage"]);
        assert_eq!(DetectionKind::Waste.default_tags().len(), 3);
    }
}
