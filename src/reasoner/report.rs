use serde::{Deserialize, Serialize};

use crate::detection::{DetectionKind, DetectionRecord};
use crate::router::RoutingDecision;
use crate::types::{Department, Priority};

/// The fields a caller writes into a persisted detection record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    /// `"pothole"`, `"waste"`, or `"none"` when nothing was detected.
    pub detection_type: String,
    /// Highest-scoring department (`"Unknown"` when nothing could be routed).
    pub department: String,
    /// Every department selected by the router.
    pub departments: Vec<String>,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pothole_severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waste_category: Option<String>,
    pub detection_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub est_depth_m: Option<f64>,
    /// Tags auto-assigned for this kind of detection.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl DetectionReport {
    /// Report for an image in which neither detector found anything.
    pub fn none() -> Self {
        let decision = RoutingDecision::unknown();
        Self {
            detection_type: "none".into(),
            department: Department::UNKNOWN.into(),
            departments: decision.departments,
            priority: decision.priority,
            pothole_severity: None,
            waste_category: None,
            detection_status: "No detection".into(),
            area_pct: None,
            est_depth_m: None,
            tags: Vec::new(),
        }
    }

    /// Combine a processed record with its routing decision.
    pub fn new(record: &DetectionRecord, decision: &RoutingDecision) -> Self {
        let primary = record.primary();
        let class_name = primary.map(|p| p.class_name.as_str());
        let labelled = class_name.filter(|name| !name.is_empty());

        let (pothole_severity, waste_category, detection_status) = match record.kind {
            DetectionKind::Pothole => (
                Some(labelled.unwrap_or("unknown").to_string()),
                None,
                format!("{} detected", class_name.unwrap_or("pothole")),
            ),
            DetectionKind::Waste => {
                let category = labelled.unwrap_or("Unknown");
                (None, Some(category.to_string()), format!("{category} detected"))
            }
        };

        let department = decision.scores.best()
            .map(|(name, _)| name.to_string())
            .or_else(|| decision.departments.first().cloned())
            .unwrap_or_else(|| Department::UNKNOWN.into());

        Self {
            detection_type: record.kind.to_str().into(),
            department,
            departments: decision.departments.clone(),
            priority: decision.priority,
            pothole_severity,
            waste_category,
            detection_status,
            area_pct: primary.map(|p| p.area_pct),
            est_depth_m: match record.kind {
                DetectionKind::Pothole => primary.and_then(|p| p.est_depth_m),
                DetectionKind::Waste => None,
            },
            tags: record.kind.default_tags().iter().map(|t| t.to_string()).collect(),
        }
    }
}
