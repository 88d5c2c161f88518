use crate::detection::{DetectedObject, DetectionKind, DetectionParams, Processor, RawFrame, base_object};

/// Depth assigned to a completely black crop.
const MAX_DEPTH_M: f64 = 0.3;

/// Depth that doubles an object's risk relative to its area alone.
const REFERENCE_DEPTH_M: f64 = 0.1;

/// Share of the image height below which a pothole is assumed to be on asphalt.
const ROAD_LINE: f64 = 0.5;

/// Heuristic depth from the crop's mean grey level: darker reads as deeper,
/// linearly from 0 m at white to `MAX_DEPTH_M` at black.
pub fn estimate_depth_m(mean_intensity: f64) -> f64 {
    ((255.0 - mean_intensity) / 255.0 * MAX_DEPTH_M).max(0.0)
}

/// Measures pothole boxes and ranks them by risk (area scaled by depth).
#[derive(Debug, Clone, Copy, Default)]
pub struct PotholeProcessor;

impl Processor for PotholeProcessor {
    fn kind(&self) -> DetectionKind { DetectionKind::Pothole }

    fn extract(&self, frame: &RawFrame) -> DetectionParams {
        if frame.is_empty() {
            return DetectionParams { road_type: Some("unknown".into()), ..Default::default() };
        }

        let mut detections = frame.boxes.iter()
            .map(|raw| {
                let depth = raw.mean_intensity.map(estimate_depth_m);
                let depth_ratio = depth.filter(|&d| d != 0.0).map_or(0.0, |d| d / REFERENCE_DEPTH_M);
                let object = base_object(frame, raw);
                DetectedObject {
                    risk_score: Some(object.area_pct * (1.0 + depth_ratio)),
                    est_depth_m: depth,
                    ..object
                }
            })
            .collect::<Vec<_>>();

        detections.sort_by(|a, b| risk(b).total_cmp(&risk(a)));

        let primary = detections.first().cloned();
        let road_type = match &primary {
            Some(object) if frame.height > 0 && object.xyxy[3] / frame.height as f64 > ROAD_LINE => "asphalt",
            _ => "unknown",
        };

        DetectionParams { detections, primary, road_type: Some(road_type.into()), waste_type: None }
    }
}

#[inline]
fn risk(object: &DetectedObject) -> f64 { object.risk_score.unwrap_or(0.0) }
