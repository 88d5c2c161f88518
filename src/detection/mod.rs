mod frame;
mod pothole;
mod record;
mod waste;

pub use frame::{RawBox, RawFrame};
pub use pothole::{PotholeProcessor, estimate_depth_m};
pub use record::{DetectedObject, DetectionKind, DetectionParams, DetectionRecord};
pub use waste::WasteProcessor;

/// Turns one detector's raw output for a frame into measured objects.
pub trait Processor {
    /// The detection kind this processor produces.
    fn kind(&self) -> DetectionKind;

    /// Measure every box and pick the primary object.
    fn extract(&self, frame: &RawFrame) -> DetectionParams;

    /// Wrap `extract` in a record ready for reasoning.
    fn process(&self, frame: &RawFrame) -> DetectionRecord {
        DetectionRecord { kind: self.kind(), params: self.extract(frame) }
    }
}

/// Measurements shared by both processors.
pub(crate) fn base_object(frame: &RawFrame, raw: &RawBox) -> DetectedObject {
    let [x1, y1, x2, y2] = raw.xyxy;
    let area_px = ((x2 - x1) * (y2 - y1)).max(0.0);
    let frame_area = frame.area();

    DetectedObject {
        xyxy: raw.xyxy,
        conf: raw.conf,
        class_id: raw.class_id,
        class_name: frame.class_name(raw.class_id),
        area_px,
        area_pct: if frame_area > 0.0 { area_px / frame_area } else { 0.0 },
        est_depth_m: None,
        risk_score: None,
        density: None,
        proximity_pct: None,
    }
}
