use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One bounding box as emitted by the object detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBox {
    /// Corner coordinates `[x1, y1, x2, y2]` in pixels.
    pub xyxy: [f64; 4],
    #[serde(default)]
    pub conf: f64,
    #[serde(default = "RawBox::unknown_class")]
    pub class_id: i64,
    /// Mean grey level (0..=255) of the box crop, when the caller sampled it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_intensity: Option<f64>,
    /// Fraction of the box covered by a segmentation mask, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask_fill: Option<f64>,
}

impl RawBox {
    fn unknown_class() -> i64 { -1 }
}

/// Detector output for a single image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFrame {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub boxes: Vec<RawBox>,
    /// Class id to label table of the detector.
    #[serde(default)]
    pub names: BTreeMap<i64, String>,
}

impl RawFrame {
    /// Image area in pixels.
    #[inline] pub fn area(&self) -> f64 { self.width as f64 * self.height as f64 }

    /// Returns `true` if the detector found nothing.
    #[inline] pub fn is_empty(&self) -> bool { self.boxes.is_empty() }

    /// Label for a class id, falling back to the id itself.
    pub fn class_name(&self, class_id: i64) -> String {
        self.names.get(&class_id).cloned().unwrap_or_else(|| class_id.to_string())
    }
}
