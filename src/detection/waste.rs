use crate::detection::{DetectedObject, DetectionKind, DetectionParams, Processor, RawFrame, base_object};

/// Measures waste boxes and ranks them by pixel area.
#[derive(Debug, Clone, Copy, Default)]
pub struct WasteProcessor;

impl Processor for WasteProcessor {
    fn kind(&self) -> DetectionKind { DetectionKind::Waste }

    fn extract(&self, frame: &RawFrame) -> DetectionParams {
        if frame.is_empty() {
            return DetectionParams { waste_type: Some("unknown".into()), ..Default::default() };
        }

        let height = frame.height as f64;
        let mut detections = frame.boxes.iter()
            .map(|raw| DetectedObject {
                density: Some(raw.mask_fill.unwrap_or(1.0)),
                // distance of the box bottom from the image bottom, as a share of height
                proximity_pct: Some(if height > 0.0 { (height - raw.xyxy[3]) / height } else { 0.0 }),
                ..base_object(frame, raw)
            })
            .collect::<Vec<_>>();

        detections.sort_by(|a, b| b.area_px.total_cmp(&a.area_px));

        let primary = detections.first().cloned();
        let waste_type = primary.as_ref().map_or_else(|| "unknown".to_string(), |p| p.class_name.clone());

        DetectionParams { detections, primary, road_type: None, waste_type: Some(waste_type) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::RawBox;
    use approx::assert_abs_diff_eq;

    fn frame() -> RawFrame {
        RawFrame {
            width: 200,
            height: 100,
            boxes: vec![
                RawBox { xyxy: [0.0, 0.0, 10.0, 10.0], conf: 0.6, class_id: 1, mean_intensity: None, mask_fill: None },
                RawBox { xyxy: [20.0, 40.0, 60.0, 75.0], conf: 0.8, class_id: 2, mean_intensity: None, mask_fill: Some(0.4) },
            ],
            names: [(1, "plastic".to_string()), (2, "battery".to_string())].into_iter().collect(),
        }
    }

    #[test]
    fn largest_box_becomes_primary() {
        let params = WasteProcessor.extract(&frame());
        let primary = params.primary.unwrap();

        assert_eq!(primary.class_name, "battery");
        assert_abs_diff_eq!(primary.area_px, 1400.0);
        assert_abs_diff_eq!(primary.area_pct, 0.07);
        assert_abs_diff_eq!(primary.density.unwrap(), 0.4);
        assert_abs_diff_eq!(primary.proximity_pct.unwrap(), 0.25);
        assert_eq!(primary.est_depth_m, None);
        assert_eq!(params.waste_type.as_deref(), Some("battery"));
        assert_eq!(params.detections[1].density, Some(1.0));
    }

    #[test]
    fn empty_frame_is_unknown_waste() {
        let params = WasteProcessor.extract(&RawFrame { width: 10, height: 10, ..Default::default() });
        assert!(params.primary.is_none());
        assert_eq!(params.waste_type.as_deref(), Some("unknown"));
    }

    #[test]
    fn process_wraps_kind() {
        let record = WasteProcessor.process(&frame());
        assert_eq!(record.kind, DetectionKind::Waste);
        assert!(record.primary().is_some());
    }
}
