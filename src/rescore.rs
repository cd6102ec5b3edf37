//! Replacing detector confidences with an external classifier's scores.

use crate::types::DetectionItem;

/// Produces a new confidence for a detection, e.g. from a secondary classifier.
pub trait Rescorer<L, P> {
    fn rescore(&self, detection: &DetectionItem<L, P>) -> f64;
}

impl<L, P, F> Rescorer<L, P> for F
where
    F: Fn(&DetectionItem<L, P>) -> f64,
{
    fn rescore(&self, detection: &DetectionItem<L, P>) -> f64 {
        self(detection)
    }
}

/// Overwrite every detection's confidence with the rescorer's output.
pub fn apply_rescorer<L, P, R>(detections: &mut [DetectionItem<L, P>], rescorer: &R)
where
    R: Rescorer<L, P> + ?Sized,
{
    for detection in detections.iter_mut() {
        detection.confidence = rescorer.rescore(detection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoundingBox;

    #[test]
    fn test_apply_rescorer() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let mut detections = vec![
            DetectionItem::with_payload("ab".to_string(), bbox, 0.2, Some("ab".to_string())),
            DetectionItem::with_payload("abcd".to_string(), bbox, 0.9, None),
        ];

        let by_length = |dt: &DetectionItem<String, Option<String>>| dt.label.len() as f64 / 10.0;
        apply_rescorer(&mut detections, &by_length);

        assert!((detections[0].confidence - 0.2).abs() < 1e-10);
        assert!((detections[1].confidence - 0.4).abs() < 1e-10);
        assert_eq!(detections[0].payload.as_deref(), Some("ab"));
    }
}
