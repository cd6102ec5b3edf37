//! Non-Maximum Suppression (`NMS`) of duplicate detections
//!
//! Runs before matching to remove lower-confidence detections that cover
//! the same object as a stronger one.

use crate::error::Result;
use crate::metrics::overlap::OverlapMetric;
use crate::threshold::validate_threshold;
use crate::types::DetectionItem;

/// Compute which detections survive Non-Maximum Suppression
///
/// Detections are visited by decreasing confidence. A kept detection
/// suppresses every later one whose overlap with it exceeds `nms_thr`;
/// with `per_label`, only detections carrying an equal label suppress
/// each other.
///
/// # Returns
///
/// Boolean mask in input order indicating which detections to keep
///
/// # Errors
///
/// Returns error if `nms_thr` is not in range [0.0, 1.0]
///
/// # Examples
///
/// ```
/// # use text_det_eval::metrics::overlap::Iou;
/// # use text_det_eval::nms::non_maximum_suppression;
/// # use text_det_eval::types::{BoundingBox, DetectionItem};
/// let detections = vec![
///     DetectionItem::new("a", BoundingBox::new(10.0, 10.0, 40.0, 40.0), 0.9),
///     DetectionItem::new("a", BoundingBox::new(15.0, 15.0, 40.0, 40.0), 0.8),
///     DetectionItem::new("a", BoundingBox::new(100.0, 100.0, 50.0, 50.0), 0.95),
/// ];
///
/// let keep_mask = non_maximum_suppression(&detections, &Iou, 0.5, true).unwrap();
/// assert_eq!(keep_mask, vec![true, false, true]);
/// ```
pub fn non_maximum_suppression<L, P, M>(
    detections: &[DetectionItem<L, P>],
    metric: &M,
    nms_thr: f64,
    per_label: bool,
) -> Result<Vec<bool>>
where
    L: PartialEq,
    M: OverlapMetric + ?Sized,
{
    validate_threshold(nms_thr)?;

    let n = detections.len();
    let mut keep_mask = vec![true; n];

    let mut indices: Vec<usize> = (0..n).collect();
    indices.sort_by(|&a, &b| {
        detections[b]
            .confidence
            .total_cmp(&detections[a].confidence)
    });

    for (i, &idx_i) in indices.iter().enumerate() {
        if !keep_mask[idx_i] {
            continue;
        }

        let kept = &detections[idx_i];
        for &idx_j in &indices[(i + 1)..] {
            if !keep_mask[idx_j] {
                continue;
            }

            let other = &detections[idx_j];
            if per_label && other.label != kept.label {
                continue;
            }

            if metric.overlap(&kept.bbox, &other.bbox) > nms_thr {
                keep_mask[idx_j] = false;
            }
        }
    }

    Ok(keep_mask)
}

/// Drop the detections suppressed by [`non_maximum_suppression`], keeping input order.
pub fn suppress_overlapping<L, P, M>(
    detections: Vec<DetectionItem<L, P>>,
    metric: &M,
    nms_thr: f64,
    per_label: bool,
) -> Result<Vec<DetectionItem<L, P>>>
where
    L: PartialEq,
    M: OverlapMetric + ?Sized,
{
    let keep_mask = non_maximum_suppression(&detections, metric, nms_thr, per_label)?;

    Ok(detections
        .into_iter()
        .zip(keep_mask)
        .filter_map(|(dt, keep)| keep.then_some(dt))
        .collect())
}
