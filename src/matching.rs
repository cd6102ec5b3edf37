//! Greedy one-to-one matching of detections to ground truth within one image.

use crate::error::Result;
use crate::metrics::overlap::OverlapMetric;
use crate::threshold::validate_threshold;
use crate::types::{DetectionItem, GroundTruthItem};

/// Order items by descending confidence.
///
/// Sorted ascending with a stable sort, then reversed: items with equal
/// confidence end up in reverse input order. NaN sorts above every number.
pub(crate) fn sort_descending_by<T>(items: &mut [T], confidence: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| confidence(a).total_cmp(&confidence(b)));
    items.reverse();
}

/// Match detections to ground truth for a single image.
///
/// Detections are reordered by descending confidence (see
/// [`sort_descending_by`] for ties). Each detection, in that order, claims the
/// first ground-truth item in input order that is unmatched, carries an equal
/// label, and overlaps it by strictly more than `overlap_thr`. Both items are
/// flagged `matched`; flags are only ever set, never cleared.
///
/// # Arguments
///
/// * `ground_truth` - Ground-truth items of the image, in label-file order
/// * `detections` - Detections of the image; sorted in place
/// * `metric` - Symmetric overlap score
/// * `overlap_thr` - Exclusive overlap threshold in [0.0, 1.0]
///
/// # Returns
///
/// The number of detections that were matched.
///
/// # Errors
///
/// Returns an error if `overlap_thr` is outside [0.0, 1.0].
///
/// # Example
///
/// ```
/// use text_det_eval::matching::match_detections;
/// use text_det_eval::metrics::overlap::Iou;
/// use text_det_eval::types::{BoundingBox, DetectionItem, GroundTruthItem};
///
/// let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
/// let mut gt = vec![GroundTruthItem::new("cat", bbox)];
/// let mut dt = vec![DetectionItem::new("cat", bbox, 0.5), DetectionItem::new("cat", bbox, 0.9)];
///
/// let matched = match_detections(&mut gt, &mut dt, &Iou, 0.5).unwrap();
/// assert_eq!(matched, 1);
/// assert!(dt[0].matched && dt[0].confidence == 0.9);
/// assert!(!dt[1].matched);
/// ```
pub fn match_detections<L, G, D, M>(
    ground_truth: &mut [GroundTruthItem<L, G>],
    detections: &mut [DetectionItem<L, D>],
    metric: &M,
    overlap_thr: f64,
) -> Result<usize>
where
    L: PartialEq,
    M: OverlapMetric + ?Sized,
{
    validate_threshold(overlap_thr)?;

    sort_descending_by(detections, |dt| dt.confidence);

    let mut matched = 0;
    for dt in detections.iter_mut() {
        let candidate = ground_truth.iter_mut().find(|gt| {
            !gt.matched
                && gt.label == dt.label
                && metric.overlap(&gt.bbox, &dt.bbox) > overlap_thr
        });

        if let Some(gt) = candidate {
            gt.matched = true;
            dt.matched = true;
            matched += 1;
        }
    }

    Ok(matched)
}
