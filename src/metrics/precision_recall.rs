//! Precision-recall curve over the confidence axis.

use crate::error::{EvalError, Result};
use crate::matching::sort_descending_by;
use crate::types::{PrecisionRecallCurve, ScoredPair};

/// Build the precision-recall curve from matched detections of all images.
///
/// Pairs are ordered by descending confidence (ties in reverse input order).
/// At position `k` the curve holds the precision and recall obtained by
/// accepting the first `k + 1` detections, and the confidence of the
/// `k`-th detection as threshold.
///
/// An empty `scored_pairs` yields an empty curve.
///
/// # Errors
///
/// Returns [`EvalError::InvalidInput`] when `total_ground_truth` is zero,
/// since recall is undefined.
///
/// # Example
///
/// ```
/// use text_det_eval::metrics::precision_recall::build_curve;
/// use text_det_eval::types::ScoredPair;
///
/// let pairs = vec![ScoredPair::new(0.5, false), ScoredPair::new(0.9, true)];
/// let curve = build_curve(&pairs, 1).unwrap();
/// assert_eq!(curve.precision, vec![1.0, 0.5]);
/// assert_eq!(curve.recall, vec![1.0, 1.0]);
/// assert_eq!(curve.thresholds, vec![0.9, 0.5]);
/// ```
pub fn build_curve(
    scored_pairs: &[ScoredPair],
    total_ground_truth: usize,
) -> Result<PrecisionRecallCurve> {
    if total_ground_truth == 0 {
        return Err(EvalError::InvalidInput(
            "Cannot compute recall without ground truth".to_string(),
        ));
    }

    let mut pairs = scored_pairs.to_vec();
    sort_descending_by(&mut pairs, |pair| pair.confidence);

    let mut curve = PrecisionRecallCurve {
        precision: Vec::with_capacity(pairs.len()),
        recall: Vec::with_capacity(pairs.len()),
        thresholds: Vec::with_capacity(pairs.len()),
    };

    let mut tp = 0usize;
    let mut fp = 0usize;
    for pair in &pairs {
        if pair.matched {
            tp += 1;
        } else {
            fp += 1;
        }

        curve.precision.push(tp as f64 / (tp + fp) as f64);
        curve.recall.push(tp as f64 / total_ground_truth as f64);
        curve.thresholds.push(pair.confidence);
    }

    Ok(curve)
}

/// Interpolate precision values for standard recall levels.
///
/// Uses the COCO-style 101-point interpolation: at each recall level the
/// interpolated precision is the maximum precision at any recall at or above it.
///
/// Returns interpolated precision at 101 recall levels (0.0, 0.01, ..., 1.0).
pub fn interpolate_precision(precision: &[f64], recall: &[f64]) -> Vec<f64> {
    (0..=100)
        .map(|i| {
            let recall_level = i as f64 / 100.0;
            precision
                .iter()
                .zip(recall)
                .filter(|(_, &r)| r >= recall_level)
                .map(|(&p, _)| p)
                .fold(0.0f64, f64::max)
        })
        .collect()
}
