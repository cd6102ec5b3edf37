//! Average Precision (AP) of a precision-recall curve.

use crate::metrics::precision_recall::interpolate_precision;
use crate::types::PrecisionRecallCurve;

/// Calculate Average Precision (AP) from precision and recall values.
///
/// Uses the COCO-style 101-point interpolation method.
///
/// # Example
///
/// ```
/// use text_det_eval::metrics::ap::calculate_ap;
///
/// let precisions = vec![1.0, 1.0, 0.67, 0.75, 0.6];
/// let recalls = vec![0.25, 0.5, 0.5, 0.75, 0.75];
/// let ap = calculate_ap(&precisions, &recalls);
/// assert!(ap >= 0.0 && ap <= 1.0);
/// ```
pub fn calculate_ap(precisions: &[f64], recalls: &[f64]) -> f64 {
    if precisions.is_empty() || recalls.is_empty() {
        return 0.0;
    }

    let interpolated = interpolate_precision(precisions, recalls);
    interpolated.iter().sum::<f64>() / interpolated.len() as f64
}

/// Average Precision of a curve built by the curve builder.
pub fn average_precision(curve: &PrecisionRecallCurve) -> f64 {
    calculate_ap(&curve.precision, &curve.recall)
}
