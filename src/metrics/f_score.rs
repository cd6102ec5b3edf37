//! F-beta score and operating-point selection on a precision-recall curve.

use crate::types::{PrecisionRecallCurve, PrecisionRecallPoint};

/// Calculate F-beta score from precision and recall
///
/// F-beta = (1 + beta²) * precision * recall / ((beta² * precision) + recall)
///
/// - beta = 1.0: Equal weight (F1 score)
/// - beta > 1.0: More weight on recall
/// - beta < 1.0: More weight on precision
///
/// Returns 0.0 when precision and recall are both zero, or when `beta` is
/// not a positive number.
///
/// # Examples
///
/// ```
/// # use text_det_eval::metrics::f_score::f_score;
/// let f1 = f_score(0.8, 0.9, 1.0);
/// assert!((f1 - 0.847).abs() < 0.001);
///
/// let f2 = f_score(0.8, 0.9, 2.0);
/// assert!((f2 - 0.877).abs() < 0.001);
/// ```
#[must_use]
pub fn f_score(precision: f64, recall: f64, beta: f64) -> f64 {
    if !(beta > 0.0) || precision + recall == 0.0 {
        return 0.0;
    }

    let beta_squared = beta * beta;
    let denominator = (beta_squared * precision) + recall;
    if denominator == 0.0 {
        return 0.0;
    }

    (1.0 + beta_squared) * precision * recall / denominator
}

/// Operating point of the curve with the highest F-beta score.
///
/// Returns the point and its score, or `None` for an empty curve. On equal
/// scores the earlier (higher-confidence) point wins.
pub fn best_operating_point(
    curve: &PrecisionRecallCurve,
    beta: f64,
) -> Option<(PrecisionRecallPoint, f64)> {
    curve
        .points()
        .into_iter()
        .map(|point| {
            let score = f_score(point.precision, point.recall, beta);
            (point, score)
        })
        .fold(None, |best, (point, score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((point, score)),
        })
}

/// Highest precision reached at a recall of at least `recall`.
///
/// Returns 0.0 when the curve never reaches that recall.
pub fn precision_at_recall(curve: &PrecisionRecallCurve, recall: f64) -> f64 {
    curve
        .precision
        .iter()
        .zip(&curve.recall)
        .filter(|(_, &r)| r >= recall)
        .map(|(&p, _)| p)
        .fold(0.0f64, f64::max)
}
