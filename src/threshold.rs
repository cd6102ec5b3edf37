//! Threshold validation and confidence filtering.

use crate::error::{EvalError, Result};
use crate::types::DetectionItem;

/// Keep the detections whose confidence is at least `threshold`.
///
/// # Errors
///
/// Returns an error if the threshold is not in the valid range [0.0, 1.0].
///
/// # Example
///
/// ```
/// use text_det_eval::threshold::filter_by_confidence;
/// use text_det_eval::types::{BoundingBox, DetectionItem};
///
/// let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
/// let detections = vec![
///     DetectionItem::new('a', bbox, 0.9),
///     DetectionItem::new('b', bbox, 0.3),
/// ];
///
/// let filtered = filter_by_confidence(detections, 0.5).unwrap();
/// assert_eq!(filtered.len(), 1);
/// ```
pub fn filter_by_confidence<L, P>(
    detections: Vec<DetectionItem<L, P>>,
    threshold: f64,
) -> Result<Vec<DetectionItem<L, P>>> {
    validate_threshold(threshold)?;

    Ok(detections
        .into_iter()
        .filter(|dt| dt.confidence >= threshold)
        .collect())
}

/// Generate evenly spaced threshold values between `start` and `end` (inclusive).
///
/// # Example
///
/// ```
/// use text_det_eval::threshold::generate_threshold_range;
///
/// let thresholds = generate_threshold_range(0.0, 1.0, 11).unwrap();
/// assert_eq!(thresholds.len(), 11);
/// assert_eq!(thresholds[0], 0.0);
/// assert_eq!(thresholds[10], 1.0);
/// ```
pub fn generate_threshold_range(start: f64, end: f64, steps: usize) -> Result<Vec<f64>> {
    if steps == 0 {
        return Err(EvalError::InvalidThreshold(
            "Number of steps must be greater than 0".to_string(),
        ));
    }

    validate_threshold(start)?;
    validate_threshold(end)?;

    if start > end {
        return Err(EvalError::InvalidThreshold(format!(
            "Start threshold ({}) must be <= end threshold ({})",
            start, end
        )));
    }

    if steps == 1 {
        return Ok(vec![start]);
    }

    let step_size = (end - start) / (steps - 1) as f64;
    Ok((0..steps).map(|i| start + step_size * i as f64).collect())
}

/// Validate that a threshold is in the valid range [0.0, 1.0].
///
/// NaN is rejected.
pub fn validate_threshold(threshold: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(EvalError::InvalidThreshold(format!(
            "Threshold must be between 0.0 and 1.0, got {}",
            threshold
        )));
    }
    Ok(())
}
