//! Spatial overlap between bounding boxes.
//!
//! The matcher only relies on the [`OverlapMetric`] contract: the score is
//! symmetric and larger means more spatially coincident. [`Iou`] is the
//! default; any `Fn(&BoundingBox, &BoundingBox) -> f64` can stand in for it.

use crate::types::BoundingBox;

/// A symmetric overlap score between two boxes.
pub trait OverlapMetric {
    fn overlap(&self, a: &BoundingBox, b: &BoundingBox) -> f64;
}

impl<F> OverlapMetric for F
where
    F: Fn(&BoundingBox, &BoundingBox) -> f64,
{
    fn overlap(&self, a: &BoundingBox, b: &BoundingBox) -> f64 {
        self(a, b)
    }
}

/// Intersection over Union.
#[derive(Debug, Clone, Copy, Default)]
pub struct Iou;

impl OverlapMetric for Iou {
    fn overlap(&self, a: &BoundingBox, b: &BoundingBox) -> f64 {
        calculate_iou(a, b)
    }
}

/// Calculate the Intersection over Union (IoU) between two bounding boxes.
///
/// Returns a value between 0.0 (no overlap) and 1.0 (identical boxes).
///
/// # Example
///
/// ```
/// use text_det_eval::metrics::overlap::calculate_iou;
/// use text_det_eval::types::BoundingBox;
///
/// let bbox1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
/// let bbox2 = BoundingBox::new(5.0, 5.0, 10.0, 10.0);
/// let iou = calculate_iou(&bbox1, &bbox2);
/// assert!(iou > 0.0 && iou < 1.0);
/// ```
pub fn calculate_iou(bbox1: &BoundingBox, bbox2: &BoundingBox) -> f64 {
    let top = bbox1.row.max(bbox2.row);
    let left = bbox1.col.max(bbox2.col);
    let bottom = bbox1.bottom().min(bbox2.bottom());
    let right = bbox1.right().min(bbox2.right());

    if bottom <= top || right <= left {
        return 0.0;
    }

    let intersection_area = (bottom - top) * (right - left);
    let union_area = bbox1.area() + bbox2.area() - intersection_area;

    if union_area <= 0.0 {
        return 0.0;
    }

    intersection_area / union_area
}

/// Overlap of every box in `bboxes1` against every box in `bboxes2`.
///
/// `result[i][j]` is the overlap between `bboxes1[i]` and `bboxes2[j]`.
pub fn overlap_matrix<M: OverlapMetric + ?Sized>(
    metric: &M,
    bboxes1: &[BoundingBox],
    bboxes2: &[BoundingBox],
) -> Vec<Vec<f64>> {
    bboxes1
        .iter()
        .map(|a| bboxes2.iter().map(|b| metric.overlap(a, b)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_boxes() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!((calculate_iou(&bbox, &bbox) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_no_overlap() {
        let bbox1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let bbox2 = BoundingBox::new(20.0, 20.0, 10.0, 10.0);
        assert_eq!(calculate_iou(&bbox1, &bbox2), 0.0);
    }

    #[test]
    fn test_touching_edges() {
        let bbox1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let bbox2 = BoundingBox::new(0.0, 10.0, 10.0, 10.0);
        assert_eq!(calculate_iou(&bbox1, &bbox2), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        let bbox1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let bbox2 = BoundingBox::new(5.0, 5.0, 10.0, 10.0);

        // Intersection: 5x5 = 25
        // Union: 100 + 100 - 25 = 175
        assert!((calculate_iou(&bbox1, &bbox2) - 0.142857).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_box() {
        let bbox1 = BoundingBox::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(calculate_iou(&bbox1, &bbox1), 0.0);
    }

    #[test]
    fn test_closure_metric() {
        let always_one = |_: &BoundingBox, _: &BoundingBox| 1.0;
        let bbox1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let bbox2 = BoundingBox::new(50.0, 50.0, 10.0, 10.0);
        assert_eq!(always_one.overlap(&bbox1, &bbox2), 1.0);
    }

    #[test]
    fn test_overlap_matrix() {
        let bboxes1 = vec![
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            BoundingBox::new(5.0, 5.0, 10.0, 10.0),
        ];
        let bboxes2 = vec![BoundingBox::new(0.0, 0.0, 10.0, 10.0)];

        let matrix = overlap_matrix(&Iou, &bboxes1, &bboxes2);
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix[0].len(), 1);
        assert!((matrix[0][0] - 1.0).abs() < 1e-10);
    }
}
