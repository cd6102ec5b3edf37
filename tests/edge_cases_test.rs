//! Edge cases and boundary conditions of matching and curve building.

use text_det_eval::matching::match_detections;
use text_det_eval::metrics::{build_curve, Iou};
use text_det_eval::types::{BoundingBox, DetectionItem, GroundTruthItem, ScoredPair};

fn square(row: f64, col: f64, side: f64) -> BoundingBox {
    BoundingBox::new(row, col, side, side)
}

// ============================================================================
// MATCHING EDGE CASES
// ============================================================================

#[test]
fn test_empty_detections_with_ground_truth() {
    let mut gt = vec![GroundTruthItem::new("a", square(10.0, 10.0, 50.0))];
    let mut dt: Vec<DetectionItem<&str>> = vec![];

    let matched = match_detections(&mut gt, &mut dt, &Iou, 0.5).unwrap();
    assert_eq!(matched, 0);
    assert!(!gt[0].matched, "Ground truth should stay unmatched");
}

#[test]
fn test_empty_ground_truth_with_detections() {
    let mut gt: Vec<GroundTruthItem<&str>> = vec![];
    let mut dt = vec![DetectionItem::new("a", square(10.0, 10.0, 50.0), 0.9)];

    let matched = match_detections(&mut gt, &mut dt, &Iou, 0.5).unwrap();
    assert_eq!(matched, 0);
    assert!(!dt[0].matched, "Should be a false positive");
}

#[test]
fn test_many_detections_one_ground_truth() {
    let mut gt = vec![GroundTruthItem::new(1usize, square(50.0, 50.0, 100.0))];
    let mut dt = vec![
        DetectionItem::new(1usize, square(52.0, 52.0, 100.0), 0.90),
        DetectionItem::new(1usize, square(50.0, 50.0, 100.0), 0.95),
        DetectionItem::new(1usize, square(55.0, 55.0, 100.0), 0.80),
        DetectionItem::new(1usize, square(48.0, 48.0, 100.0), 0.85),
    ];

    let matched = match_detections(&mut gt, &mut dt, &Iou, 0.5).unwrap();
    assert_eq!(matched, 1, "Only one detection should match the ground truth");
    assert!(dt[0].matched);
    assert_eq!(dt[0].confidence, 0.95);
    assert!(dt[1..].iter().all(|d| !d.matched));
}

#[test]
fn test_lower_confidence_detection_takes_remaining_ground_truth() {
    // Both ground-truth items overlap both detections; the stronger detection
    // takes the first ground truth, the weaker one the second.
    let mut gt = vec![
        GroundTruthItem::new("w", square(0.0, 0.0, 10.0)),
        GroundTruthItem::new("w", square(0.0, 1.0, 10.0)),
    ];
    let mut dt = vec![
        DetectionItem::new("w", square(0.0, 1.0, 10.0), 0.4),
        DetectionItem::new("w", square(0.0, 1.0, 10.0), 0.6),
    ];

    assert_eq!(match_detections(&mut gt, &mut dt, &Iou, 0.5).unwrap(), 2);
    assert!(gt.iter().all(|g| g.matched));
}

#[test]
fn test_identical_box_different_label_never_matches() {
    let mut gt = vec![GroundTruthItem::new("dog".to_string(), square(0.0, 0.0, 10.0))];
    let mut dt = vec![DetectionItem::new("cat".to_string(), square(0.0, 0.0, 10.0), 1.0)];

    assert_eq!(match_detections(&mut gt, &mut dt, &Iou, 0.0).unwrap(), 0);
}

#[test]
fn test_zero_threshold_requires_some_overlap() {
    let mut gt = vec![GroundTruthItem::new(0usize, square(0.0, 0.0, 10.0))];
    let mut dt = vec![DetectionItem::new(0usize, square(10.0, 10.0, 10.0), 0.9)];

    assert_eq!(match_detections(&mut gt, &mut dt, &Iou, 0.0).unwrap(), 0);
}

#[test]
fn test_threshold_one_never_matches() {
    let mut gt = vec![GroundTruthItem::new(0usize, square(0.0, 0.0, 10.0))];
    let mut dt = vec![DetectionItem::new(0usize, square(0.0, 0.0, 10.0), 0.9)];

    assert_eq!(match_detections(&mut gt, &mut dt, &Iou, 1.0).unwrap(), 0);
}

#[test]
fn test_already_matched_flags_are_kept() {
    let mut gt = vec![GroundTruthItem::new(0usize, square(0.0, 0.0, 10.0))];
    gt[0].matched = true;
    let mut dt = vec![DetectionItem::new(0usize, square(0.0, 0.0, 10.0), 0.9)];

    assert_eq!(match_detections(&mut gt, &mut dt, &Iou, 0.5).unwrap(), 0);
    assert!(gt[0].matched);
}

#[test]
fn test_nan_confidence_sorts_first() {
    let mut gt = vec![GroundTruthItem::new(0usize, square(0.0, 0.0, 10.0))];
    let mut dt = vec![
        DetectionItem::new(0usize, square(0.0, 0.0, 10.0), 0.9),
        DetectionItem::new(0usize, square(0.0, 0.0, 10.0), f64::NAN),
    ];

    match_detections(&mut gt, &mut dt, &Iou, 0.5).unwrap();
    assert!(dt[0].confidence.is_nan());
    assert!(dt[0].matched);
}

// ============================================================================
// CURVE EDGE CASES
// ============================================================================

#[test]
fn test_curve_all_false_positives() {
    let pairs: Vec<ScoredPair> = (0..5).map(|i| ScoredPair::new(i as f64 / 10.0, false)).collect();
    let curve = build_curve(&pairs, 2).unwrap();

    assert!(curve.precision.iter().all(|&p| p == 0.0));
    assert!(curve.recall.iter().all(|&r| r == 0.0));
    assert_eq!(curve.thresholds, vec![0.4, 0.3, 0.2, 0.1, 0.0]);
}

#[test]
fn test_curve_more_matches_than_ground_truth() {
    // Inconsistent input is not rejected; recall simply exceeds 1.0.
    let pairs = vec![ScoredPair::new(0.9, true), ScoredPair::new(0.8, true)];
    let curve = build_curve(&pairs, 1).unwrap();
    assert_eq!(curve.recall, vec![1.0, 2.0]);
}

#[test]
fn test_curve_equal_confidences() {
    let pairs = vec![
        ScoredPair::new(0.5, true),
        ScoredPair::new(0.5, true),
        ScoredPair::new(0.5, false),
    ];
    let curve = build_curve(&pairs, 2).unwrap();

    assert_eq!(curve.thresholds, vec![0.5, 0.5, 0.5]);
    assert_eq!(curve.precision[0], 0.0);
    assert_eq!(curve.final_recall(), 1.0);
}
