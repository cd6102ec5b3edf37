//! Stress tests with many images and crowded scenes.

use text_det_eval::evaluator::{evaluate_images, ImageItems};
use text_det_eval::metrics::{average_precision, Iou};
use text_det_eval::types::{BoundingBox, DetectionItem, GroundTruthItem};
use text_det_eval::EvalConfig;

fn grid_image(index: usize, objects: usize, labels: usize) -> ImageItems<usize> {
    let mut ground_truth = Vec::with_capacity(objects);
    let mut detections = Vec::with_capacity(objects * 2);

    for i in 0..objects {
        let row = (i / 50) as f64 * 10.0;
        let col = (i % 50) as f64 * 10.0;
        let label = (i + index) % labels;
        let bbox = BoundingBox::new(row, col, 8.0, 8.0);

        ground_truth.push(GroundTruthItem::new(label, bbox));
        // Exact hit plus a shifted duplicate of lower confidence
        detections.push(DetectionItem::new(label, bbox, 0.9 - (i as f64 / 100_000.0)));
        detections.push(DetectionItem::new(
            label,
            BoundingBox::new(row + 1.0, col + 1.0, 8.0, 8.0),
            0.4 - (i as f64 / 100_000.0),
        ));
    }

    ImageItems::new(format!("img_{index}"), ground_truth, detections)
}

#[test]
fn test_1000_objects_single_image() {
    let evaluation = evaluate_images(vec![grid_image(0, 1000, 1)], &EvalConfig::default(), &Iou).unwrap();

    assert_eq!(evaluation.total_matched(), 1000);
    assert_eq!(evaluation.total_detections(), 2000);
    // The first 1000 operating points are all true positives
    assert_eq!(evaluation.curve.precision[999], 1.0);
    assert_eq!(evaluation.curve.recall[999], 1.0);
    assert!((evaluation.curve.final_precision() - 0.5).abs() < 1e-10);
    assert!(average_precision(&evaluation.curve) > 0.99);
}

#[test]
fn test_100_images_many_labels_parallel_equals_sequential() {
    let images: Vec<ImageItems<usize>> = (0..100).map(|i| grid_image(i, 120, 62)).collect();
    let sequential = EvalConfig { parallel: false, ..EvalConfig::default() };

    let parallel_eval = evaluate_images(images.clone(), &EvalConfig::default(), &Iou).unwrap();
    let sequential_eval = evaluate_images(images, &sequential, &Iou).unwrap();

    assert_eq!(parallel_eval.curve, sequential_eval.curve);
    assert_eq!(parallel_eval.total_matched(), 12_000);
    let names: Vec<&str> = parallel_eval.images.iter().map(|img| img.name.as_str()).collect();
    assert_eq!(names[0], "img_0");
    assert_eq!(names[99], "img_99");
}

#[test]
fn test_nms_removes_shifted_duplicates() {
    let config = EvalConfig { apply_nms: true, ..EvalConfig::default() };
    let evaluation = evaluate_images(vec![grid_image(0, 500, 3)], &config, &Iou).unwrap();

    assert_eq!(evaluation.stats.suppressed_by_nms, 500);
    assert_eq!(evaluation.total_detections(), 500);
    assert!(evaluation.curve.precision.iter().all(|&p| p == 1.0));
}
