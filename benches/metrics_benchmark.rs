use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use text_det_eval::evaluator::{evaluate_images, ImageItems};
use text_det_eval::matching::match_detections;
use text_det_eval::metrics::{average_precision, build_curve, calculate_iou, Iou};
use text_det_eval::nms::non_maximum_suppression;
use text_det_eval::types::{BoundingBox, DetectionItem, GroundTruthItem, ScoredPair};
use text_det_eval::EvalConfig;

fn scene(size: usize) -> (Vec<GroundTruthItem<usize>>, Vec<DetectionItem<usize>>) {
    let ground_truth = (0..size)
        .map(|i| {
            let offset = (i as f64) * 12.0;
            GroundTruthItem::new(i % 10, BoundingBox::new(offset, offset, 10.0, 10.0))
        })
        .collect();
    let detections = (0..size * 2)
        .map(|i| {
            let offset = (i / 2) as f64 * 12.0 + (i % 2) as f64;
            DetectionItem::new((i / 2) % 10, BoundingBox::new(offset, offset, 10.0, 10.0), 0.9 - i as f64 * 1e-4)
        })
        .collect();
    (ground_truth, detections)
}

fn bench_iou_calculation(c: &mut Criterion) {
    let bbox1 = BoundingBox::new(10.0, 10.0, 50.0, 50.0);
    let bbox2 = BoundingBox::new(30.0, 30.0, 50.0, 50.0);

    c.bench_function("iou_single", |b| {
        b.iter(|| calculate_iou(black_box(&bbox1), black_box(&bbox2)));
    });
}

fn bench_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_detections");

    for size in [10, 50, 100, 500].iter() {
        let (ground_truth, detections) = scene(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut gt = ground_truth.clone();
                let mut dt = detections.clone();
                match_detections(black_box(&mut gt), black_box(&mut dt), &Iou, 0.5)
            });
        });
    }
    group.finish();
}

fn bench_nms(c: &mut Criterion) {
    let mut group = c.benchmark_group("nms");

    for size in [10, 50, 100, 500].iter() {
        let (_, detections) = scene(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| non_maximum_suppression(black_box(&detections), &Iou, black_box(0.5), true));
        });
    }
    group.finish();
}

fn bench_curve(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_curve");

    for size in [100, 1_000, 10_000, 100_000].iter() {
        let pairs: Vec<ScoredPair> = (0..*size)
            .map(|i| ScoredPair::new(((i * 7919) % size) as f64 / *size as f64, i % 3 != 0))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let curve = build_curve(black_box(&pairs), *size).unwrap();
                average_precision(&curve)
            });
        });
    }
    group.finish();
}

fn bench_evaluate_images(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_images");
    let sequential = EvalConfig { parallel: false, ..EvalConfig::default() };

    let images: Vec<ImageItems<usize>> = (0..200)
        .map(|i| {
            let (gt, dt) = scene(100);
            ImageItems::new(format!("img_{i}"), gt, dt)
        })
        .collect();

    group.bench_function("parallel", |b| {
        b.iter(|| evaluate_images(black_box(images.clone()), &EvalConfig::default(), &Iou).unwrap());
    });
    group.bench_function("sequential", |b| {
        b.iter(|| evaluate_images(black_box(images.clone()), &sequential, &Iou).unwrap());
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_iou_calculation,
    bench_matching,
    bench_nms,
    bench_curve,
    bench_evaluate_images,
);
criterion_main!(benches);
