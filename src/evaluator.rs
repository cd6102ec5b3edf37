//! Evaluation orchestrator: pre-filter, match every image, build one curve.

use crate::config::EvalConfig;
use crate::error::{EvalError, Result};
use crate::loader::{
    char_label, detection_path, list_ground_truth_files, parse_char_detections,
    parse_word_detections, read_detection_file, read_ground_truth, word_label,
};
use crate::matching::match_detections;
use crate::metrics::overlap::{Iou, OverlapMetric};
use crate::metrics::precision_recall::build_curve;
use crate::nms::suppress_overlapping;
use crate::rescore::{apply_rescorer, Rescorer};
use crate::stats::IngestStats;
use crate::threshold::filter_by_confidence;
use crate::types::{
    DetectionItem, GroundTruthItem, PrecisionRecallCurve, ScoredPair,
};
use crate::vocabulary::Vocabulary;
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Ground truth and detections of one image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageItems<L, G = (), D = ()> {
    pub name: String,
    pub ground_truth: Vec<GroundTruthItem<L, G>>,
    pub detections: Vec<DetectionItem<L, D>>,
}

impl<L, G, D> ImageItems<L, G, D> {
    pub fn new(
        name: impl Into<String>,
        ground_truth: Vec<GroundTruthItem<L, G>>,
        detections: Vec<DetectionItem<L, D>>,
    ) -> Self {
        Self {
            name: name.into(),
            ground_truth,
            detections,
        }
    }
}

/// Matched per-image items plus the precision-recall curve over all of them.
///
/// The per-image lists keep their `matched` flags for overlay rendering.
#[derive(Debug, Clone)]
pub struct Evaluation<L, G = (), D = ()> {
    pub images: Vec<ImageItems<L, G, D>>,
    pub curve: PrecisionRecallCurve,
    pub stats: IngestStats,
}

impl<L, G, D> Evaluation<L, G, D> {
    pub fn total_ground_truth(&self) -> usize {
        self.images.iter().map(|img| img.ground_truth.len()).sum()
    }

    pub fn total_detections(&self) -> usize {
        self.images.iter().map(|img| img.detections.len()).sum()
    }

    pub fn total_matched(&self) -> usize {
        self.images
            .iter()
            .flat_map(|img| &img.detections)
            .filter(|dt| dt.matched)
            .count()
    }

    /// (confidence, matched) of every detection, image by image.
    pub fn scored_pairs(&self) -> Vec<ScoredPair> {
        collect_scored_pairs(&self.images)
    }
}

fn collect_scored_pairs<L, G, D>(images: &[ImageItems<L, G, D>]) -> Vec<ScoredPair> {
    images
        .iter()
        .flat_map(|img| img.detections.iter().map(DetectionItem::scored_pair))
        .collect()
}

/// Pair per-image ground-truth and detection collections gathered separately.
///
/// # Errors
///
/// Returns [`EvalError::ConsistencyError`] if the three collections differ in length.
pub fn zip_images<L, G, D>(
    names: Vec<String>,
    ground_truth: Vec<Vec<GroundTruthItem<L, G>>>,
    detections: Vec<Vec<DetectionItem<L, D>>>,
) -> Result<Vec<ImageItems<L, G, D>>> {
    if names.len() != ground_truth.len() || ground_truth.len() != detections.len() {
        return Err(EvalError::ConsistencyError(format!(
            "{} images, {} ground-truth lists and {} detection lists",
            names.len(),
            ground_truth.len(),
            detections.len()
        )));
    }

    Ok(names
        .into_iter()
        .zip(ground_truth)
        .zip(detections)
        .map(|((name, gt), dt)| ImageItems::new(name, gt, dt))
        .collect())
}

fn prefilter<L, D, M>(
    detections: Vec<DetectionItem<L, D>>,
    config: &EvalConfig,
    metric: &M,
    stats: &mut IngestStats,
) -> Result<Vec<DetectionItem<L, D>>>
where
    L: PartialEq,
    M: OverlapMetric + ?Sized,
{
    stats.detections_read += detections.len();

    let mut detections = detections;
    if let Some(min_confidence) = config.min_confidence {
        let before = detections.len();
        detections = filter_by_confidence(detections, min_confidence)?;
        stats.dropped_low_confidence += before - detections.len();
    }

    if config.apply_nms {
        let before = detections.len();
        detections = suppress_overlapping(detections, metric, config.nms_thr, config.nms_per_label)?;
        stats.suppressed_by_nms += before - detections.len();
    }

    Ok(detections)
}

fn evaluate_image<L, G, D, M>(
    image: ImageItems<L, G, D>,
    config: &EvalConfig,
    metric: &M,
) -> Result<(ImageItems<L, G, D>, IngestStats)>
where
    L: PartialEq,
    M: OverlapMetric + ?Sized,
{
    let ImageItems {
        name,
        mut ground_truth,
        detections,
    } = image;

    let mut stats = IngestStats {
        images: 1,
        ..IngestStats::default()
    };
    let mut detections = prefilter(detections, config, metric, &mut stats)?;
    let matched = match_detections(&mut ground_truth, &mut detections, metric, config.overlap_thr)?;

    debug!(
        image = %name,
        ground_truth = ground_truth.len(),
        detections = detections.len(),
        matched,
        "matched image"
    );

    Ok((ImageItems::new(name, ground_truth, detections), stats))
}

/// Evaluate detections against ground truth over a set of images.
///
/// Each image is pre-filtered (confidence filter, then NMS, as configured)
/// and matched independently; with `config.parallel` images are matched on
/// the rayon pool. The outcome does not depend on the thread count: results
/// keep input image order. The curve is then built once over all detections.
///
/// # Errors
///
/// Fails with [`EvalError::InvalidThreshold`] for out-of-range thresholds
/// and [`EvalError::InvalidInput`] when no image has ground truth.
///
/// # Example
///
/// ```
/// use text_det_eval::config::EvalConfig;
/// use text_det_eval::evaluator::{evaluate_images, ImageItems};
/// use text_det_eval::metrics::overlap::Iou;
/// use text_det_eval::types::{BoundingBox, DetectionItem, GroundTruthItem};
///
/// let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
/// let image = ImageItems::new(
///     "img_1",
///     vec![GroundTruthItem::new("cat", bbox)],
///     vec![DetectionItem::new("cat", bbox, 0.9), DetectionItem::new("cat", bbox, 0.5)],
/// );
///
/// let evaluation = evaluate_images(vec![image], &EvalConfig::default(), &Iou).unwrap();
/// assert_eq!(evaluation.curve.precision, vec![1.0, 0.5]);
/// assert_eq!(evaluation.curve.recall, vec![1.0, 1.0]);
/// ```
pub fn evaluate_images<L, G, D, M>(
    images: Vec<ImageItems<L, G, D>>,
    config: &EvalConfig,
    metric: &M,
) -> Result<Evaluation<L, G, D>>
where
    L: PartialEq + Send,
    G: Send,
    D: Send,
    M: OverlapMetric + Sync + ?Sized,
{
    config.validate()?;

    let results: Vec<(ImageItems<L, G, D>, IngestStats)> = if config.parallel {
        images
            .into_par_iter()
            .map(|image| evaluate_image(image, config, metric))
            .collect::<Result<_>>()?
    } else {
        images
            .into_iter()
            .map(|image| evaluate_image(image, config, metric))
            .collect::<Result<_>>()?
    };

    let mut stats = IngestStats::new();
    let mut matched_images = Vec::with_capacity(results.len());
    for (image, image_stats) in results {
        stats += image_stats;
        matched_images.push(image);
    }

    let total_ground_truth: usize = matched_images.iter().map(|img| img.ground_truth.len()).sum();
    let scored_pairs = collect_scored_pairs(&matched_images);
    let curve = build_curve(&scored_pairs, total_ground_truth)?;

    let evaluation = Evaluation {
        images: matched_images,
        curve,
        stats,
    };

    info!(
        images = evaluation.images.len(),
        ground_truth = total_ground_truth,
        detections = scored_pairs.len(),
        matched = evaluation.total_matched(),
        "evaluation complete"
    );

    Ok(evaluation)
}

fn load_images<L, D, F, P>(
    gt_dir: &Path,
    dt_dir: &Path,
    gt_extension: &str,
    dt_extension: &str,
    label: F,
    parse_detections: P,
    stats: &mut IngestStats,
) -> Result<Vec<ImageItems<L, (), D>>>
where
    F: Fn(&str) -> Result<Option<L>>,
    P: Fn(&str) -> Result<Vec<DetectionItem<L, D>>>,
{
    let mut names = Vec::new();
    let mut gt_results = Vec::new();
    let mut dt_results = Vec::new();

    for gt_path in list_ground_truth_files(gt_dir, gt_extension)? {
        let gt_list = read_ground_truth(&gt_path, &label, stats)?;
        let dt_list = parse_detections(&read_detection_file(&detection_path(dt_dir, &gt_path, dt_extension))?)?;

        let name = gt_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        names.push(name);
        gt_results.push(gt_list);
        dt_results.push(dt_list);
    }

    zip_images(names, gt_results, dt_results)
}

/// Evaluate a word detector from label files and detector output on disk.
///
/// `rescorer`, when given, replaces each detection's confidence before any
/// pre-filtering or matching.
pub fn evaluate_word_detection(
    gt_dir: &Path,
    dt_dir: &Path,
    config: &EvalConfig,
    rescorer: Option<&dyn Rescorer<String, Option<String>>>,
) -> Result<Evaluation<String, (), Option<String>>> {
    config.validate()?;

    let mut stats = IngestStats::new();
    let mut images = load_images(
        gt_dir,
        dt_dir,
        &config.gt_extension,
        &config.word_extension,
        word_label,
        parse_word_detections,
        &mut stats,
    )?;

    if let Some(rescorer) = rescorer {
        for image in &mut images {
            apply_rescorer(&mut image.detections, rescorer);
        }
    }

    let mut evaluation = evaluate_images(images, config, &Iou)?;
    evaluation.stats += stats;
    Ok(evaluation)
}

/// Evaluate a character detector from label files and detector output on disk.
///
/// Ground-truth characters and detector class indices are both labels in
/// `vocabulary`.
pub fn evaluate_character_detection(
    gt_dir: &Path,
    dt_dir: &Path,
    vocabulary: &Vocabulary,
    config: &EvalConfig,
) -> Result<Evaluation<usize>> {
    config.validate()?;

    let mut stats = IngestStats::new();
    let images = load_images(
        gt_dir,
        dt_dir,
        &config.gt_extension,
        &config.char_extension,
        |raw: &str| char_label(vocabulary, raw),
        |json: &str| parse_char_detections(json, vocabulary),
        &mut stats,
    )?;

    let mut evaluation = evaluate_images(images, config, &Iou)?;
    evaluation.stats += stats;
    Ok(evaluation)
}
