//! Statistics tracked while reading and pre-filtering evaluation input
//!
//! Counts what was read, what was skipped and why, so a run can report how
//! much of its input actually reached the matcher.

use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Counters collected during ingestion and pre-filtering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestStats {
    /// Number of images (ground-truth files) processed
    pub images: usize,

    /// Ground-truth lines read, comments included
    pub ground_truth_lines: usize,

    /// Lines skipped because they start with `%`
    pub comment_lines: usize,

    /// Ground-truth objects skipped because their label is not usable
    pub skipped_invalid_labels: usize,

    /// Detector records read
    pub detections_read: usize,

    /// Detections dropped by the minimum confidence filter
    pub dropped_low_confidence: usize,

    /// Detections removed by non-maximum suppression
    pub suppressed_by_nms: usize,
}

impl IngestStats {
    /// Create a new `IngestStats` with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Ground-truth objects that reached the matcher
    pub fn ground_truth_kept(&self) -> usize {
        self.ground_truth_lines
            .saturating_sub(self.comment_lines)
            .saturating_sub(self.skipped_invalid_labels)
    }

    /// Detections that reached the matcher
    pub fn detections_kept(&self) -> usize {
        self.detections_read
            .saturating_sub(self.dropped_low_confidence)
            .saturating_sub(self.suppressed_by_nms)
    }

    /// Get a formatted string summary of the statistics
    pub fn summary_string(&self) -> String {
        format!(
            "IngestStats {{ images: {}, ground_truth: {}/{}, detections: {}/{}, invalid_labels: {}, low_confidence: {}, nms: {} }}",
            self.images,
            self.ground_truth_kept(),
            self.ground_truth_lines,
            self.detections_kept(),
            self.detections_read,
            self.skipped_invalid_labels,
            self.dropped_low_confidence,
            self.suppressed_by_nms
        )
    }
}

impl AddAssign for IngestStats {
    fn add_assign(&mut self, other: Self) {
        self.images += other.images;
        self.ground_truth_lines += other.ground_truth_lines;
        self.comment_lines += other.comment_lines;
        self.skipped_invalid_labels += other.skipped_invalid_labels;
        self.detections_read += other.detections_read;
        self.dropped_low_confidence += other.dropped_low_confidence;
        self.suppressed_by_nms += other.suppressed_by_nms;
    }
}
