//! Core data types shared by the matcher, the curve builder and the adapters.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in image pixel coordinates.
///
/// Stored as (row origin, column origin, height, width):
/// - row: Top coordinate
/// - col: Left coordinate
/// - height: Box height
/// - width: Box width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub row: f64,
    pub col: f64,
    pub height: f64,
    pub width: f64,
}

impl BoundingBox {
    /// Create a new bounding box from (row, col, height, width).
    pub fn new(row: f64, col: f64, height: f64, width: f64) -> Self {
        Self { row, col, height, width }
    }

    /// Create a bounding box from label-file order (x, y, width, height).
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(y, x, height, width)
    }

    /// Create a bounding box from a `[row, col, height, width]` array.
    pub fn from_array(values: [f64; 4]) -> Self {
        Self::new(values[0], values[1], values[2], values[3])
    }

    /// The box as `[row, col, height, width]`.
    pub fn as_array(&self) -> [f64; 4] {
        [self.row, self.col, self.height, self.width]
    }

    /// Get the area of the bounding box.
    pub fn area(&self) -> f64 {
        self.height * self.width
    }

    /// Get the bottom coordinate (row + height).
    pub fn bottom(&self) -> f64 {
        self.row + self.height
    }

    /// Get the right coordinate (col + width).
    pub fn right(&self) -> f64 {
        self.col + self.width
    }

    /// Check if the bounding box is valid (finite, positive dimensions).
    pub fn is_valid(&self) -> bool {
        self.as_array().iter().all(|v| v.is_finite()) && self.height > 0.0 && self.width > 0.0
    }
}

/// A hand-labeled object in one image.
///
/// `payload` is carried through matching untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTruthItem<L, P = ()> {
    pub label: L,
    pub matched: bool,
    pub bbox: BoundingBox,
    pub payload: P,
}

impl<L> GroundTruthItem<L> {
    /// Create an unmatched ground-truth item without payload.
    pub fn new(label: L, bbox: BoundingBox) -> Self {
        Self::with_payload(label, bbox, ())
    }
}

impl<L, P> GroundTruthItem<L, P> {
    /// Create an unmatched ground-truth item carrying `payload`.
    pub fn with_payload(label: L, bbox: BoundingBox, payload: P) -> Self {
        Self {
            label,
            matched: false,
            bbox,
            payload,
        }
    }
}

/// A detector-produced candidate in one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionItem<L, P = ()> {
    pub label: L,
    pub matched: bool,
    pub bbox: BoundingBox,
    pub confidence: f64,
    pub payload: P,
}

impl<L> DetectionItem<L> {
    /// Create an unmatched detection without payload.
    pub fn new(label: L, bbox: BoundingBox, confidence: f64) -> Self {
        Self::with_payload(label, bbox, confidence, ())
    }
}

impl<L, P> DetectionItem<L, P> {
    /// Create an unmatched detection carrying `payload`.
    pub fn with_payload(label: L, bbox: BoundingBox, confidence: f64, payload: P) -> Self {
        Self {
            label,
            matched: false,
            bbox,
            confidence,
            payload,
        }
    }

    /// The (confidence, matched) pair used by the curve builder.
    pub fn scored_pair(&self) -> ScoredPair {
        ScoredPair {
            confidence: self.confidence,
            matched: self.matched,
        }
    }
}

/// Ground truth for word detection.
pub type WordGroundTruth = GroundTruthItem<String>;

/// Word detection; the payload is the detector's trailing word field, if any.
pub type WordDetection = DetectionItem<String, Option<String>>;

/// Ground truth for character detection; the label is a vocabulary index.
pub type CharGroundTruth = GroundTruthItem<usize>;

/// Character detection; the label is a vocabulary index.
pub type CharDetection = DetectionItem<usize>;

/// Confidence and match flag of one detection after matching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredPair {
    pub confidence: f64,
    pub matched: bool,
}

impl ScoredPair {
    pub fn new(confidence: f64, matched: bool) -> Self {
        Self { confidence, matched }
    }
}

/// Precision-Recall curve point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrecisionRecallPoint {
    pub precision: f64,
    pub recall: f64,
    pub threshold: f64,
}

/// Precision and recall at every detection, ordered by descending confidence.
///
/// The three vectors always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrecisionRecallCurve {
    pub precision: Vec<f64>,
    pub recall: Vec<f64>,
    pub thresholds: Vec<f64>,
}

impl PrecisionRecallCurve {
    /// Number of operating points.
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    /// Operating points in curve order.
    pub fn points(&self) -> Vec<PrecisionRecallPoint> {
        self.precision
            .iter()
            .zip(&self.recall)
            .zip(&self.thresholds)
            .map(|((&precision, &recall), &threshold)| PrecisionRecallPoint {
                precision,
                recall,
                threshold,
            })
            .collect()
    }

    /// Recall reached once every detection is accepted (0.0 for an empty curve).
    pub fn final_recall(&self) -> f64 {
        self.recall.last().copied().unwrap_or(0.0)
    }

    /// Precision once every detection is accepted (0.0 for an empty curve).
    pub fn final_precision(&self) -> f64 {
        self.precision.last().copied().unwrap_or(0.0)
    }
}
