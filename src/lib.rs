//! # text-det-eval
//!
//! Scores word and character detectors against hand-labeled ground truth
//! and produces a precision-recall curve for comparing detector
//! configurations.
//!
//! The core is two steps:
//! - **Matching** ([`matching::match_detections`]): per image, detections are
//!   visited by descending confidence and each claims the first unmatched
//!   ground-truth item with an equal label whose overlap exceeds the
//!   threshold. Matching is one-to-one.
//! - **Curve building** ([`metrics::precision_recall::build_curve`]): the
//!   (confidence, matched) pairs of all images are sorted by descending
//!   confidence and turned into cumulative precision and recall.
//!
//! Around the core sit pluggable collaborators: label-file and detector
//! output readers ([`loader`]), rescoring ([`rescore`]), confidence
//! filtering ([`threshold`]) and non-maximum suppression ([`nms`]).
//! [`evaluator`] wires them together for word and character detection.
//!
//! ## Quick Start
//!
//! ```rust
//! use text_det_eval::{evaluate_images, BoundingBox, DetectionItem, EvalConfig, GroundTruthItem, ImageItems, Iou};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
//! let image = ImageItems::new(
//!     "img_1",
//!     vec![GroundTruthItem::new("cat".to_string(), bbox)],
//!     vec![DetectionItem::new("cat".to_string(), bbox, 0.9)],
//! );
//!
//! let evaluation = evaluate_images(vec![image], &EvalConfig::default(), &Iou)?;
//! println!("recall: {:.4}", evaluation.curve.final_recall());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod types;
pub mod vocabulary;
pub mod config;
pub mod stats;
pub mod loader;
pub mod threshold;
pub mod rescore;
pub mod nms;
pub mod metrics;
pub mod matching;
pub mod evaluator;

// Re-export commonly used types and functions
pub use error::{EvalError, Result};
pub use types::{
    BoundingBox, CharDetection, CharGroundTruth, DetectionItem, GroundTruthItem,
    PrecisionRecallCurve, PrecisionRecallPoint, ScoredPair, WordDetection, WordGroundTruth,
};
pub use config::EvalConfig;
pub use vocabulary::Vocabulary;
pub use matching::match_detections;
pub use metrics::{build_curve, Iou, OverlapMetric};
pub use evaluator::{
    evaluate_character_detection, evaluate_images, evaluate_word_detection, Evaluation, ImageItems,
};
