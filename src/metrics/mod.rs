//! Overlap, curve building and curve summaries.

pub mod overlap;
pub mod precision_recall;
pub mod ap;
pub mod f_score;

pub use overlap::{calculate_iou, overlap_matrix, Iou, OverlapMetric};
pub use precision_recall::{build_curve, interpolate_precision};
pub use ap::{average_precision, calculate_ap};
pub use f_score::{best_operating_point, f_score, precision_at_recall};
