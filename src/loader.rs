//! Reading ground-truth label files and detector output.
//!
//! Ground truth is one text file per image, one object per line:
//!
//! ```text
//! % comment lines start with a percent sign
//! HELLO 120 40 86 22
//! ```
//!
//! i.e. `label x y width height` with integer pixel coordinates. Detector
//! output is one JSON file per image, named after the ground-truth file
//! with the detection extension (`img_1.txt` pairs with `img_1.word`).

use crate::error::{EvalError, Result};
use crate::stats::IngestStats;
use crate::types::{BoundingBox, CharDetection, DetectionItem, GroundTruthItem, WordDetection};
use crate::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// One word detection as written by the word detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    /// `[row, col, height, width]`
    pub bbox: [f64; 4],
    pub score: f64,
    pub word: String,
    /// Trailing detector field, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

/// One character detection: `[row, col, height, width, score, class_index]`.
pub type CharRecord = [f64; 6];

/// Accept a word label made of ASCII letters and digits only.
pub fn word_label(raw: &str) -> Result<Option<String>> {
    let valid = !raw.is_empty() && raw.chars().all(|c| c.is_ascii_alphanumeric());
    Ok(valid.then(|| raw.to_string()))
}

/// Accept a single ASCII letter or digit and map it through `vocabulary`.
///
/// An alphanumeric symbol missing from the vocabulary is an error rather
/// than a skip, since it means the vocabulary does not fit the data.
pub fn char_label(vocabulary: &Vocabulary, raw: &str) -> Result<Option<usize>> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphanumeric() => vocabulary.require(c).map(Some),
        _ => Ok(None),
    }
}

/// Parse the contents of one ground-truth label file.
///
/// `label` turns the first field into a label, returning `Ok(None)` to skip
/// the object. `path` is only used in error messages.
///
/// # Errors
///
/// Returns [`EvalError::ParseError`] for an accepted label followed by fewer
/// than four integer coordinates.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use text_det_eval::loader::{parse_ground_truth, word_label};
/// use text_det_eval::stats::IngestStats;
///
/// let text = "% header\nHELLO 10 20 30 40\n";
/// let mut stats = IngestStats::new();
/// let items = parse_ground_truth(text, Path::new("img.txt"), word_label, &mut stats).unwrap();
/// assert_eq!(items.len(), 1);
/// assert_eq!(items[0].bbox.as_array(), [20.0, 10.0, 40.0, 30.0]);
/// assert_eq!(stats.comment_lines, 1);
/// ```
pub fn parse_ground_truth<L, F>(
    text: &str,
    path: &Path,
    label: F,
    stats: &mut IngestStats,
) -> Result<Vec<GroundTruthItem<L>>>
where
    F: Fn(&str) -> Result<Option<L>>,
{
    let mut items = Vec::new();

    for (line_idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        stats.ground_truth_lines += 1;

        if line.starts_with('%') {
            stats.comment_lines += 1;
            continue;
        }

        let mut parts = line.split_whitespace();
        let raw_label = parts.next().unwrap_or_default();
        let Some(parsed) = label(raw_label)? else {
            warn!(path = %path.display(), line = line_idx + 1, label = raw_label, "skipping ground truth with invalid label");
            stats.skipped_invalid_labels += 1;
            continue;
        };

        let mut coords = [0i64; 4];
        for (slot, name) in coords.iter_mut().zip(["x", "y", "width", "height"]) {
            let field = parts.next().ok_or_else(|| EvalError::ParseError {
                path: path.to_path_buf(),
                line: line_idx + 1,
                message: format!("missing {} coordinate", name),
            })?;
            *slot = field.parse().map_err(|_| EvalError::ParseError {
                path: path.to_path_buf(),
                line: line_idx + 1,
                message: format!("{} coordinate {:?} is not an integer", name, field),
            })?;
        }

        let [x, y, w, h] = coords;
        let bbox = BoundingBox::from_xywh(x as f64, y as f64, w as f64, h as f64);
        items.push(GroundTruthItem::new(parsed, bbox));
    }

    Ok(items)
}

/// Read and parse one ground-truth label file.
pub fn read_ground_truth<L, F>(path: &Path, label: F, stats: &mut IngestStats) -> Result<Vec<GroundTruthItem<L>>>
where
    F: Fn(&str) -> Result<Option<L>>,
{
    let text = fs::read_to_string(path)?;
    parse_ground_truth(&text, path, label, stats)
}

fn checked_bbox(values: [f64; 4]) -> Result<BoundingBox> {
    let bbox = BoundingBox::from_array(values);
    if values.iter().any(|v| !v.is_finite()) || bbox.height < 0.0 || bbox.width < 0.0 {
        return Err(EvalError::InvalidBoundingBox(format!(
            "{:?} must be finite with non-negative size",
            values
        )));
    }
    Ok(bbox)
}

/// Parse a word detector output file.
///
/// # Example
///
/// ```
/// use text_det_eval::loader::parse_word_detections;
///
/// let json = r#"[{"bbox": [20, 10, 40, 30], "score": 0.8, "word": "HELLO"}]"#;
/// let detections = parse_word_detections(json).unwrap();
/// assert_eq!(detections[0].label, "HELLO");
/// assert_eq!(detections[0].payload, None);
/// ```
pub fn parse_word_detections(json: &str) -> Result<Vec<WordDetection>> {
    let records: Vec<WordRecord> = serde_json::from_str(json)?;

    records
        .into_iter()
        .map(|record| {
            let bbox = checked_bbox(record.bbox)?;
            Ok(DetectionItem::with_payload(record.word, bbox, record.score, record.payload))
        })
        .collect()
}

/// Parse a character detector output file.
///
/// # Errors
///
/// Returns [`EvalError::InvalidLabel`] for a class index that is not a
/// whole number below the vocabulary size.
pub fn parse_char_detections(json: &str, vocabulary: &Vocabulary) -> Result<Vec<CharDetection>> {
    let records: Vec<CharRecord> = serde_json::from_str(json)?;

    records
        .into_iter()
        .map(|[row, col, height, width, score, class]| {
            let bbox = checked_bbox([row, col, height, width])?;
            if class < 0.0 || class.fract() != 0.0 || class >= vocabulary.len() as f64 {
                return Err(EvalError::InvalidLabel(format!(
                    "class index {} outside vocabulary of {} symbols",
                    class,
                    vocabulary.len()
                )));
            }
            Ok(DetectionItem::new(class as usize, bbox, score))
        })
        .collect()
}

/// Ground-truth files with `extension` in `dir`, sorted by file name.
pub fn list_ground_truth_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Path of the detector output paired with a ground-truth file.
pub fn detection_path(dt_dir: &Path, gt_path: &Path, extension: &str) -> PathBuf {
    let mut name = gt_path.file_stem().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(extension);
    dt_dir.join(name)
}

/// Read a detector output file, failing with [`EvalError::MissingDetections`] if absent.
pub fn read_detection_file(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(EvalError::MissingDetections(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}
