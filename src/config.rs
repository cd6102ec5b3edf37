//! Evaluation settings.

use crate::error::{EvalError, Result};
use crate::threshold::validate_threshold;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Settings for one evaluation run. Every field has a default, so a JSON
/// config only needs to name the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Exclusive overlap threshold for a detection to claim a ground-truth item.
    pub overlap_thr: f64,
    /// Suppress overlapping detections before matching.
    pub apply_nms: bool,
    /// Overlap above which a lower-confidence detection is suppressed.
    pub nms_thr: f64,
    /// Only suppress detections that share a label.
    pub nms_per_label: bool,
    /// Match images on the rayon thread pool.
    pub parallel: bool,
    /// Drop detections below this confidence before matching.
    pub min_confidence: Option<f64>,
    pub gt_extension: String,
    pub word_extension: String,
    pub char_extension: String,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            overlap_thr: 0.5,
            apply_nms: false,
            nms_thr: 0.5,
            nms_per_label: true,
            parallel: true,
            min_confidence: None,
            gt_extension: "txt".to_string(),
            word_extension: "word".to_string(),
            char_extension: "char".to_string(),
        }
    }
}

impl EvalConfig {
    /// Load settings from a JSON file and validate them.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use text_det_eval::config::EvalConfig;
    ///
    /// let config = EvalConfig::from_file("eval.json").unwrap();
    /// println!("overlap threshold: {}", config.overlap_thr);
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse settings from a JSON string and validate them.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every threshold lies in [0.0, 1.0] and extensions are set.
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.overlap_thr)?;
        validate_threshold(self.nms_thr)?;
        if let Some(min_confidence) = self.min_confidence {
            validate_threshold(min_confidence)?;
        }

        for extension in [&self.gt_extension, &self.word_extension, &self.char_extension] {
            if extension.is_empty() {
                return Err(EvalError::InvalidInput(
                    "File extensions must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}
