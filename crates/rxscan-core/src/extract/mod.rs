//! Extraction pipeline: classify → merge → normalize, behind a vision-first
//! controller.
//!
//! The vision extractor (when configured) sees the prescription image and
//! returns structured records directly; the rule-based path over raw OCR text
//! is strictly a fallback. The two are never reconciled.

mod classifier;
mod merge;
mod normalizer;

pub use classifier::classify;
pub use merge::{merge, Merger};
pub use normalizer::normalize;

use tracing::debug;

use crate::models::MedicationRecord;

/// Extract medication records from OCR text, preferring vision output.
///
/// When `vision_records` is non-empty it is returned unchanged regardless of
/// `raw_text`. Otherwise the rule-based path runs. Empty text and empty
/// vision output yield an empty list, never an error.
pub fn extract(raw_text: &str, vision_records: Vec<MedicationRecord>) -> Vec<MedicationRecord> {
    if !vision_records.is_empty() {
        debug!(count = vision_records.len(), "using vision-supplied records");
        return vision_records;
    }
    extract_from_text(raw_text)
}

/// Rule-based extraction over raw OCR text.
///
/// Splits into trimmed non-empty lines, classifies and merges them in order,
/// then runs the terminal name normalization over every record.
pub fn extract_from_text(raw_text: &str) -> Vec<MedicationRecord> {
    let lines = raw_text.lines().map(str::trim).filter(|line| !line.is_empty());
    let mut records = merge(lines);
    for record in &mut records {
        record.name = normalize(&record.name);
    }
    debug!(count = records.len(), "rule-based extraction finished");
    records
}
