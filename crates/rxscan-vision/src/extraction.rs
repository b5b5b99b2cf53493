//! Medication record extraction from vision-model output.

use rxscan_core::models::{Form, MedicationRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Vision parsing errors.
#[derive(Error, Debug)]
pub enum VisionError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    #[error("Vision service error: {0}")]
    Service(String),
}

pub type VisionResult<T> = Result<T, VisionError>;

/// One record as the vision model emits it. Every field is optional in
/// practice; missing ones default to empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub form: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub strength: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub raw_line: String,
}

impl From<RawRecord> for MedicationRecord {
    fn from(raw: RawRecord) -> Self {
        MedicationRecord {
            form: Form::from_label(&raw.form),
            name: raw.name,
            strength: raw.strength,
            frequency: raw.frequency,
            raw_line: raw.raw_line,
        }
    }
}

/// Parse a vision-model response into medication records.
///
/// Models wrap their answer in prose, so the JSON array is located by
/// delimiter search rather than parsing the whole response.
pub fn parse_vision_output(response: &str) -> VisionResult<Vec<MedicationRecord>> {
    let start = response
        .find('[')
        .ok_or_else(|| VisionError::InvalidFormat("no JSON array found in response".into()))?;
    let end = response
        .rfind(']')
        .ok_or_else(|| VisionError::InvalidFormat("no closing bracket found in response".into()))?;
    if end < start {
        return Err(VisionError::InvalidFormat(
            "mismatched array delimiters in response".into(),
        ));
    }

    let raw: Vec<RawRecord> = serde_json::from_str(&response[start..=end])?;
    Ok(raw.into_iter().map(MedicationRecord::from).collect())
}

/// Collapse any vision failure to zero records.
///
/// The extraction controller must treat an unreachable or misbehaving vision
/// service identically to "returned nothing" and fall back to the rule-based
/// path; this is the boundary where that happens.
pub fn records_or_empty(result: VisionResult<Vec<MedicationRecord>>) -> Vec<MedicationRecord> {
    match result {
        Ok(records) => records,
        Err(err) => {
            warn!(error = %err, "vision extraction failed, falling back to empty");
            Vec::new()
        }
    }
}
