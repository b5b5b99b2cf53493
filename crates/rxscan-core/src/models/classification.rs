//! Intermediate classification of a single OCR line.

use super::Form;

/// A frequency code match together with its byte offset in the line.
///
/// The offset is captured at match time so the merge stage can cut the name
/// portion of the line without re-running the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyMatch {
    /// Matched schedule code, e.g. "1-0-0-1"
    pub code: String,
    /// Byte offset of the match start within the classified line
    pub start: usize,
}

/// Result of examining one trimmed OCR line.
///
/// The variant is derived from which of (form, strength) is present; a
/// frequency code is supplementary and never changes the variant on its own
/// unless it is the only token found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClassification {
    /// Administrative text or a line with nothing actionable
    Noise,
    /// Line carries a form keyword, possibly with strength and frequency
    FormLine {
        form: Form,
        strength: Option<String>,
        frequency: Option<FrequencyMatch>,
    },
    /// Line carries a strength but no form keyword
    StrengthLine {
        strength: String,
        frequency: Option<FrequencyMatch>,
    },
    /// Line carries only a frequency code
    FrequencyLine { frequency: FrequencyMatch },
}

impl LineClassification {
    /// Whether this line is discarded outright.
    pub fn is_noise(&self) -> bool {
        matches!(self, LineClassification::Noise)
    }
}
