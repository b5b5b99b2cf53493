//! Medication record model.

use serde::{Deserialize, Serialize};

/// Storage limit for the form label.
pub const FORM_MAX_LEN: usize = 40;
/// Storage limit for the normalized name.
pub const NAME_MAX_LEN: usize = 120;
/// Storage limit for the strength string.
pub const STRENGTH_MAX_LEN: usize = 60;
/// Storage limit for the frequency code.
pub const FREQUENCY_MAX_LEN: usize = 60;
/// Storage limit for the raw source line.
pub const RAW_LINE_MAX_LEN: usize = 255;

/// Dosage form of a medication.
///
/// `Other` carries the title-cased literal of a form keyword that matched the
/// line patterns but has no dedicated variant, so a recognized keyword is
/// never dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Form {
    Tablet,
    Capsule,
    Syrup,
    Injection,
    Inhaler,
    Drops,
    Other(String),
    #[default]
    Unknown,
}

impl Form {
    /// Canonicalize a matched form keyword (e.g. "Tab", "capsule", "INJ").
    ///
    /// Prefix rules mirror the abbreviations that appear on printed
    /// prescriptions; anything else falls back to a title-cased literal.
    pub fn from_keyword(keyword: &str) -> Self {
        let lower = keyword.to_lowercase();
        if lower.starts_with("tab") {
            Form::Tablet
        } else if lower.starts_with("cap") {
            Form::Capsule
        } else if lower.starts_with("syr") {
            Form::Syrup
        } else if lower.starts_with("inj") {
            Form::Injection
        } else if lower.contains("inhaler") {
            Form::Inhaler
        } else {
            Self::from_label(&title_case_word(&lower))
        }
    }

    /// Parse a stored or externally supplied form label.
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "tab" | "tabs" | "tablet" | "tablets" => Form::Tablet,
            "cap" | "caps" | "capsule" | "capsules" => Form::Capsule,
            "syr" | "syrup" => Form::Syrup,
            "inj" | "injection" => Form::Injection,
            "inhaler" => Form::Inhaler,
            "drop" | "drops" => Form::Drops,
            "" => Form::Unknown,
            _ => Form::Other(label.to_string()),
        }
    }

    /// The stored string label for this form.
    pub fn label(&self) -> &str {
        match self {
            Form::Tablet => "Tablet",
            Form::Capsule => "Capsule",
            Form::Syrup => "Syrup",
            Form::Injection => "Injection",
            Form::Inhaler => "Inhaler",
            Form::Drops => "Drops",
            Form::Other(label) => label,
            Form::Unknown => "",
        }
    }
}

impl From<String> for Form {
    fn from(label: String) -> Self {
        Form::from_label(&label)
    }
}

impl From<Form> for String {
    fn from(form: Form) -> Self {
        form.label().to_string()
    }
}

impl std::fmt::Display for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One extracted medication, the unit of pipeline output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationRecord {
    /// Dosage form, `Unknown` when no form keyword was seen
    #[serde(default)]
    pub form: Form,
    /// Medicine name; normalized lower-case after the terminal cleanup pass.
    /// May be empty when the source line carried only noise.
    #[serde(default)]
    pub name: String,
    /// Dose quantity + unit as matched (e.g. "500mg", "500mg + 125mg")
    #[serde(default)]
    pub strength: String,
    /// Dash-separated dosing schedule code (e.g. "1-0-0-1")
    #[serde(default)]
    pub frequency: String,
    /// Original source text; continuation lines are appended during merge
    #[serde(default)]
    pub raw_line: String,
}

impl MedicationRecord {
    /// Copy with every field clamped to its storage limit.
    ///
    /// The pipeline itself never truncates; persistence callers apply this
    /// right before writing.
    pub fn truncated(&self) -> Self {
        let form = match &self.form {
            Form::Other(label) => Form::Other(clamp(label, FORM_MAX_LEN)),
            other => other.clone(),
        };
        Self {
            form,
            name: clamp(&self.name, NAME_MAX_LEN),
            strength: clamp(&self.strength, STRENGTH_MAX_LEN),
            frequency: clamp(&self.frequency, FREQUENCY_MAX_LEN),
            raw_line: clamp(&self.raw_line, RAW_LINE_MAX_LEN),
        }
    }
}

fn clamp(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
