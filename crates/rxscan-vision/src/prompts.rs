//! Prompts for vision-based prescription extraction.

/// Instruction sent with the prescription image.
pub const EXTRACTION_PROMPT: &str = r#"You are reading a scanned medical prescription.

Extract every prescribed medicine as a JSON array. Each element must have:
- form: Dosage form (Tablet, Capsule, Syrup, Injection, Inhaler, Drops) or "" if unclear
- name: The medicine name as printed
- strength: Dose quantity with unit (e.g. "500mg", "500mg + 125mg") or ""
- frequency: Dash-separated schedule code (e.g. "1-0-0-1") or ""
- raw_line: The exact printed line the medicine was read from

Ignore doctor details, appointment notes, phone numbers, dates, and
signatures. Return only the JSON array."#;

/// Build the full prompt, optionally pinning the expected record count when
/// the caller already knows how many entries the prescription holds.
pub fn make_extraction_prompt(expected_count: Option<usize>) -> String {
    match expected_count {
        Some(count) => format!(
            "{EXTRACTION_PROMPT}\n\nThe prescription contains exactly {count} medicines."
        ),
        None => EXTRACTION_PROMPT.to_string(),
    }
}
