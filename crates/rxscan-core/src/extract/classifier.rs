//! Per-line classifier for OCR prescription text.
//!
//! Inspects one trimmed line and captures the tokens of interest: a dosage
//! form keyword, a strength (optionally compound, "500mg + 125mg"), and a
//! dash-joined frequency code. Administrative lines are rejected before any
//! token matching so a phone number is never misread as a dose.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Form, FrequencyMatch, LineClassification};

/// Administrative text that never describes a medicine, even when it carries
/// digits (dates, phone numbers, registration ids).
static NOISE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:appointment|review date|consultant|medical council|dispensing details|sign & seal|phone|call)\b",
    )
    .unwrap()
});

/// Dosage form keywords as printed on prescriptions, abbreviated or full.
static FORM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(tab(?:let)?|cap(?:sule)?|syr(?:up)?|inj(?:ection)?|inhaler|drops?)\b")
        .unwrap()
});

/// Strength: digits + unit, optionally a `+`-joined second dose for compound
/// formulations.
static STRENGTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d+\s*(?:mg|mcg|g|ml)\b(?:\s*\+\s*\d+\s*(?:mg|mcg|g|ml)\b)?").unwrap()
});

/// Dosing schedule: 2-4 dash-joined digit groups, longest alternative first.
static FREQUENCY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:\d+-\d+-\d+-\d+|\d+-\d+-\d+|\d+-\d+)\b").unwrap()
});

/// Classify one trimmed, non-empty OCR line.
///
/// Pure function of its input. All three token kinds present in the line are
/// captured; the variant is decided by form/strength presence alone.
pub fn classify(line: &str) -> LineClassification {
    if NOISE_RE.is_match(line) {
        return LineClassification::Noise;
    }

    let form = FORM_RE
        .captures(line)
        .map(|caps| Form::from_keyword(&caps[1]));
    let strength = STRENGTH_RE.find(line).map(|m| m.as_str().to_string());
    let frequency = FREQUENCY_RE.find(line).map(|m| FrequencyMatch {
        code: m.as_str().to_string(),
        start: m.start(),
    });

    match (form, strength) {
        (Some(form), strength) => LineClassification::FormLine {
            form,
            strength,
            frequency,
        },
        (None, Some(strength)) => LineClassification::StrengthLine {
            strength,
            frequency,
        },
        (None, None) => match frequency {
            Some(frequency) => LineClassification::FrequencyLine { frequency },
            None => LineClassification::Noise,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_form_line() {
        let cls = classify("MOXCLAV 625 TABLET");
        match cls {
            LineClassification::FormLine {
                form,
                strength,
                frequency,
            } => {
                assert_eq!(form, Form::Tablet);
                assert_eq!(strength, None); // "625" has no unit
                assert_eq!(frequency, None);
            }
            other => panic!("expected FormLine, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_form_with_strength_and_frequency() {
        let cls = classify("Tab Esomeprazole 20mg 1-0-0-1");
        match cls {
            LineClassification::FormLine {
                form,
                strength,
                frequency,
            } => {
                assert_eq!(form, Form::Tablet);
                assert_eq!(strength.as_deref(), Some("20mg"));
                let frequency = frequency.unwrap();
                assert_eq!(frequency.code, "1-0-0-1");
                assert_eq!(&"Tab Esomeprazole 20mg 1-0-0-1"[frequency.start..], "1-0-0-1");
            }
            other => panic!("expected FormLine, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_strength_only_line() {
        let cls = classify("Levosalbutamol 50mcg");
        assert_eq!(
            cls,
            LineClassification::StrengthLine {
                strength: "50mcg".to_string(),
                frequency: None,
            }
        );
    }

    #[test]
    fn test_classify_compound_strength() {
        let cls = classify("Amoxicillin 500mg + 125mg");
        match cls {
            LineClassification::StrengthLine { strength, .. } => {
                assert_eq!(strength, "500mg + 125mg");
            }
            other => panic!("expected StrengthLine, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_frequency_only_line() {
        let cls = classify("1-0-0-0");
        assert_eq!(
            cls,
            LineClassification::FrequencyLine {
                frequency: FrequencyMatch {
                    code: "1-0-0-0".to_string(),
                    start: 0,
                },
            }
        );
    }

    #[test]
    fn test_classify_noise_despite_digits() {
        // A phone number must never be read as a strength or frequency
        assert!(classify("For appointment call 9876543210").is_noise());
        assert!(classify("Review Date: 12-08-2026").is_noise());
        assert!(classify("Dispensing Details overleaf").is_noise());
        assert!(classify("Sign & Seal").is_noise());
    }

    #[test]
    fn test_classify_noise_keywords_are_word_bounded() {
        // "salbutamol" contains "tab" mid-word; must not classify as a form
        let cls = classify("Levosalbutamol solution");
        assert!(cls.is_noise());
        // "medically" contains "call" mid-word; must not trip the noise gate
        let cls = classify("Tab Medically 500mg");
        assert!(matches!(cls, LineClassification::FormLine { .. }));
    }

    #[test]
    fn test_classify_plain_text_is_noise() {
        assert!(classify("Dr A Sharma").is_noise());
        assert!(classify("take with food").is_noise());
    }

    #[test]
    fn test_classify_form_abbreviations() {
        for (line, expected) in [
            ("Tab Dolo", Form::Tablet),
            ("Cap Omez", Form::Capsule),
            ("Syr Ambrodil", Form::Syrup),
            ("Inj Monocef", Form::Injection),
            ("Salbair Inhaler", Form::Inhaler),
            ("Ciplox Eye Drops", Form::Drops),
        ] {
            match classify(line) {
                LineClassification::FormLine { form, .. } => assert_eq!(form, expected),
                other => panic!("{line:?}: expected FormLine, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_classify_frequency_three_slot() {
        let cls = classify("Montex 1-0-1");
        match cls {
            LineClassification::FrequencyLine { frequency } => {
                assert_eq!(frequency.code, "1-0-1");
            }
            other => panic!("expected FrequencyLine, got {other:?}"),
        }
    }
}
