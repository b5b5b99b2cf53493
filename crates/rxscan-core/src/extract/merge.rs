//! Stateful merge of classified lines into medication records.
//!
//! OCR splits one prescription entry across several physical lines: the name
//! on one line, composition/strength on the next, the dosing schedule below
//! that. The merger keeps a single cursor (the most recently started record)
//! and folds continuation lines into it; a line is only allowed to start a
//! new record when the cursor cannot absorb it.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Form, FrequencyMatch, LineClassification, MedicationRecord};

use super::classifier::classify;

/// OCR artifacts stripped during the light (pre-merge) name cleanup.
static STRAY_SYMBOLS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[=*@#|]+").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Accumulator for the line-by-line merge.
///
/// The cursor is always the last record pushed: a record stops receiving
/// updates the moment a newer one is started, and nothing reopens it.
#[derive(Debug, Default)]
pub struct Merger {
    records: Vec<MedicationRecord>,
}

impl Merger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one classified line into the accumulated records.
    ///
    /// `line` must be the same trimmed text the classification was produced
    /// from; frequency offsets are byte positions into it.
    pub fn push(&mut self, line: &str, classification: LineClassification) {
        match classification {
            LineClassification::Noise => {}
            LineClassification::FrequencyLine { frequency } => {
                if let Some(open) = self.records.last_mut() {
                    if open.frequency.is_empty() {
                        // Continuation: schedule printed on its own line
                        // below the medicine it belongs to.
                        open.frequency = frequency.code;
                        open.raw_line.push(' ');
                        open.raw_line.push_str(line);
                        return;
                    }
                }
                self.start(line, Form::Unknown, None, Some(frequency));
            }
            LineClassification::StrengthLine {
                strength,
                frequency,
            } => {
                if let Some(open) = self.records.last_mut() {
                    if open.strength.is_empty() {
                        // Composition line (e.g. the generic under a brand
                        // name); " / " marks it apart from plain
                        // continuations in the audit text.
                        open.strength = strength;
                        open.raw_line.push_str(" / ");
                        open.raw_line.push_str(line);
                        return;
                    }
                }
                self.start(line, Form::Unknown, Some(strength), frequency);
            }
            LineClassification::FormLine {
                form,
                strength,
                frequency,
            } => {
                self.start(line, form, strength, frequency);
            }
        }
    }

    /// Finish the fold. The last open record needs no explicit close; it is
    /// simply included.
    pub fn into_records(self) -> Vec<MedicationRecord> {
        self.records
    }

    fn start(
        &mut self,
        line: &str,
        form: Form,
        strength: Option<String>,
        frequency: Option<FrequencyMatch>,
    ) {
        // Name = everything before the schedule code, or the whole line.
        let name_source = match &frequency {
            Some(m) => line[..m.start].trim_end(),
            None => line,
        };
        self.records.push(MedicationRecord {
            form,
            name: light_cleanup(name_source),
            strength: strength.unwrap_or_default(),
            frequency: frequency.map(|m| m.code).unwrap_or_default(),
            raw_line: line.to_string(),
        });
    }
}

/// Merge a sequence of raw lines, in order, into medication records.
///
/// Lines are trimmed and classified here; blank lines are skipped. Record
/// names carry only the light cleanup — run [`super::normalize`] over them
/// afterwards for the terminal pass.
pub fn merge<'a, I>(lines: I) -> Vec<MedicationRecord>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut merger = Merger::new();
    for raw in lines {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        merger.push(line, classify(line));
    }
    merger.into_records()
}

/// Readable-name cleanup applied when a record is started: strip OCR symbol
/// runs, collapse whitespace, title-case. Lighter than the terminal
/// normalization pass, which would disturb the frequency offsets if applied
/// here.
fn light_cleanup(text: &str) -> String {
    let text = STRAY_SYMBOLS_RE.replace_all(text, " ");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    title_case(text.trim())
}

/// Title-case in the same way Python's `str.title` does: a letter is
/// uppercased when it follows a non-letter, lowercased otherwise.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_was_letter = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_was_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_was_letter = true;
        } else {
            out.push(ch);
            prev_was_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_single_form_line() {
        let records = merge(["MOXCLAV 625 TABLET"]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].form, Form::Tablet);
        assert_eq!(records[0].name, "Moxclav 625 Tablet");
        assert_eq!(records[0].strength, "");
        assert_eq!(records[0].frequency, "");
        assert_eq!(records[0].raw_line, "MOXCLAV 625 TABLET");
    }

    #[test]
    fn test_merge_attaches_frequency_continuation() {
        let records = merge(["Montek LC Tablet", "1-0-0-0"]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].form, Form::Tablet);
        assert_eq!(records[0].frequency, "1-0-0-0");
        assert_eq!(records[0].raw_line, "Montek LC Tablet 1-0-0-0");
    }

    #[test]
    fn test_merge_attaches_composition_line() {
        let records = merge(["Salbair Transhaler Inhaler", "Levosalbutamol 50mcg"]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].form, Form::Inhaler);
        assert_eq!(records[0].strength, "50mcg");
        assert_eq!(
            records[0].raw_line,
            "Salbair Transhaler Inhaler / Levosalbutamol 50mcg"
        );
    }

    #[test]
    fn test_merge_first_writer_wins_on_frequency() {
        let records = merge(["Montek LC Tablet 1-0-0-1", "0-1-0-0"]);
        // The cursor's frequency is already set; the second schedule line
        // cannot attach and starts a (nameless) record of its own.
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].frequency, "1-0-0-1");
        assert_eq!(records[1].frequency, "0-1-0-0");
        assert_eq!(records[1].name, "");
        assert_eq!(records[1].raw_line, "0-1-0-0");
    }

    #[test]
    fn test_merge_first_writer_wins_on_strength() {
        let records = merge(["Augmentin 625mg Tablet", "Amoxicillin 500mg"]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].strength, "625mg");
        assert_eq!(records[1].strength, "500mg");
    }

    #[test]
    fn test_merge_preserves_input_order() {
        let records = merge([
            "Tab Dolo 650mg",
            "Cap Omez 20mg",
            "Syr Ambrodil 5ml",
        ]);
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            ["Tab Dolo 650Mg", "Cap Omez 20Mg", "Syr Ambrodil 5Ml"]
        );
    }

    #[test]
    fn test_merge_noise_lines_do_not_mutate_cursor() {
        let records = merge([
            "Montek LC Tablet",
            "For appointment call 9876543210",
            "1-0-0-0",
        ]);
        // Noise in between must not close the record or eat the schedule.
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].frequency, "1-0-0-0");
    }

    #[test]
    fn test_merge_frequency_with_no_open_record_starts_one() {
        let records = merge(["1-0-0-1"]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].frequency, "1-0-0-1");
        assert_eq!(records[0].name, "");
        assert_eq!(records[0].raw_line, "1-0-0-1");
    }

    #[test]
    fn test_merge_name_is_cut_at_frequency() {
        let records = merge(["MAXITHRAL 500 TABLET 1-0-0-0 = 3"]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].frequency, "1-0-0-0");
        // Everything from the schedule onwards, "= 3" included, is cut away.
        assert_eq!(records[0].name, "Maxithral 500 Tablet");
    }

    #[test]
    fn test_merge_light_cleanup_strips_symbols() {
        let records = merge(["MONTEK  LC **TABLET@"]);
        assert_eq!(records[0].name, "Montek Lc Tablet");
    }

    #[test]
    fn test_merge_empty_input() {
        let no_lines: [&str; 0] = [];
        assert!(merge(no_lines).is_empty());
        assert!(merge(["", "   "]).is_empty());
    }

    #[test]
    fn test_title_case_matches_python_title() {
        assert_eq!(title_case("montek lc"), "Montek Lc");
        assert_eq!(title_case("moxclav625tab"), "Moxclav625Tab");
        assert_eq!(title_case("1-0-0-1"), "1-0-0-1");
    }
}
