//! Terminal medicine-name cleanup.
//!
//! Applied once per record after the merge completes, never during it: the
//! merge stage cuts names at frequency-match offsets computed on the raw
//! line, and rewriting the text earlier would invalidate those offsets.
//!
//! The form-word removals are plain substring deletions, not word-boundary
//! matches. That is deliberately lossy ("capsaicin" loses its "cap") and kept
//! for compatibility with the data already produced this way.

use std::sync::LazyLock;

use regex::Regex;

/// Form words and OCR artifacts deleted from names, in removal order.
/// "noor" is a recurring misrecognition of a stamp on scanned prescriptions.
/// Order matters: "tablet" before "tab" so the longer word is not shredded
/// into "let" first.
const FORM_WORDS: [&str; 11] = [
    "tablet",
    "tab",
    "tabs",
    "capsule",
    "cap",
    "caps",
    "inhaler",
    "syrup",
    "noor",
    "tablet(s)",
    "tab(s)",
];

/// Review-count artifact, e.g. "= 3".
static REVIEW_COUNT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"=\s*\d+\b").unwrap());

/// Duration tail, e.g. "5 days".
static DAYS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d+\s*days?\b").unwrap());

/// Dose schedule that escaped the merge stage.
static SCHEDULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d-\d-\d(?:-\d)?\b").unwrap());

/// Lone single digits left over from broken schedule codes and counts.
/// Multi-digit runs stay: a unit-less "625" after "moxclav" is the dose
/// number, not noise.
static LONE_DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d\b").unwrap());

static NON_ALNUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9+ ]").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalize a noisy medicine name to lower-case, cleaned form.
///
/// The result may legitimately be empty when the input carried no salvageable
/// name tokens; callers treat that as a valid low-value output, not an error.
/// Idempotent: a second application returns the same string.
pub fn normalize(name: &str) -> String {
    // A substring deletion can splice a new removable token together
    // ("tatabb" -> "tab"), so repeat the pass until the text settles. After
    // the first pass the text is ASCII [a-z0-9+ ] and every further change
    // shrinks it, so this terminates.
    let mut current = normalize_once(name);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_once(name: &str) -> String {
    let mut text = name.to_lowercase();

    for word in FORM_WORDS {
        text = text.replace(word, "");
    }

    let text = REVIEW_COUNT_RE.replace_all(&text, " ");
    let text = DAYS_RE.replace_all(&text, " ");
    let text = SCHEDULE_RE.replace_all(&text, " ");
    let text = LONE_DIGIT_RE.replace_all(&text, " ");
    let text = NON_ALNUM_RE.replace_all(&text, " ");
    let text = WHITESPACE_RE.replace_all(&text, " ");

    text.trim().to_string()
}
