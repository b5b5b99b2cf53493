//! Rxscan Core Library
//!
//! Rule-based extraction of structured medication records from noisy,
//! OCR-derived prescription text.
//!
//! # Architecture
//!
//! ```text
//! Image → Vision extractor ──(records?)──────────────┐
//!                │                                   │
//!         (zero records / error)                     │
//!                │                                   ▼
//! OCR text → Line Classifier → Merge Engine → Name Normalizer → records
//!            (per line)        (cursor fold)  (terminal pass)
//! ```
//!
//! OCR output is irregular: one prescription entry is split across physical
//! lines, interleaved with administrative text, and corrupted by recognition
//! artifacts. The pipeline classifies each line, folds continuation lines
//! into the record they belong to, and finally scrubs the name field.
//!
//! Everything here is pure and synchronous; each [`extract()`] call is
//! independent, so concurrent extraction of unrelated prescriptions needs no
//! locking.
//!
//! # Modules
//!
//! - [`models`]: Domain types ([`MedicationRecord`], [`Form`],
//!   [`LineClassification`])
//! - [`extract`]: The pipeline (classifier, merge engine, normalizer,
//!   controller)

pub mod extract;
pub mod models;

// Re-export commonly used items
pub use extract::{classify, extract, extract_from_text, merge, normalize, Merger};
pub use models::{Form, FrequencyMatch, LineClassification, MedicationRecord};
