//! Vision-model response parsing for prescription extraction.
//!
//! The vision service receives the prescription image and replies with free
//! text that should contain a JSON array of medication records. This crate
//! turns that reply into `MedicationRecord`s and guarantees the caller a
//! non-throwing path: any failure collapses to zero records so the rule-based
//! fallback can take over.

pub mod extraction;
pub mod prompts;

pub use extraction::*;
pub use prompts::*;
