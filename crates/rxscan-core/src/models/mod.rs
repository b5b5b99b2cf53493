//! Domain models for the rxscan extraction pipeline.

mod classification;
mod record;

pub use classification::*;
pub use record::*;
