//! Pronounce - pronunciation scoring for spoken sentence practice
//!
//! Scores a learner's spoken attempt against the sentence they were asked to say:
//! a character-level similarity percentage and a word-level alignment that marks
//! each recognized word correct or incorrect.

pub mod alignment;
pub mod config;
pub mod error;
pub mod ffi;
pub mod normalize;
pub mod report;
pub mod scorer;
pub mod similarity;
pub mod transcript;
pub mod types;

pub use error::{Error, Result};
pub use types::*;

// FFI entry points at the crate root for the C host
pub use ffi::*;

/// Re-export the main scoring components for convenience
pub use alignment::{AlignedPair, EditOp, align_words, compare_words};
pub use config::ScoringConfig;
pub use normalize::normalize;
pub use report::{PronunciationReport, ReportSummary, accuracy_level};
pub use scorer::Scorer;
pub use similarity::{levenshtein, similarity_percent};
pub use transcript::Transcript;
