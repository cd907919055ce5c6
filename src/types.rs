//! Core types crossing the scoring boundary

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Unique identifier for reports
pub type ReportId = Uuid;

/// Deserialize a field that may be missing or `null` into its default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A word recognized by the speech-to-text provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscribedWord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub word: String,
    /// Provider confidence in `0..=1`, zero when not reported
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
}

impl TranscribedWord {
    pub fn new(word: impl Into<String>, confidence: f64) -> Self {
        Self {
            word: word.into(),
            confidence,
            start: None,
            end: None,
        }
    }

    /// Word with no confidence reported
    pub fn bare(word: impl Into<String>) -> Self {
        Self::new(word, 0.0)
    }

    pub fn with_timing(mut self, start: f64, end: f64) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Confidence with non-finite values mapped to zero
    pub fn confidence_or_zero(&self) -> f64 {
        if self.confidence.is_finite() {
            self.confidence
        } else {
            0.0
        }
    }
}

/// Per-word verdict returned to the caller, one per transcribed word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordComparisonResult {
    /// Word as transcribed, original casing
    pub word: String,
    pub is_correct: bool,
    pub confidence: f64,
}

impl WordComparisonResult {
    pub fn incorrect(word: &TranscribedWord) -> Self {
        Self {
            word: word.word.clone(),
            is_correct: false,
            confidence: word.confidence_or_zero(),
        }
    }
}

/// Coarse grade for an accuracy percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyLevel {
    Perfect,
    Good,
    NeedsPractice,
    Poor,
}

impl AccuracyLevel {
    /// Label shown to the learner
    pub fn label(&self) -> &'static str {
        match self {
            Self::Perfect => "Perfect",
            Self::Good => "Good",
            Self::NeedsPractice => "Needs Practice",
            Self::Poor => "Poor",
        }
    }

    /// All levels, best first
    pub fn all() -> &'static [AccuracyLevel] {
        &[
            AccuracyLevel::Perfect,
            AccuracyLevel::Good,
            AccuracyLevel::NeedsPractice,
            AccuracyLevel::Poor,
        ]
    }
}
