//! Attempt reports handed to the calling layer for persistence
//!
//! One report per spoken attempt: accuracy, what was expected, what was heard
//! and which words were wrong. Grading thresholds come from [`ScoringConfig`].

use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ScoringConfig;
use crate::error::{Error, Result};
use crate::types::{AccuracyLevel, ReportId, WordComparisonResult};

/// Record of one pronunciation attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PronunciationReport {
    pub id: ReportId,
    /// Similarity percentage in `[0, 100]`
    pub accuracy: f64,
    pub reference_text: String,
    pub transcribed_text: String,
    /// Words marked incorrect, in spoken order, original casing
    pub incorrect_words: Vec<String>,
    pub word_details: Vec<WordComparisonResult>,
    /// Recording length in whole seconds
    pub audio_duration: u64,
    pub created_at: DateTime<Utc>,
}

impl PronunciationReport {
    pub fn new(
        accuracy: f64,
        reference_text: String,
        transcribed_text: String,
        word_details: Vec<WordComparisonResult>,
        audio_duration: u64,
    ) -> Self {
        let accuracy = if accuracy.is_finite() {
            accuracy.clamp(0.0, 100.0)
        } else {
            0.0
        };

        let incorrect_words = word_details
            .iter()
            .filter(|w| !w.is_correct)
            .map(|w| w.word.clone())
            .collect();

        Self {
            id: Uuid::new_v4(),
            accuracy,
            reference_text,
            transcribed_text,
            incorrect_words,
            word_details,
            audio_duration,
            created_at: Utc::now(),
        }
    }

    /// Check the fields a persisted report must carry
    pub fn validate(&self) -> Result<()> {
        if self.reference_text.trim().is_empty() {
            return Err(Error::InvalidReport(
                "reference_text must not be blank".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.accuracy) {
            return Err(Error::InvalidReport(format!(
                "accuracy {} outside 0..=100",
                self.accuracy
            )));
        }
        Ok(())
    }

    pub fn is_perfect(&self, config: &ScoringConfig) -> bool {
        self.level(config) == AccuracyLevel::Perfect
    }

    pub fn level(&self, config: &ScoringConfig) -> AccuracyLevel {
        accuracy_level(self.accuracy, config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Grade an accuracy percentage
///
/// Scores between the needs-practice and good thresholds grade as `Poor`,
/// below needs-practice as `NeedsPractice`.
pub fn accuracy_level(accuracy: f64, config: &ScoringConfig) -> AccuracyLevel {
    if accuracy >= config.perfect_threshold {
        AccuracyLevel::Perfect
    } else if accuracy >= config.good_threshold {
        AccuracyLevel::Good
    } else if accuracy < config.needs_practice_threshold {
        AccuracyLevel::NeedsPractice
    } else {
        AccuracyLevel::Poor
    }
}

/// Aggregate view over a learner's reports
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_sessions: usize,
    pub average_accuracy: f64,
    pub perfect_sessions: usize,
    /// Most often missed words (lowercased) with their miss counts
    pub most_missed_words: Vec<(String, usize)>,
}

impl ReportSummary {
    /// Summarize reports, keeping at most `top_missed` missed words
    pub fn from_reports(
        reports: &[PronunciationReport],
        config: &ScoringConfig,
        top_missed: usize,
    ) -> Self {
        if reports.is_empty() {
            return Self::default();
        }

        let total_accuracy: f64 = reports.iter().map(|r| r.accuracy).sum();
        let perfect_sessions = reports.iter().filter(|r| r.is_perfect(config)).count();

        let mut missed: HashMap<String, usize> = HashMap::new();
        for word in reports.iter().flat_map(|r| &r.incorrect_words) {
            let key = word.to_lowercase();
            if !key.trim().is_empty() {
                *missed.entry(key).or_insert(0) += 1;
            }
        }

        let mut most_missed_words: Vec<(String, usize)> = missed.into_iter().collect();
        most_missed_words.sort_by(|a, b| (Reverse(a.1), &a.0).cmp(&(Reverse(b.1), &b.0)));
        most_missed_words.truncate(top_missed);

        Self {
            total_sessions: reports.len(),
            average_accuracy: total_accuracy / reports.len() as f64,
            perfect_sessions,
            most_missed_words,
        }
    }
}
