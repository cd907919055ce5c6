//! Configured entry point for scoring an attempt
//!
//! Wraps the pure scoring functions with input limits and builds the report
//! the calling layer stores.

use tracing::{debug, warn};

use crate::alignment::compare_words;
use crate::config::ScoringConfig;
use crate::error::Result;
use crate::normalize::tokenize;
use crate::report::{PronunciationReport, accuracy_level};
use crate::similarity::similarity_percent;
use crate::transcript::Transcript;
use crate::types::{AccuracyLevel, TranscribedWord, WordComparisonResult};

/// Scorer holding a validated configuration
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    config: ScoringConfig,
}

impl Scorer {
    /// Create a scorer, rejecting an invalid configuration
    pub fn new(config: ScoringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Similarity percentage with both texts capped
    pub fn similarity_percent(&self, reference: &str, hypothesis: &str) -> f64 {
        let reference = self.cap_text(reference);
        let hypothesis = self.cap_text(hypothesis);
        similarity_percent(reference, hypothesis)
    }

    /// Word verdicts with the reference and word list capped
    ///
    /// Words past the cap are not aligned and come back incorrect, so the
    /// output still has one entry per input word.
    pub fn compare_words(
        &self,
        reference: &str,
        words: &[TranscribedWord],
    ) -> Vec<WordComparisonResult> {
        let reference = self.cap_reference_words(self.cap_text(reference));

        if words.len() <= self.config.max_words {
            return compare_words(&reference, words);
        }

        warn!(
            "Transcription has {} words, aligning the first {}",
            words.len(),
            self.config.max_words
        );

        let (aligned, overflow) = words.split_at(self.config.max_words);
        let mut results = compare_words(&reference, aligned);
        results.extend(overflow.iter().map(WordComparisonResult::incorrect));
        results
    }

    /// Score an attempt and build its report
    pub fn evaluate(
        &self,
        reference: &str,
        transcript: &Transcript,
        audio_duration: u64,
    ) -> PronunciationReport {
        let accuracy = self.similarity_percent(reference, &transcript.text);
        let word_details = self.compare_words(reference, &transcript.words);

        let report = PronunciationReport::new(
            accuracy,
            reference.to_string(),
            transcript.text.clone(),
            word_details,
            audio_duration,
        );

        debug!(
            "Evaluated attempt: {:.1}% ({}), {} incorrect of {} words",
            report.accuracy,
            self.level(report.accuracy).label(),
            report.incorrect_words.len(),
            report.word_details.len()
        );

        report
    }

    pub fn level(&self, accuracy: f64) -> AccuracyLevel {
        accuracy_level(accuracy, &self.config)
    }

    fn cap_text<'a>(&self, text: &'a str) -> &'a str {
        let max = self.config.max_reference_chars;
        match text.char_indices().nth(max) {
            Some((cut, _)) => {
                warn!(
                    "Text exceeds {} chars, truncating before scoring",
                    max
                );
                &text[..cut]
            }
            None => text,
        }
    }

    /// Cap the reference on its normalized tokens, the same words the aligner sees
    fn cap_reference_words(&self, reference: &str) -> String {
        let max = self.config.max_words;
        let mut tokens = tokenize(reference);
        if tokens.len() > max {
            warn!("Reference exceeds {} words, truncating before alignment", max);
            tokens.truncate(max);
        }
        tokens.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn small_scorer(max_chars: usize, max_words: usize) -> Scorer {
        Scorer::new(ScoringConfig {
            max_reference_chars: max_chars,
            max_words,
            ..ScoringConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ScoringConfig {
            max_words: 0,
            ..ScoringConfig::default()
        };
        assert!(matches!(Scorer::new(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_matches_free_functions_within_limits() {
        let scorer = Scorer::default();
        let words = vec![
            TranscribedWord::new("I", 0.9),
            TranscribedWord::new("hate", 0.8),
            TranscribedWord::new("apples", 0.7),
        ];

        assert_eq!(
            scorer.similarity_percent("I like apples", "I hate apples"),
            similarity_percent("I like apples", "I hate apples")
        );
        assert_eq!(
            scorer.compare_words("I like apples", &words),
            compare_words("I like apples", &words)
        );
    }

    #[test]
    fn test_text_cap_counts_chars() {
        let scorer = small_scorer(3, 100);
        // only "abc" of each side is compared
        assert_eq!(scorer.similarity_percent("abcdef", "abcxyz"), 100.0);
        assert_eq!(scorer.similarity_percent("ééé-long", "ééé"), 100.0);
    }

    #[test]
    fn test_word_cap_counts_normalized_tokens() {
        let scorer = small_scorer(1_000, 3);
        // one whitespace token, five words once hyphens become spaces
        assert_eq!(scorer.cap_reference_words("a-b-c-d-e"), "a b c");

        let words: Vec<TranscribedWord> = ["a", "b", "c"]
            .iter()
            .map(|w| TranscribedWord::new(*w, 0.5))
            .collect();
        let results = scorer.compare_words("a-b-c-d-e", &words);
        assert!(results.iter().all(|r| r.is_correct));
    }

    #[test]
    fn test_word_cap_keeps_length() {
        let scorer = small_scorer(1_000, 2);
        let words: Vec<TranscribedWord> = ["one", "two", "three"]
            .iter()
            .map(|w| TranscribedWord::new(*w, 0.5))
            .collect();

        let results = scorer.compare_words("one two three", &words);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_correct);
        assert!(results[1].is_correct);
        assert!(!results[2].is_correct);
        assert_eq!(results[2].confidence, 0.5);
    }

    #[test]
    fn test_evaluate_builds_report() {
        let scorer = Scorer::default();
        let transcript = Transcript::from_words(vec![
            TranscribedWord::new("I", 0.9),
            TranscribedWord::new("hate", 0.6),
            TranscribedWord::new("apples", 0.9),
        ]);

        let report = scorer.evaluate("I like apples.", &transcript, 4);

        assert_eq!(report.reference_text, "I like apples.");
        assert_eq!(report.transcribed_text, "I hate apples");
        assert_eq!(report.incorrect_words, vec!["hate"]);
        assert_eq!(report.audio_duration, 4);
        assert!(report.accuracy > 50.0 && report.accuracy < 100.0);
        assert!(report.validate().is_ok());
    }

    #[test]
    fn test_evaluate_perfect() {
        let scorer = Scorer::default();
        let transcript = Transcript::from_words(vec![
            TranscribedWord::new("Hello", 0.9),
            TranscribedWord::new("world", 0.9),
        ]);

        let report = scorer.evaluate("Hello, world!", &transcript, 1);
        assert!(report.is_perfect(scorer.config()));
        assert_eq!(scorer.level(report.accuracy), AccuracyLevel::Perfect);
        assert!(report.incorrect_words.is_empty());
    }
}
