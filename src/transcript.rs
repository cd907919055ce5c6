//! Transcripts as delivered by the speech-to-text provider
//!
//! Decodes the Deepgram `listen` response shape: the first alternative of the
//! first channel carries the transcript text and the per-word list.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::types::TranscribedWord;

/// What the recognizer heard for one recording
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub words: Vec<TranscribedWord>,
}

#[derive(Debug, Default, Deserialize)]
struct ListenResponse {
    #[serde(default)]
    results: Option<ListenResults>,
}

#[derive(Debug, Default, Deserialize)]
struct ListenResults {
    #[serde(default)]
    channels: Vec<Channel>,
}

#[derive(Debug, Default, Deserialize)]
struct Channel {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Default, Deserialize)]
struct Alternative {
    #[serde(default)]
    transcript: Option<String>,
    #[serde(default)]
    words: Option<Vec<TranscribedWord>>,
}

impl Transcript {
    pub fn new(text: impl Into<String>, words: Vec<TranscribedWord>) -> Self {
        Self {
            text: text.into(),
            words,
        }
    }

    /// Build a transcript whose text is the words joined by spaces
    pub fn from_words(words: Vec<TranscribedWord>) -> Self {
        let text = words
            .iter()
            .map(|w| w.word.as_str())
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self { text, words }
    }

    /// Decode a Deepgram `listen` response body
    ///
    /// A response without results, channels or alternatives yields an empty
    /// transcript; only malformed JSON is an error.
    pub fn from_deepgram_json(body: &str) -> Result<Self> {
        let response: ListenResponse = serde_json::from_str(body)?;

        let alternative = response
            .results
            .and_then(|r| r.channels.into_iter().next())
            .and_then(|c| c.alternatives.into_iter().next())
            .unwrap_or_default();

        let transcript = Self {
            text: alternative.transcript.unwrap_or_default(),
            words: alternative.words.unwrap_or_default(),
        };

        debug!(
            "Decoded transcript with {} words ({} chars)",
            transcript.words.len(),
            transcript.text.len()
        );

        Ok(transcript)
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTEN_BODY: &str = r#"{
        "metadata": {"request_id": "abc"},
        "results": {
            "channels": [{
                "alternatives": [{
                    "transcript": "I like apples.",
                    "confidence": 0.97,
                    "words": [
                        {"word": "i", "start": 0.08, "end": 0.3, "confidence": 0.99, "punctuated_word": "I"},
                        {"word": "like", "start": 0.3, "end": 0.6, "confidence": 0.95},
                        {"word": "apples", "start": 0.6, "end": 1.1}
                    ]
                }]
            }]
        }
    }"#;

    #[test]
    fn test_decode_listen_response() {
        let transcript = Transcript::from_deepgram_json(LISTEN_BODY).unwrap();

        assert_eq!(transcript.text, "I like apples.");
        assert_eq!(transcript.words.len(), 3);
        assert_eq!(transcript.words[0].word, "i");
        assert_eq!(transcript.words[0].start, Some(0.08));
        assert_eq!(transcript.words[1].confidence, 0.95);
        // missing confidence defaults to zero
        assert_eq!(transcript.words[2].confidence, 0.0);
    }

    #[test]
    fn test_missing_sections_are_empty() {
        for body in [
            "{}",
            r#"{"results": null}"#,
            r#"{"results": {"channels": []}}"#,
            r#"{"results": {"channels": [{"alternatives": []}]}}"#,
            r#"{"results": {"channels": [{"alternatives": [{"transcript": null, "words": null}]}]}}"#,
        ] {
            let transcript = Transcript::from_deepgram_json(body).unwrap();
            assert!(transcript.is_empty(), "expected empty transcript for {}", body);
        }
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Transcript::from_deepgram_json("{not json").is_err());
    }

    #[test]
    fn test_from_words_joins_text() {
        let transcript = Transcript::from_words(vec![
            TranscribedWord::bare("Hello"),
            TranscribedWord::bare(""),
            TranscribedWord::bare("world"),
        ]);
        assert_eq!(transcript.text, "Hello world");
        assert_eq!(transcript.words.len(), 3);
    }
}
