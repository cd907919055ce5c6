//! Word-level alignment of a transcription against the reference sentence
//!
//! Minimum edit distance over words (not chars), with backtracking to decide
//! which transcribed words line up with the expected word at that position.
//! When several operations reach the same minimum cost the diagonal
//! (match/substitute) wins, then deletion, then insertion. The choice is
//! observable on repeated words and must stay stable.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::normalize::{normalize, tokenize};
use crate::types::{TranscribedWord, WordComparisonResult};

/// Edit operation recorded for a DP cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOp {
    /// Reference and transcribed word are equal after normalization
    Match,
    /// Transcribed word stands where a different reference word was expected
    Substitute,
    /// Extra transcribed word with no reference counterpart
    Insert,
    /// Reference word that was never spoken
    Delete,
}

impl EditOp {
    /// Single-character representation for edit vectors
    pub fn as_char(&self) -> char {
        match self {
            Self::Match => 'M',
            Self::Substitute => 'S',
            Self::Insert => 'I',
            Self::Delete => 'D',
        }
    }

    /// Parse from single character
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'M' => Some(Self::Match),
            'S' => Some(Self::Substitute),
            'I' => Some(Self::Insert),
            'D' => Some(Self::Delete),
            _ => None,
        }
    }
}

/// One step of the chosen alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedPair {
    pub op: EditOp,
    /// Index into the reference words, `None` for insertions
    pub ref_idx: Option<usize>,
    /// Index into the transcribed words, `None` for deletions
    pub trans_idx: Option<usize>,
}

impl AlignedPair {
    /// Only exact matches count as correct
    pub fn is_correct(&self) -> bool {
        self.op == EditOp::Match
    }
}

/// Cost table plus the operation chosen at each cell
#[derive(Debug, Clone)]
pub struct ScoreMatrix {
    pub costs: Vec<Vec<usize>>,
    pub ops: Vec<Vec<Option<EditOp>>>,
}

impl ScoreMatrix {
    /// Minimum number of word edits between the two sequences
    pub fn distance(&self) -> usize {
        self.costs
            .last()
            .and_then(|row| row.last())
            .copied()
            .unwrap_or(0)
    }
}

/// Fill the edit distance table over words
pub fn score_matrix<R, T>(ref_words: &[R], trans_words: &[T]) -> ScoreMatrix
where
    R: AsRef<str>,
    T: AsRef<str>,
{
    let m = ref_words.len();
    let n = trans_words.len();

    let mut costs = vec![vec![0usize; n + 1]; m + 1];
    let mut ops = vec![vec![None; n + 1]; m + 1];

    // first column: every reference word deleted
    for (i, row) in costs.iter_mut().enumerate() {
        row[0] = i;
    }
    for row in ops.iter_mut().skip(1) {
        row[0] = Some(EditOp::Delete);
    }
    // first row: every transcribed word inserted
    for j in 0..=n {
        costs[0][j] = j;
        if j > 0 {
            ops[0][j] = Some(EditOp::Insert);
        }
    }

    for i in 1..=m {
        for j in 1..=n {
            let same = ref_words[i - 1].as_ref() == trans_words[j - 1].as_ref();
            let diagonal = costs[i - 1][j - 1] + usize::from(!same);
            let delete = costs[i - 1][j] + 1;
            let insert = costs[i][j - 1] + 1;
            let best = diagonal.min(delete).min(insert);

            costs[i][j] = best;
            ops[i][j] = Some(if best == diagonal {
                if same { EditOp::Match } else { EditOp::Substitute }
            } else if best == delete {
                EditOp::Delete
            } else {
                EditOp::Insert
            });
        }
    }

    ScoreMatrix { costs, ops }
}

/// Walk the recorded operations back from the bottom-right cell
pub fn backtrack(matrix: &ScoreMatrix) -> Vec<AlignedPair> {
    let mut i = matrix.ops.len().saturating_sub(1);
    let mut j = matrix.ops.first().map_or(0, |row| row.len().saturating_sub(1));
    let mut steps = Vec::with_capacity(i + j);

    while i > 0 || j > 0 {
        let Some(op) = matrix.ops[i][j] else {
            break;
        };

        match op {
            EditOp::Match | EditOp::Substitute => {
                steps.push(AlignedPair {
                    op,
                    ref_idx: Some(i - 1),
                    trans_idx: Some(j - 1),
                });
                i -= 1;
                j -= 1;
            }
            EditOp::Insert => {
                steps.push(AlignedPair {
                    op,
                    ref_idx: None,
                    trans_idx: Some(j - 1),
                });
                j -= 1;
            }
            EditOp::Delete => {
                steps.push(AlignedPair {
                    op,
                    ref_idx: Some(i - 1),
                    trans_idx: None,
                });
                i -= 1;
            }
        }
    }

    steps.reverse();
    steps
}

/// Align two already-normalized word sequences
pub fn align_words<R, T>(ref_words: &[R], trans_words: &[T]) -> Vec<AlignedPair>
where
    R: AsRef<str>,
    T: AsRef<str>,
{
    backtrack(&score_matrix(ref_words, trans_words))
}

/// Edit vector string from alignment steps (e.g. "MMSIM")
pub fn edit_vector(steps: &[AlignedPair]) -> String {
    steps.iter().map(|s| s.op.as_char()).collect()
}

/// Label every transcribed word as correct or incorrect against the reference
///
/// Returns exactly one result per input word, in input order. Step indices
/// count positions among the words that survive normalization and are looked
/// up by the input word's position, so a word that normalizes to nothing
/// shifts the verdicts of the words after it.
pub fn compare_words(reference: &str, words: &[TranscribedWord]) -> Vec<WordComparisonResult> {
    let ref_words = tokenize(reference);
    let trans_words: Vec<String> = words
        .iter()
        .map(|w| normalize(&w.word))
        .filter(|w| !w.is_empty())
        .collect();

    if trans_words.is_empty() {
        return words.iter().map(WordComparisonResult::incorrect).collect();
    }

    let steps = align_words(&ref_words, &trans_words);

    // trans_idx is always below trans_words.len() <= words.len()
    let mut verdicts: Vec<Option<bool>> = vec![None; words.len()];
    for step in &steps {
        if let Some(t) = step.trans_idx {
            verdicts[t] = Some(step.is_correct());
        }
    }

    debug!(
        "Aligned {} transcribed words against {} reference words: {}",
        trans_words.len(),
        ref_words.len(),
        edit_vector(&steps)
    );

    words
        .iter()
        .zip(verdicts)
        .map(|(word, verdict)| WordComparisonResult {
            word: word.word.clone(),
            is_correct: verdict.unwrap_or(false),
            confidence: word.confidence_or_zero(),
        })
        .collect()
}

/// Compare words given as a JSON array and return the results as JSON
pub fn compare_words_json(reference: &str, words_json: &str) -> Result<String> {
    let words: Vec<TranscribedWord> = serde_json::from_str(words_json)?;
    let results = compare_words(reference, &words);
    Ok(serde_json::to_string(&results)?)
}
