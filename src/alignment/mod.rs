/*!
 * Alignment of translated sentences against word-level timestamps.
 *
 * The pipeline is strictly sequential:
 * - `normalize`: canonical text used on both sides of the match
 * - `position_index`: concatenated transcript with offset-to-word lookup
 * - `aligner`: cursor-driven exact substring search per sentence
 * - `smoothing`: closes short silent gaps between consecutive cues
 */

pub mod aligner;
pub mod normalize;
pub mod position_index;
pub mod smoothing;

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::AlignmentError;

pub use aligner::{Cursor, SentenceAligner};
pub use normalize::{normalize_for_display, normalize_for_matching};
pub use position_index::PositionIndex;
pub use smoothing::{DEFAULT_MAX_GAP_SECS, smooth_gaps};

/// A single transcribed word with its timing in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// A sentence in document order, with its source text and translation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    #[serde(rename = "Source", alias = "source")]
    pub source: String,

    #[serde(
        rename = "Translation",
        alias = "translation",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub translation: String,
}

// Missing translations arrive as null from upstream tables
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Sentence {
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            translation: translation.into(),
        }
    }
}

/// Time range resolved for one sentence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedSentence {
    /// Index of the sentence in the sentence table
    pub sentence_index: usize,
    /// Index of the first word covered by the sentence
    pub start_word: usize,
    /// Index of the last word covered by the sentence
    pub end_word: usize,
    pub start: f64,
    pub end: f64,
}

impl AlignedSentence {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Result of one alignment run
///
/// `raw` keeps the timings exactly as matched so a smoothed result can
/// always be compared against what the transcript said.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentRun {
    pub raw: Vec<AlignedSentence>,
    pub smoothed: Vec<AlignedSentence>,
}

impl AlignmentRun {
    /// Align every sentence and close short gaps.
    ///
    /// Fails on the first sentence that cannot be located; nothing is
    /// returned for the sentences that did match before it.
    pub fn execute(
        words: &[Word],
        sentences: &[Sentence],
        max_gap_secs: f64,
    ) -> Result<Self, AlignmentError> {
        let aligner = SentenceAligner::new(words);
        debug!(
            "Indexed {} words into {} bytes of transcript",
            words.len(),
            aligner.index().len()
        );
        let raw = aligner.align_all(sentences)?;
        let smoothed = smooth_gaps(&raw, max_gap_secs);

        Ok(Self { raw, smoothed })
    }

    /// Number of cues whose end time was moved by smoothing
    pub fn adjusted_count(&self) -> usize {
        self.raw
            .iter()
            .zip(&self.smoothed)
            .filter(|(raw, smoothed)| raw.end != smoothed.end)
            .count()
    }
}
