use log::{debug, error, warn};

use super::normalize::normalize_for_matching;
use super::position_index::PositionIndex;
use super::{AlignedSentence, Sentence, Word};
use crate::errors::AlignmentError;

/// Search position into the concatenated transcript.
///
/// Only ever moves forward, so no word can be claimed by two sentences
/// and sentences keep transcript order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    offset: usize,
}

impl Cursor {
    pub fn start() -> Self {
        Self::default()
    }

    /// Byte offset into `PositionIndex::text`
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn advance_to(self, offset: usize) -> Self {
        debug_assert!(offset >= self.offset);
        Self { offset }
    }
}

/// Locates sentences inside a word table
pub struct SentenceAligner<'a> {
    words: &'a [Word],
    index: PositionIndex,
}

impl<'a> SentenceAligner<'a> {
    pub fn new(words: &'a [Word]) -> Self {
        Self {
            words,
            index: PositionIndex::build(words),
        }
    }

    pub fn index(&self) -> &PositionIndex {
        &self.index
    }

    /// Align all sentences in order, stopping at the first mismatch
    pub fn align_all(&self, sentences: &[Sentence]) -> Result<Vec<AlignedSentence>, AlignmentError> {
        if self.index.is_empty() && !sentences.is_empty() {
            warn!("Transcript has no matchable text, {} sentences cannot align", sentences.len());
        }

        let mut aligned = Vec::with_capacity(sentences.len());
        let mut cursor = Cursor::start();

        for (sentence_index, sentence) in sentences.iter().enumerate() {
            let (entry, next) = self.align_sentence(cursor, sentence_index, sentence)?;
            aligned.push(entry);
            cursor = next;
        }

        debug!(
            "Aligned {} sentences against {} words",
            aligned.len(),
            self.words.len()
        );

        Ok(aligned)
    }

    /// Align one sentence starting from `cursor`.
    ///
    /// Returns the aligned sentence and the cursor just past its match.
    pub fn align_sentence(
        &self,
        cursor: Cursor,
        sentence_index: usize,
        sentence: &Sentence,
    ) -> Result<(AlignedSentence, Cursor), AlignmentError> {
        let key = normalize_for_matching(&sentence.source);
        if key.is_empty() {
            return Err(AlignmentError::EmptySentence {
                sentence_index,
                sentence: sentence.source.clone(),
            });
        }

        let Some(found) = self.index.text()[cursor.offset()..].find(&key) else {
            let err = self.mismatch(cursor, sentence_index, sentence, key);
            error!("{}", err);
            return Err(err);
        };

        let match_start = cursor.offset() + found;
        let match_end = match_start + key.len();

        // Every byte inside the concatenation has an owner
        let (Some(start_word), Some(end_word)) = (
            self.index.word_at(match_start),
            self.index.word_at(match_end - 1),
        ) else {
            return Err(self.mismatch(cursor, sentence_index, sentence, key));
        };

        let aligned = AlignedSentence {
            sentence_index,
            start_word,
            end_word,
            start: self.words[start_word].start,
            end: self.words[end_word].end,
        };

        debug!(
            "Sentence {} matched words {}..={} ({:.3}s -> {:.3}s)",
            sentence_index, start_word, end_word, aligned.start, aligned.end
        );

        Ok((aligned, cursor.advance_to(match_end)))
    }

    fn mismatch(
        &self,
        cursor: Cursor,
        sentence_index: usize,
        sentence: &Sentence,
        expected: String,
    ) -> AlignmentError {
        let expected_len = expected.chars().count();
        let actual: String = self.index.text()[cursor.offset()..]
            .chars()
            .take(expected_len)
            .collect();

        let diff_positions = difference_positions(&expected, &actual);
        let diagnostic = render_difference(&expected, &actual, &diff_positions);

        AlignmentError::Mismatch {
            sentence_index,
            sentence: sentence.source.clone(),
            cursor: self.index.text()[..cursor.offset()].chars().count(),
            expected,
            actual,
            diagnostic,
            diff_positions,
        }
    }
}

/// Character indices where two strings differ, including any length overhang
pub fn difference_positions(expected: &str, actual: &str) -> Vec<usize> {
    let expected: Vec<char> = expected.chars().collect();
    let actual: Vec<char> = actual.chars().collect();
    let common = expected.len().min(actual.len());

    let mut positions: Vec<usize> = (0..common).filter(|&i| expected[i] != actual[i]).collect();
    positions.extend(common..expected.len().max(actual.len()));
    positions
}

fn render_difference(expected: &str, actual: &str, positions: &[usize]) -> String {
    let width = expected.chars().count().max(actual.chars().count());
    let markers: String = (0..width)
        .map(|i| if positions.contains(&i) { '^' } else { ' ' })
        .collect();

    format!(
        "Expected sentence: {}\nActual match: {}\nPosition markers: {}\nDifference indices: {:?}",
        expected, actual, markers, positions
    )
}
