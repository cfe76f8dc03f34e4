use super::Word;
use super::normalize::normalize_for_matching;

/// Byte range one word contributes to the concatenated transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WordSpan {
    start: usize,
    end: usize,
    word_index: usize,
}

/// Normalized transcript with a reverse mapping from offsets to words.
///
/// Offsets are byte offsets into the UTF-8 concatenation. Spans are
/// contiguous and strictly increasing; words that normalize to nothing
/// (pure punctuation) own no offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionIndex {
    text: String,
    spans: Vec<WordSpan>,
}

impl PositionIndex {
    pub fn build(words: &[Word]) -> Self {
        let mut text = String::new();
        let mut spans = Vec::with_capacity(words.len());

        for (word_index, word) in words.iter().enumerate() {
            let normalized = normalize_for_matching(&word.text);
            if normalized.is_empty() {
                continue;
            }

            let start = text.len();
            text.push_str(&normalized);
            spans.push(WordSpan {
                start,
                end: text.len(),
                word_index,
            });
        }

        Self { text, spans }
    }

    /// The concatenated, separator-free transcript
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Word owning the byte at `offset`
    pub fn word_at(&self, offset: usize) -> Option<usize> {
        let idx = self.spans.partition_point(|span| span.end <= offset);
        self.spans
            .get(idx)
            .filter(|span| span.start <= offset)
            .map(|span| span.word_index)
    }
}
