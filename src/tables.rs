/*!
 * Loading of the two tabular inputs.
 *
 * - Word table: JSON array of `{"text", "start", "end"}` rows from the transcriber
 * - Sentence table: JSON array of `{"Source", "Translation"}` rows from the translator
 *
 * Both are materialized fully before alignment starts.
 */

use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use crate::alignment::{Sentence, Word};
use crate::errors::TableError;
use crate::file_utils::FileManager;

/// Parse and validate a word table
pub fn parse_words(json: &str) -> Result<Vec<Word>, TableError> {
    let mut words: Vec<Word> = serde_json::from_str(json)?;

    for (index, word) in words.iter_mut().enumerate() {
        word.text = word.text.trim().trim_matches('"').trim().to_string();

        if !word.start.is_finite() || !word.end.is_finite() || word.start > word.end {
            return Err(TableError::InvalidWord {
                index,
                text: word.text.clone(),
                start: word.start,
                end: word.end,
            });
        }
    }

    Ok(words)
}

/// Parse a sentence table and tidy its translations
pub fn parse_sentences(json: &str) -> Result<Vec<Sentence>, TableError> {
    let mut sentences: Vec<Sentence> = serde_json::from_str(json)?;

    for sentence in &mut sentences {
        sentence.translation = clean_translation(&sentence.translation);
    }

    Ok(sentences)
}

pub fn load_words<P: AsRef<Path>>(path: P) -> Result<Vec<Word>> {
    let path = path.as_ref();
    let content = FileManager::read_to_string(path)?;
    let words = parse_words(&content)
        .with_context(|| format!("Invalid word table: {}", path.display()))?;

    debug!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

pub fn load_sentences<P: AsRef<Path>>(path: P) -> Result<Vec<Sentence>> {
    let path = path.as_ref();
    let content = FileManager::read_to_string(path)?;
    let sentences = parse_sentences(&content)
        .with_context(|| format!("Invalid sentence table: {}", path.display()))?;

    debug!("Loaded {} sentences from {}", sentences.len(), path.display());
    Ok(sentences)
}

/// Strip edge punctuation left by the translator, then let autocorrect
/// space out mixed scripts and widen punctuation between CJK characters.
pub fn clean_translation(text: &str) -> String {
    let trimmed = text
        .trim()
        .trim_matches(|c: char| c == '。' || c == '，')
        .trim();

    autocorrect::format(trimmed)
}
