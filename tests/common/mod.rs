/*!
 * Common test utilities for the subalign test suite
 */

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tempfile::TempDir;

use subalign::{Sentence, Word};

/// Routes library logs to the test output, safe to call repeatedly
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Words of a short two-sentence transcript with a 0.4s pause in between
pub fn sample_words() -> Vec<Word> {
    vec![
        Word::new("Hello,", 0.0, 0.4),
        Word::new("world!", 0.5, 1.0),
        Word::new("This", 1.4, 1.6),
        Word::new("is", 1.7, 1.8),
        Word::new("Rust.", 1.9, 2.5),
    ]
}

pub fn sample_sentences() -> Vec<Sentence> {
    vec![
        Sentence::new("Hello, world!", "你好，世界。"),
        Sentence::new("This is Rust.", "这是Rust"),
    ]
}

/// Writes the sample word table as JSON
pub fn create_word_table(dir: &Path) -> Result<PathBuf> {
    let json = serde_json::to_string(&sample_words())?;
    create_test_file(dir, "words.json", &json)
}

/// Writes the sample sentence table as JSON
pub fn create_sentence_table(dir: &Path, filename: &str) -> Result<PathBuf> {
    let json = serde_json::to_string(&sample_sentences())?;
    create_test_file(dir, filename, &json)
}
