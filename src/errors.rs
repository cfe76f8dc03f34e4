/*!
 * Error types for the subalign application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while aligning sentences to word timestamps
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlignmentError {
    /// A sentence was not found verbatim at or after the search cursor
    #[error("No exact match found for sentence {sentence_index}: {sentence}\n{diagnostic}")]
    Mismatch {
        /// Position of the sentence in the sentence table
        sentence_index: usize,
        /// Original sentence text
        sentence: String,
        /// Cursor position (in characters) where the search started
        cursor: usize,
        /// Normalized text that was searched for
        expected: String,
        /// Text found at the cursor, same length as `expected` where possible
        actual: String,
        /// Rendered difference report
        diagnostic: String,
        /// Character indices where `expected` and `actual` diverge
        diff_positions: Vec<usize>,
    },

    /// A sentence normalized to nothing and cannot be located
    #[error("Sentence {sentence_index} has no matchable text: {sentence:?}")]
    EmptySentence {
        sentence_index: usize,
        sentence: String,
    },
}

/// Errors raised while loading the word and sentence tables
#[derive(Error, Debug)]
pub enum TableError {
    /// A word row violates the timestamp contract
    #[error("Invalid word {index} ({text:?}): start {start} / end {end}")]
    InvalidWord {
        index: usize,
        text: String,
        start: f64,
        end: f64,
    },

    /// The table could not be decoded
    #[error("Failed to parse table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that can occur during subtitle processing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubtitleError {
    /// A timestamp did not follow `HH:MM:SS,mmm`
    #[error("Malformed timestamp at line {line}: {text}")]
    MalformedTimestamp { line: usize, text: String },

    /// Text appeared where a sequence number or timestamp was expected
    #[error("Unexpected content at line {line}: {text}")]
    UnexpectedLine { line: usize, text: String },

    /// Nothing could be parsed from the content
    #[error("No valid subtitle entries were found in the SRT content")]
    NoEntries,

    /// A column layout did not have one or two columns
    #[error("Output layout must have 1 or 2 columns, got {0}")]
    InvalidLayout(usize),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from alignment
    #[error("Alignment error: {0}")]
    Alignment(#[from] AlignmentError),

    /// Error from loading an input table
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
