/*!
 * Tests for error types and conversions
 */

use subalign::errors::{AlignmentError, AppError, SubtitleError, TableError};

#[test]
fn test_alignmentError_mismatch_shouldIncludeDiagnostic() {
    let error = AlignmentError::Mismatch {
        sentence_index: 2,
        sentence: "Goodbye!".to_string(),
        cursor: 10,
        expected: "goodbye".to_string(),
        actual: "thisisr".to_string(),
        diagnostic: "Expected sentence: goodbye\nActual match: thisisr".to_string(),
        diff_positions: vec![0, 1, 2, 3, 4, 5, 6],
    };
    let display = format!("{}", error);

    assert!(display.contains("No exact match found for sentence 2"));
    assert!(display.contains("Goodbye!"));
    assert!(display.contains("Actual match: thisisr"));
}

#[test]
fn test_tableError_invalidWord_shouldDisplayTimes() {
    let error = TableError::InvalidWord {
        index: 4,
        text: "oops".to_string(),
        start: 2.0,
        end: 1.0,
    };
    let display = format!("{}", error);
    assert!(display.contains("Invalid word 4"));
    assert!(display.contains("start 2"));
}

#[test]
fn test_appError_fromAlignmentError_shouldWrapCorrectly() {
    let error = AlignmentError::EmptySentence {
        sentence_index: 0,
        sentence: "...".to_string(),
    };
    let app_error: AppError = error.into();
    assert!(format!("{}", app_error).contains("Alignment error"));
}

#[test]
fn test_appError_fromSubtitleError_shouldWrapCorrectly() {
    let app_error: AppError = SubtitleError::NoEntries.into();
    assert!(format!("{}", app_error).contains("Subtitle error"));
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}
