/*!
 * # subalign - sentence-to-timestamp alignment and subtitle synthesis
 *
 * A Rust library that aligns translated sentences against word-level speech
 * recognition timestamps and writes the result as subtitle files.
 *
 * ## Features
 *
 * - Exact, cursor-driven matching of sentences against the transcript
 * - Closing of sub-second gaps between consecutive subtitles
 * - Single-language and bilingual SRT output
 * - Styled bilingual ASS output with per-script styles
 * - Separate subtitle set for dubbing timing
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `alignment`: normalization, position index, aligner and gap smoothing
 * - `timecode`: SRT and ASS time code formatting and parsing
 * - `subtitle_processor`: SRT rendering and parsing
 * - `ass_converter`: SRT to ASS conversion
 * - `tables`: word and sentence table loading
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod alignment;
pub mod app_config;
pub mod app_controller;
pub mod ass_converter;
pub mod errors;
pub mod file_utils;
pub mod subtitle_processor;
pub mod tables;
pub mod timecode;

// Re-export main types for easier usage
pub use alignment::{AlignedSentence, AlignmentRun, Sentence, Word};
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AlignmentError, AppError, SubtitleError, TableError};
pub use subtitle_processor::{Column, ColumnLayout, OutputConfig, SubtitleCollection, SubtitleEntry};
