use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::alignment::{AlignedSentence, Sentence};
use crate::errors::SubtitleError;
use crate::timecode::TimeRange;

// @module: SRT rendering and parsing

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    // @field: Sequence number, starting at 1
    pub seq_num: usize,

    // @field: Display interval
    pub range: TimeRange,

    // @field: Subtitle text
    pub text: String,
}

impl SubtitleEntry {
    pub fn new(seq_num: usize, range: TimeRange, text: impl Into<String>) -> Self {
        SubtitleEntry {
            seq_num,
            range,
            text: text.into(),
        }
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{}", self.range)?;
        writeln!(f, "{}", self.text)
    }
}

/// Text column of the sentence table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Source,
    Translation,
}

/// Which columns a subtitle file shows, in display order.
///
/// Deserializes from a list of one or two columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Column>", into = "Vec<Column>")]
pub enum ColumnLayout {
    Single(Column),
    /// Two cues per sentence, first column then second, same time range
    Bilingual(Column, Column),
}

impl TryFrom<Vec<Column>> for ColumnLayout {
    type Error = SubtitleError;

    fn try_from(columns: Vec<Column>) -> Result<Self, Self::Error> {
        match columns.as_slice() {
            [only] => Ok(Self::Single(*only)),
            [first, second] => Ok(Self::Bilingual(*first, *second)),
            other => Err(SubtitleError::InvalidLayout(other.len())),
        }
    }
}

impl From<ColumnLayout> for Vec<Column> {
    fn from(layout: ColumnLayout) -> Self {
        match layout {
            ColumnLayout::Single(column) => vec![column],
            ColumnLayout::Bilingual(first, second) => vec![first, second],
        }
    }
}

/// One subtitle file to produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub filename: String,
    pub columns: ColumnLayout,
}

impl OutputConfig {
    pub fn single(filename: &str, column: Column) -> Self {
        Self {
            filename: filename.to_string(),
            columns: ColumnLayout::Single(column),
        }
    }

    pub fn bilingual(filename: &str, first: Column, second: Column) -> Self {
        Self {
            filename: filename.to_string(),
            columns: ColumnLayout::Bilingual(first, second),
        }
    }
}

/// Files written next to the video for viewing
pub fn display_outputs() -> Vec<OutputConfig> {
    vec![
        OutputConfig::single("src.srt", Column::Source),
        OutputConfig::single("trans.srt", Column::Translation),
        OutputConfig::bilingual("src_trans.srt", Column::Source, Column::Translation),
        OutputConfig::bilingual("trans_src.srt", Column::Translation, Column::Source),
    ]
}

/// Files consumed by speech synthesis timing
pub fn audio_outputs() -> Vec<OutputConfig> {
    vec![
        OutputConfig::single("src_subs_for_audio.srt", Column::Source),
        OutputConfig::single("trans_subs_for_audio.srt", Column::Translation),
    ]
}

/// A sentence with its final time range, ready to be rendered
#[derive(Debug, Clone, PartialEq)]
pub struct TimedSentence {
    pub range: TimeRange,
    pub source: String,
    pub translation: String,
}

impl TimedSentence {
    pub fn column(&self, column: Column) -> &str {
        match column {
            Column::Source => &self.source,
            Column::Translation => &self.translation,
        }
    }
}

/// Join aligned timings with sentence text.
///
/// With `display_punctuation`, every listed character in the translation is
/// replaced by a space before trimming. Matching never sees this text.
///
/// # Panics
///
/// Panics if an aligned entry points past the end of `sentences`.
pub fn timed_sentences(
    aligned: &[AlignedSentence],
    sentences: &[Sentence],
    display_punctuation: Option<&str>,
) -> Vec<TimedSentence> {
    aligned
        .iter()
        .map(|a| {
            let sentence = &sentences[a.sentence_index];
            let translation = match display_punctuation {
                Some(marks) => sentence
                    .translation
                    .chars()
                    .map(|c| if marks.contains(c) { ' ' } else { c })
                    .collect::<String>(),
                None => sentence.translation.clone(),
            };

            TimedSentence {
                range: TimeRange::from_seconds(a.start, a.end),
                source: sentence.source.trim().to_string(),
                translation: translation.trim().to_string(),
            }
        })
        .collect()
}

/// Collection of subtitle entries in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtitleCollection {
    /// List of subtitle entries
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    pub fn new(entries: Vec<SubtitleEntry>) -> Self {
        SubtitleCollection { entries }
    }

    /// Render sentences with the given column layout.
    ///
    /// Bilingual layouts emit two consecutively numbered entries per
    /// sentence sharing one time range.
    pub fn render(sentences: &[TimedSentence], layout: ColumnLayout) -> Self {
        let mut entries = Vec::with_capacity(match layout {
            ColumnLayout::Single(_) => sentences.len(),
            ColumnLayout::Bilingual(..) => sentences.len() * 2,
        });

        let columns: Vec<Column> = layout.into();
        for sentence in sentences {
            for column in &columns {
                entries.push(SubtitleEntry::new(
                    entries.len() + 1,
                    sentence.range,
                    sentence.column(*column).trim(),
                ));
            }
        }

        Self { entries }
    }

    /// Serialize as SRT, blocks separated by one blank line
    pub fn to_srt_string(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Write subtitles to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;
        file.write_all(self.to_srt_string().as_bytes())
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

        debug!("Wrote {} entries to {}", self.entries.len(), path.display());
        Ok(())
    }

    /// Parse SRT content, keeping entries in file order
    pub fn parse_srt_string(content: &str) -> Result<Self, SubtitleError> {
        let mut entries = Vec::new();

        // State variables for parsing
        let mut current_seq_num: Option<usize> = None;
        let mut current_range: Option<TimeRange> = None;
        let mut current_text: Vec<&str> = Vec::new();

        let content = content.trim_start_matches('\u{feff}');

        for (idx, line) in content.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = line.trim();

            match (current_seq_num, current_range) {
                (None, _) => {
                    if trimmed.is_empty() {
                        continue;
                    }
                    let seq_num = trimmed.parse::<usize>().map_err(|_| {
                        SubtitleError::UnexpectedLine {
                            line: line_no,
                            text: trimmed.to_string(),
                        }
                    })?;
                    current_seq_num = Some(seq_num);
                }
                (Some(_), None) => {
                    let range = TimeRange::parse_srt(trimmed).map_err(|_| {
                        SubtitleError::MalformedTimestamp {
                            line: line_no,
                            text: trimmed.to_string(),
                        }
                    })?;
                    current_range = Some(range);
                }
                (Some(seq_num), Some(range)) => {
                    if trimmed.is_empty() {
                        entries.push(SubtitleEntry::new(seq_num, range, current_text.join("\n")));
                        current_seq_num = None;
                        current_range = None;
                        current_text.clear();
                    } else {
                        current_text.push(trimmed);
                    }
                }
            }
        }

        // Add the last entry if there is one
        match (current_seq_num, current_range) {
            (Some(seq_num), Some(range)) => {
                entries.push(SubtitleEntry::new(seq_num, range, current_text.join("\n")));
            }
            (Some(_), None) => {
                return Err(SubtitleError::MalformedTimestamp {
                    line: content.lines().count(),
                    text: String::new(),
                });
            }
            _ => {}
        }

        if entries.is_empty() {
            return Err(SubtitleError::NoEntries);
        }

        Ok(Self { entries })
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_srt_string())
    }
}
