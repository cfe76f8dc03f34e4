use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::alignment::DEFAULT_MAX_GAP_SECS;
use crate::subtitle_processor::{OutputConfig, audio_outputs, display_outputs};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Directory receiving the display subtitles
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Directory receiving the subtitles used for dubbing
    #[serde(default = "default_audio_dir")]
    pub audio_dir: String,

    /// Alignment settings
    #[serde(default)]
    pub alignment: AlignmentConfig,

    /// Subtitle output settings
    #[serde(default)]
    pub subtitles: SubtitleConfig,

    /// Styled ASS output settings
    #[serde(default)]
    pub ass: AssConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for matching sentences to words
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AlignmentConfig {
    /// Silences shorter than this (in seconds) are closed by extending the
    /// earlier cue
    #[serde(default = "default_max_gap_secs")]
    pub max_gap_secs: f64,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            max_gap_secs: default_max_gap_secs(),
        }
    }
}

/// Configuration for subtitle generation
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubtitleConfig {
    /// Files rendered from the display sentence table
    #[serde(default = "display_outputs")]
    pub outputs: Vec<OutputConfig>,

    /// Files rendered from the audio sentence table
    #[serde(default = "audio_outputs")]
    pub audio_outputs: Vec<OutputConfig>,

    /// Characters replaced by a space in display translations
    #[serde(default = "default_display_punctuation")]
    pub display_punctuation: String,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            outputs: display_outputs(),
            audio_outputs: audio_outputs(),
            display_punctuation: default_display_punctuation(),
        }
    }
}

/// A named ASS style
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AssStyle {
    pub name: String,
    pub font_name: String,
    pub font_size: u32,
    #[serde(default = "default_primary_colour")]
    pub primary_colour: String,
    #[serde(default = "default_secondary_colour")]
    pub secondary_colour: String,
    pub outline_colour: String,
    #[serde(default = "default_back_colour")]
    pub back_colour: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub spacing: f64,
    #[serde(default)]
    pub outline: f64,
    #[serde(default)]
    pub shadow: f64,
    #[serde(default)]
    pub margin_v: u32,
}

/// Configuration for the styled bilingual ASS file
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AssConfig {
    /// Rendered SRT the ASS file is derived from
    #[serde(default = "default_ass_source_file")]
    pub source_file: String,

    /// Name of the ASS file, written next to its source
    #[serde(default = "default_ass_output_file")]
    pub output_file: String,

    #[serde(default = "default_play_res_x")]
    pub play_res_x: u32,

    #[serde(default = "default_play_res_y")]
    pub play_res_y: u32,

    /// Style for lines carrying CJK ideographs
    #[serde(default = "default_cjk_style")]
    pub cjk_style: AssStyle,

    /// Style for every other line
    #[serde(default = "default_latin_style")]
    pub latin_style: AssStyle,
}

impl Default for AssConfig {
    fn default() -> Self {
        Self {
            source_file: default_ass_source_file(),
            output_file: default_ass_output_file(),
            play_res_x: default_play_res_x(),
            play_res_y: default_play_res_y(),
            cjk_style: default_cjk_style(),
            latin_style: default_latin_style(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_audio_dir() -> String {
    "output/audio".to_string()
}

fn default_max_gap_secs() -> f64 {
    DEFAULT_MAX_GAP_SECS
}

fn default_display_punctuation() -> String {
    "，。".to_string()
}

fn default_ass_source_file() -> String {
    "src_trans.srt".to_string()
}

fn default_ass_output_file() -> String {
    "src_trans.ass".to_string()
}

fn default_play_res_x() -> u32 {
    1920
}

fn default_play_res_y() -> u32 {
    1080
}

fn default_primary_colour() -> String {
    "&H00FFFFFF".to_string()
}

fn default_secondary_colour() -> String {
    "&H000000FF".to_string()
}

fn default_back_colour() -> String {
    "&H00000000".to_string()
}

fn default_latin_style() -> AssStyle {
    AssStyle {
        name: "Latin".to_string(),
        font_name: "Tahoma".to_string(),
        font_size: 41,
        primary_colour: default_primary_colour(),
        secondary_colour: default_secondary_colour(),
        outline_colour: "&H003B3C3D".to_string(),
        back_colour: default_back_colour(),
        bold: false,
        spacing: 1.0,
        outline: 2.8,
        shadow: 0.2,
        margin_v: 11,
    }
}

fn default_cjk_style() -> AssStyle {
    AssStyle {
        name: "CJK".to_string(),
        font_name: "WenQuanYi Micro Hei".to_string(),
        font_size: 65,
        primary_colour: default_primary_colour(),
        secondary_colour: default_secondary_colour(),
        outline_colour: "&H006E4216".to_string(),
        back_colour: default_back_colour(),
        bold: true,
        spacing: 0.5,
        outline: 3.7,
        shadow: 0.2,
        margin_v: 11,
    }
}

impl Config {
    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let gap = self.alignment.max_gap_secs;
        if !gap.is_finite() || gap <= 0.0 {
            return Err(anyhow!("alignment.max_gap_secs must be positive, got {}", gap));
        }

        if self.subtitles.outputs.is_empty() {
            return Err(anyhow!("At least one subtitle output must be configured"));
        }

        for (label, outputs) in [
            ("outputs", &self.subtitles.outputs),
            ("audio_outputs", &self.subtitles.audio_outputs),
        ] {
            let mut seen = HashSet::new();
            for output in outputs {
                if output.filename.trim().is_empty() {
                    return Err(anyhow!("Empty filename in subtitles.{}", label));
                }
                if !seen.insert(output.filename.as_str()) {
                    return Err(anyhow!(
                        "Duplicate filename in subtitles.{}: {}",
                        label,
                        output.filename
                    ));
                }
            }
        }

        if self.ass.cjk_style.name == self.ass.latin_style.name {
            return Err(anyhow!(
                "ASS styles must have distinct names, both are '{}'",
                self.ass.cjk_style.name
            ));
        }

        if self.ass.play_res_x == 0 || self.ass.play_res_y == 0 {
            return Err(anyhow!("ASS play resolution must be non-zero"));
        }

        Ok(())
    }

    /// Whether the configured outputs include the ASS source file
    pub fn produces_ass(&self) -> bool {
        self.subtitles
            .outputs
            .iter()
            .any(|o| o.filename == self.ass.source_file)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            output_dir: default_output_dir(),
            audio_dir: default_audio_dir(),
            alignment: AlignmentConfig::default(),
            subtitles: SubtitleConfig::default(),
            ass: AssConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
