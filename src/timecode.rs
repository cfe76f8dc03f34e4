/*!
 * Time code conversion between float seconds, SRT and ASS notation.
 *
 * - SRT: `HH:MM:SS,mmm`, milliseconds truncated
 * - ASS: `H:MM:SS.cc`, centiseconds rounded half-up with carry
 *
 * Hours are never wrapped, so inputs past 24h format as-is.
 */

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;

// @const: SRT timestamp regex
static SRT_TIMESTAMP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2,}):(\d{2}):(\d{2}),(\d{3})$").unwrap());

// @const: SRT time range regex
static SRT_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,}:\d{2}:\d{2},\d{3})\s+-->\s+(\d{2,}:\d{2}:\d{2},\d{3})$").unwrap()
});

// @const: ASS timestamp regex
static ASS_TIMESTAMP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+):(\d{2}):(\d{2})\.(\d{2})$").unwrap());

/// Absorbs float noise such as `1.001 * 1000.0 == 1000.9999999999999`
const MS_EPSILON: f64 = 1e-6;

/// Convert seconds to whole milliseconds, truncating the remainder.
///
/// Negative and non-finite inputs clamp to zero.
pub fn seconds_to_ms(secs: f64) -> u64 {
    if !secs.is_finite() || secs <= 0.0 {
        return 0;
    }
    (secs * 1000.0 + MS_EPSILON).floor() as u64
}

/// Format milliseconds as `HH:MM:SS,mmm`
pub fn format_srt_timestamp_ms(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

pub fn format_srt_timestamp(secs: f64) -> String {
    format_srt_timestamp_ms(seconds_to_ms(secs))
}

/// Round milliseconds to centiseconds, ties to even
fn ms_to_centiseconds(ms: u64) -> u64 {
    let (cs, rem) = (ms / 10, ms % 10);
    match rem {
        0..=4 => cs,
        5 if cs % 2 == 0 => cs,
        _ => cs + 1,
    }
}

/// Format milliseconds as `H:MM:SS.cc`.
///
/// Centiseconds round half to even. Reaching 100 carries into the seconds
/// (and onward into minutes and hours).
pub fn format_ass_timestamp_ms(ms: u64) -> String {
    let total_cs = ms_to_centiseconds(ms);
    let hours = total_cs / 360_000;
    let minutes = (total_cs % 360_000) / 6_000;
    let seconds = (total_cs % 6_000) / 100;
    let centis = total_cs % 100;

    format!("{}:{:02}:{:02}.{:02}", hours, minutes, seconds, centis)
}

pub fn format_ass_timestamp(secs: f64) -> String {
    format_ass_timestamp_ms(seconds_to_ms(secs))
}

/// Parse `HH:MM:SS,mmm` into milliseconds
pub fn parse_srt_timestamp(timestamp: &str) -> Result<u64, SubtitleError> {
    let malformed = || SubtitleError::MalformedTimestamp {
        line: 0,
        text: timestamp.to_string(),
    };

    let caps = SRT_TIMESTAMP_REGEX.captures(timestamp.trim()).ok_or_else(malformed)?;
    let field = |i: usize| -> Result<u64, SubtitleError> {
        caps[i].parse::<u64>().map_err(|_| malformed())
    };

    let (hours, minutes, seconds, millis) = (field(1)?, field(2)?, field(3)?, field(4)?);
    if minutes >= 60 || seconds >= 60 {
        return Err(malformed());
    }

    Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
}

/// Parse `H:MM:SS.cc` into milliseconds
pub fn parse_ass_timestamp(timestamp: &str) -> Result<u64, SubtitleError> {
    let malformed = || SubtitleError::MalformedTimestamp {
        line: 0,
        text: timestamp.to_string(),
    };

    let caps = ASS_TIMESTAMP_REGEX.captures(timestamp.trim()).ok_or_else(malformed)?;
    let field = |i: usize| -> Result<u64, SubtitleError> {
        caps[i].parse::<u64>().map_err(|_| malformed())
    };

    let (hours, minutes, seconds, centis) = (field(1)?, field(2)?, field(3)?, field(4)?);
    if minutes >= 60 || seconds >= 60 {
        return Err(malformed());
    }

    Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + centis * 10)
}

/// Start and end of a cue in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start_ms: u64,
    pub end_ms: u64,
}

impl TimeRange {
    pub fn new(start_ms: u64, end_ms: u64) -> Self {
        Self { start_ms, end_ms }
    }

    pub fn from_seconds(start: f64, end: f64) -> Self {
        Self::new(seconds_to_ms(start), seconds_to_ms(end))
    }

    /// Parse an SRT `start --> end` line
    pub fn parse_srt(line: &str) -> Result<Self, SubtitleError> {
        let caps = SRT_RANGE_REGEX
            .captures(line.trim())
            .ok_or_else(|| SubtitleError::MalformedTimestamp {
                line: 0,
                text: line.to_string(),
            })?;

        Ok(Self::new(
            parse_srt_timestamp(&caps[1])?,
            parse_srt_timestamp(&caps[2])?,
        ))
    }

    /// `HH:MM:SS,mmm --> HH:MM:SS,mmm`
    pub fn to_srt(&self) -> String {
        format!(
            "{} --> {}",
            format_srt_timestamp_ms(self.start_ms),
            format_srt_timestamp_ms(self.end_ms)
        )
    }

    /// ASS start and end fields
    pub fn to_ass(&self) -> (String, String) {
        (
            format_ass_timestamp_ms(self.start_ms),
            format_ass_timestamp_ms(self.end_ms),
        )
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_srt())
    }
}
