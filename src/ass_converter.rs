/*!
 * Conversion of bilingual SRT output into a styled ASS file.
 *
 * Each SRT block becomes one or more `Dialogue:` events. Lines that carry
 * CJK ideographs alternate between the CJK and Latin styles per sub-line;
 * everything else uses the Latin style.
 */

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use log::{error, info};

use crate::app_config::{AssConfig, AssStyle};
use crate::file_utils::FileManager;
use crate::subtitle_processor::SubtitleCollection;

/// ASS line break escape
const ASS_LINE_BREAK: &str = "\\N";

/// Which declared style a dialogue line uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleRole {
    Cjk,
    Latin,
}

/// One dialogue line and the style chosen for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    pub role: StyleRole,
    pub text: String,
}

/// CJK Unified Ideographs block
pub fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk)
}

/// Pick styles for the text of one SRT block.
///
/// Line breaks become `\N`. With CJK present, each sub-line becomes its own
/// line, starting with the CJK style and alternating. Otherwise the whole
/// block stays one Latin line.
pub fn style_lines(text: &str) -> Vec<StyledLine> {
    let escaped = text.trim().replace("\r\n", "\n").replace('\n', ASS_LINE_BREAK);

    if !contains_cjk(&escaped) {
        return vec![StyledLine {
            role: StyleRole::Latin,
            text: escaped,
        }];
    }

    escaped
        .split(ASS_LINE_BREAK)
        .enumerate()
        .map(|(i, line)| StyledLine {
            role: if i % 2 == 0 {
                StyleRole::Cjk
            } else {
                StyleRole::Latin
            },
            text: line.to_string(),
        })
        .collect()
}

fn format_style(style: &AssStyle) -> String {
    format!(
        "Style: {},{},{},{},{},{},{},{},0,0,0,100,100,{},0,1,{},{},2,0,0,{},1",
        style.name,
        style.font_name,
        style.font_size,
        style.primary_colour,
        style.secondary_colour,
        style.outline_colour,
        style.back_colour,
        if style.bold { -1 } else { 0 },
        style.spacing,
        style.outline,
        style.shadow,
        style.margin_v,
    )
}

/// Script info, the two styles and the events format line
pub fn build_header(config: &AssConfig) -> String {
    let mut header = String::new();
    header.push_str("[Script Info]\n");
    header.push_str("Title: Converted from SRT\n");
    header.push_str("ScriptType: v4.00+\n");
    let _ = writeln!(header, "PlayResX: {}", config.play_res_x);
    let _ = writeln!(header, "PlayResY: {}", config.play_res_y);
    header.push('\n');
    header.push_str("[V4+ Styles]\n");
    header.push_str(
        "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, \
         BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, \
         BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding\n",
    );
    let _ = writeln!(header, "{}", format_style(&config.latin_style));
    let _ = writeln!(header, "{}", format_style(&config.cjk_style));
    header.push('\n');
    header.push_str("[Events]\n");
    header.push_str("Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n");
    header
}

/// Render a parsed subtitle collection as a complete ASS document
pub fn render_ass(collection: &SubtitleCollection, config: &AssConfig) -> String {
    let mut document = build_header(config);

    for entry in &collection.entries {
        let (start, end) = entry.range.to_ass();
        for line in style_lines(&entry.text) {
            let style = match line.role {
                StyleRole::Cjk => &config.cjk_style.name,
                StyleRole::Latin => &config.latin_style.name,
            };
            let _ = writeln!(
                document,
                "Dialogue: 0,{},{},{},,0,0,0,,{}",
                start, end, style, line.text
            );
        }
    }

    document
}

/// Convert an SRT file into an ASS file, returning the number of events
pub fn try_convert_srt_to_ass(srt_path: &Path, ass_path: &Path, config: &AssConfig) -> Result<usize> {
    let content = FileManager::read_to_string(srt_path)?;
    let collection = SubtitleCollection::parse_srt_string(&content)
        .with_context(|| format!("Failed to parse subtitle file: {}", srt_path.display()))?;

    let document = render_ass(&collection, config);
    let events = document.lines().filter(|l| l.starts_with("Dialogue:")).count();

    FileManager::write_to_file(ass_path, &document)?;
    Ok(events)
}

/// Best-effort conversion: failures are logged and reported as `false`.
///
/// The SRT file already exists at this point, so a failed conversion only
/// means the styled variant is missing.
pub fn convert_srt_to_ass(srt_path: &Path, ass_path: &Path, config: &AssConfig) -> bool {
    match try_convert_srt_to_ass(srt_path, ass_path, config) {
        Ok(events) => {
            info!(
                "Converted {} to {} ({} events)",
                file_label(srt_path),
                file_label(ass_path),
                events
            );
            true
        }
        Err(e) => {
            error!("Error converting SRT to ASS: {:#}", e);
            false
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
