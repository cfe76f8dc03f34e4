/*!
 * Tests for SRT to ASS conversion
 */

use anyhow::Result;
use subalign::app_config::AssConfig;
use subalign::ass_converter::{StyleRole, build_header, convert_srt_to_ass, style_lines};
use crate::common;

const BILINGUAL_SRT: &str = "1\n00:00:00,000 --> 00:00:01,995\nHello world\n\n\
2\n00:00:00,000 --> 00:00:01,995\n你好 世界\n\n\
3\n01:00:02,004 --> 01:00:03,500\nSecond line\n\n\
4\n01:00:02,004 --> 01:00:03,500\n第二行\n";

#[test]
fn test_styleLines_withMixedBlock_shouldAlternatePerSubLine() {
    let roles: Vec<StyleRole> = style_lines("中文\nEnglish\n中文\nEnglish")
        .into_iter()
        .map(|l| l.role)
        .collect();

    assert_eq!(
        roles,
        vec![StyleRole::Cjk, StyleRole::Latin, StyleRole::Cjk, StyleRole::Latin]
    );
}

#[test]
fn test_styleLines_withAsciiBlock_shouldUseLatinThroughout() {
    let lines = style_lines("One\nTwo\nThree");

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].role, StyleRole::Latin);
    assert_eq!(lines[0].text, "One\\NTwo\\NThree");
}

#[test]
fn test_buildHeader_shouldDeclareTwoStyles() {
    let header = build_header(&AssConfig::default());
    let styles: Vec<&str> = header.lines().filter(|l| l.starts_with("Style:")).collect();

    assert_eq!(styles.len(), 2);
    assert!(styles[0].starts_with("Style: Latin,Tahoma,41,"));
    assert!(styles[1].starts_with("Style: CJK,WenQuanYi Micro Hei,65,"));
    assert!(header.ends_with("Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n"));
}

#[test]
fn test_convertSrtToAss_withBilingualFile_shouldWriteDialogues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt_path = common::create_test_file(temp_dir.path(), "src_trans.srt", BILINGUAL_SRT)?;
    let ass_path = temp_dir.path().join("src_trans.ass");

    assert!(convert_srt_to_ass(&srt_path, &ass_path, &AssConfig::default()));

    let content = std::fs::read_to_string(&ass_path)?;
    let dialogues: Vec<&str> = content.lines().filter(|l| l.starts_with("Dialogue:")).collect();
    assert_eq!(
        dialogues,
        vec![
            "Dialogue: 0,0:00:00.00,0:00:02.00,Latin,,0,0,0,,Hello world",
            "Dialogue: 0,0:00:00.00,0:00:02.00,CJK,,0,0,0,,你好 世界",
            "Dialogue: 0,1:00:02.00,1:00:03.50,Latin,,0,0,0,,Second line",
            "Dialogue: 0,1:00:02.00,1:00:03.50,CJK,,0,0,0,,第二行",
        ]
    );
    assert!(!content.contains(".100"));
    Ok(())
}

#[test]
fn test_convertSrtToAss_withMalformedFile_shouldReturnFalse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt_path = common::create_test_file(
        temp_dir.path(),
        "broken.srt",
        "1\nnot a timestamp\ntext\n",
    )?;
    let ass_path = temp_dir.path().join("broken.ass");

    assert!(!convert_srt_to_ass(&srt_path, &ass_path, &AssConfig::default()));
    assert!(!ass_path.exists());
    Ok(())
}

#[test]
fn test_convertSrtToAss_withMissingFile_shouldReturnFalse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt_path = temp_dir.path().join("missing.srt");
    let ass_path = temp_dir.path().join("missing.ass");

    assert!(!convert_srt_to_ass(&srt_path, &ass_path, &AssConfig::default()));
    Ok(())
}
