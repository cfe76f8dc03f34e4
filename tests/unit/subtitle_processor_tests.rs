/*!
 * Tests for subtitle rendering and parsing
 */

use anyhow::Result;
use subalign::alignment::{AlignmentRun, DEFAULT_MAX_GAP_SECS};
use subalign::subtitle_processor::{
    Column, ColumnLayout, OutputConfig, SubtitleCollection, audio_outputs, display_outputs,
    timed_sentences,
};
use subalign::timecode::TimeRange;
use subalign::{Sentence, SubtitleError};
use crate::common;

fn smoothed_rows(display_punctuation: Option<&str>) -> Vec<subalign::subtitle_processor::TimedSentence> {
    let sentences: Vec<Sentence> = common::sample_sentences()
        .into_iter()
        .map(|s| Sentence::new(s.source, subalign::tables::clean_translation(&s.translation)))
        .collect();
    let run = AlignmentRun::execute(&common::sample_words(), &sentences, DEFAULT_MAX_GAP_SECS)
        .unwrap();
    timed_sentences(&run.smoothed, &sentences, display_punctuation)
}

#[test]
fn test_timedSentences_forDisplay_shouldReplaceFullWidthPunctuation() {
    let rows = smoothed_rows(Some("，。"));

    assert_eq!(rows[0].translation, "你好 世界");
    assert_eq!(rows[1].translation, "这是 Rust");
    assert_eq!(rows[0].range, TimeRange::new(0, 1_400));
    assert_eq!(rows[1].range, TimeRange::new(1_400, 2_500));
}

#[test]
fn test_timedSentences_forAudio_shouldKeepPunctuation() {
    let rows = smoothed_rows(None);
    assert_eq!(rows[0].translation, "你好，世界");
}

#[test]
fn test_timedSentences_withHalfWidthCommaInTable_shouldPolishToSpace() -> Result<()> {
    let sentences = subalign::tables::parse_sentences(
        r#"[{"Source": "Hello, world!", "Translation": "你好,世界。"}]"#,
    )?;
    let run = AlignmentRun::execute(&common::sample_words()[..2], &sentences, DEFAULT_MAX_GAP_SECS)?;

    let rows = timed_sentences(&run.smoothed, &sentences, Some("，。"));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].translation, "你好 世界");
    Ok(())
}

#[test]
#[should_panic]
fn test_timedSentences_withIndexPastTable_shouldPanic() {
    let sentences = common::sample_sentences();
    let run = AlignmentRun::execute(&common::sample_words(), &sentences, DEFAULT_MAX_GAP_SECS)
        .unwrap();

    timed_sentences(&run.smoothed, &sentences[..1], None);
}

#[test]
fn test_render_withSingleLayout_shouldMatchSrtGrammar() {
    let rows = smoothed_rows(Some("，。"));
    let srt = SubtitleCollection::render(&rows, ColumnLayout::Single(Column::Source)).to_srt_string();

    assert_eq!(
        srt,
        "1\n00:00:00,000 --> 00:00:01,400\nHello, world!\n\n\
         2\n00:00:01,400 --> 00:00:02,500\nThis is Rust.\n"
    );
}

#[test]
fn test_render_withBilingualLayout_shouldProduceTwoEntriesPerSentence() {
    let rows = smoothed_rows(Some("，。"));
    let collection = SubtitleCollection::render(
        &rows,
        ColumnLayout::Bilingual(Column::Source, Column::Translation),
    );

    assert_eq!(collection.entries.len(), 2 * rows.len());
    for (k, pair) in collection.entries.chunks(2).enumerate() {
        assert_eq!(pair[0].seq_num, 2 * k + 1);
        assert_eq!(pair[1].seq_num, 2 * k + 2);
        assert_eq!(pair[0].range, pair[1].range);
        assert_eq!(pair[0].text, rows[k].source);
        assert_eq!(pair[1].text, rows[k].translation);
    }
}

#[test]
fn test_render_withEmptyInput_shouldProduceEmptyFile() {
    let collection = SubtitleCollection::render(&[], ColumnLayout::Single(Column::Source));
    assert_eq!(collection.to_srt_string(), "");
}

#[test]
fn test_writeToSrt_shouldRoundTripThroughParser() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("trans_src.srt");
    let rows = smoothed_rows(Some("，。"));
    let collection = SubtitleCollection::render(
        &rows,
        ColumnLayout::Bilingual(Column::Translation, Column::Source),
    );

    collection.write_to_srt(&path)?;
    let parsed = SubtitleCollection::parse_srt_string(&std::fs::read_to_string(&path)?)?;

    assert_eq!(parsed, collection);
    Ok(())
}

#[test]
fn test_parseSrtString_withCrlfAndBom_shouldParse() -> Result<()> {
    let content = "\u{feff}1\r\n00:00:01,000 --> 00:00:02,000\r\nLine one\r\nLine two\r\n\r\n";
    let parsed = SubtitleCollection::parse_srt_string(content)?;

    assert_eq!(parsed.entries.len(), 1);
    assert_eq!(parsed.entries[0].text, "Line one\nLine two");
    Ok(())
}

#[test]
fn test_outputConfig_deserialize_shouldReadColumnLists() {
    let json = r#"[
        {"filename": "a.srt", "columns": ["translation"]},
        {"filename": "b.srt", "columns": ["source", "translation"]}
    ]"#;
    let outputs: Vec<OutputConfig> = serde_json::from_str(json).unwrap();

    assert_eq!(outputs[0], OutputConfig::single("a.srt", Column::Translation));
    assert_eq!(
        outputs[1],
        OutputConfig::bilingual("b.srt", Column::Source, Column::Translation)
    );

    let bad = r#"{"filename": "c.srt", "columns": []}"#;
    assert!(serde_json::from_str::<OutputConfig>(bad).is_err());
}

#[test]
fn test_defaultOutputs_shouldListConfiguredFiles() {
    let names: Vec<String> = display_outputs().into_iter().map(|o| o.filename).collect();
    assert_eq!(names, vec!["src.srt", "trans.srt", "src_trans.srt", "trans_src.srt"]);

    let names: Vec<String> = audio_outputs().into_iter().map(|o| o.filename).collect();
    assert_eq!(names, vec!["src_subs_for_audio.srt", "trans_subs_for_audio.srt"]);
}

#[test]
fn test_columnLayout_withThreeColumns_shouldReportArity() {
    let err = ColumnLayout::try_from(vec![Column::Source; 3]).unwrap_err();
    assert_eq!(err, SubtitleError::InvalidLayout(3));
}
