use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::alignment::{AlignmentRun, Sentence, Word};
use crate::app_config::Config;
use crate::ass_converter;
use crate::file_utils::FileManager;
use crate::subtitle_processor::{OutputConfig, SubtitleCollection, timed_sentences};
use crate::tables;

// @module: Application controller for subtitle generation

/// What one generation pass produced
#[derive(Debug)]
pub struct GenerationReport {
    /// Alignment before and after gap smoothing
    pub run: AlignmentRun,
    /// SRT files written, in configuration order
    pub files: Vec<PathBuf>,
    /// ASS conversion outcome, if this pass feeds one
    pub ass_converted: Option<bool>,
}

/// Input tables for one run
#[derive(Debug, Clone)]
pub struct RunInputs {
    pub words: PathBuf,
    pub sentences: PathBuf,
    /// Sentence table used for dubbing timing, if any
    pub audio_sentences: Option<PathBuf>,
}

/// Main application controller for subtitle generation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        if !config.produces_ass() {
            warn!(
                "ASS source {} is not a configured output, no ASS file will be written",
                config.ass.source_file
            );
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the whole workflow: display subtitles, then audio subtitles.
    ///
    /// Returns `None` when existing outputs were kept because
    /// `force_overwrite` was not set.
    pub fn run(&self, inputs: &RunInputs, force_overwrite: bool) -> Result<Option<Vec<GenerationReport>>> {
        let start_time = Instant::now();
        let output_dir = PathBuf::from(&self.config.output_dir);

        if !force_overwrite {
            if let Some(existing) = self.existing_output(&output_dir) {
                warn!(
                    "Skipping, subtitles already exist at {:?} (use -f to force overwrite)",
                    existing
                );
                return Ok(None);
            }
        }

        let words = tables::load_words(&inputs.words)?;
        let sentences = tables::load_sentences(&inputs.sentences)?;

        let mut reports = Vec::new();
        reports.push(self.generate(
            &words,
            &sentences,
            &self.config.subtitles.outputs,
            &output_dir,
            true,
        )?);
        info!("Subtitles generated in {:?}", output_dir);

        if let Some(audio_path) = &inputs.audio_sentences {
            let audio_sentences = tables::load_sentences(audio_path)?;
            let audio_dir = PathBuf::from(&self.config.audio_dir);

            reports.push(self.generate(
                &words,
                &audio_sentences,
                &self.config.subtitles.audio_outputs,
                &audio_dir,
                false,
            )?);
            info!("Audio subtitles generated in {:?}", audio_dir);
        }

        debug!("Run finished in {:.2?}", start_time.elapsed());
        Ok(Some(reports))
    }

    /// Align, render and write one set of outputs.
    ///
    /// Alignment completes before any file is touched, so a mismatch leaves
    /// `output_dir` as it was. With `for_display`, translations are polished
    /// and the configured ASS file is derived from its source SRT.
    pub fn generate(
        &self,
        words: &[Word],
        sentences: &[Sentence],
        outputs: &[OutputConfig],
        output_dir: &Path,
        for_display: bool,
    ) -> Result<GenerationReport> {
        let run = AlignmentRun::execute(words, sentences, self.config.alignment.max_gap_secs)
            .context("Alignment failed, correct the transcript or sentence table and retry")?;

        let adjusted = run.adjusted_count();
        if adjusted > 0 {
            debug!("Closed {} short gaps between subtitles", adjusted);
        }

        let punctuation = for_display.then_some(self.config.subtitles.display_punctuation.as_str());
        let rows = timed_sentences(&run.smoothed, sentences, punctuation);

        FileManager::ensure_dir(output_dir)?;

        let mut files = Vec::with_capacity(outputs.len());
        let mut ass_converted = None;

        for output in outputs {
            let path = output_dir.join(&output.filename);
            SubtitleCollection::render(&rows, output.columns).write_to_srt(&path)?;
            info!("Wrote {:?}", path);

            if for_display && output.filename == self.config.ass.source_file {
                let ass_path = output_dir.join(&self.config.ass.output_file);
                ass_converted = Some(ass_converter::convert_srt_to_ass(
                    &path,
                    &ass_path,
                    &self.config.ass,
                ));
            }

            files.push(path);
        }

        Ok(GenerationReport {
            run,
            files,
            ass_converted,
        })
    }

    fn existing_output(&self, output_dir: &Path) -> Option<PathBuf> {
        self.config
            .subtitles
            .outputs
            .iter()
            .map(|o| output_dir.join(&o.filename))
            .find(|p| FileManager::file_exists(p))
    }
}
