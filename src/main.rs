// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};

use subalign::app_config::{self, Config};
use subalign::app_controller::{Controller, RunInputs};
use subalign::ass_converter;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Align sentences to word timestamps and write subtitles
    Align(AlignArgs),

    /// Convert a bilingual SRT file into a styled ASS file
    Convert(ConvertArgs),

    /// Generate shell completions for subalign
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct AlignArgs {
    /// Word table (JSON array of {text, start, end})
    #[arg(short, long, value_name = "WORDS_JSON")]
    words: PathBuf,

    /// Sentence table (JSON array of {Source, Translation})
    #[arg(short, long, value_name = "SENTENCES_JSON")]
    sentences: PathBuf,

    /// Sentence table used for dubbing timing
    #[arg(short, long, value_name = "SENTENCES_JSON")]
    audio_sentences: Option<PathBuf>,

    /// Output directory, overrides the config
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Bilingual SRT input
    #[arg(value_name = "INPUT_SRT")]
    input: PathBuf,

    /// ASS output
    #[arg(value_name = "OUTPUT_ASS")]
    output: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subalign - align translated sentences to word timestamps
#[derive(Parser, Debug)]
#[command(name = "subalign")]
#[command(version)]
#[command(about = "Sentence alignment and subtitle generation")]
#[command(long_about = "subalign matches each translated sentence against a word-level transcript
and writes single-language, bilingual and styled subtitles.

EXAMPLES:
    subalign align -w words.json -s sentences.json            # Write subtitles to ./output
    subalign align -w words.json -s sentences.json -f         # Overwrite existing subtitles
    subalign align -w words.json -s s.json -a remerged.json   # Also write dubbing subtitles
    subalign convert output/src_trans.srt output/src_trans.ass
    subalign completions bash > subalign.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and colour for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, colour) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                colour,
                now,
                emoji,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set via max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subalign", &mut std::io::stdout());
            Ok(())
        }
        Commands::Align(args) => run_align(args),
        Commands::Convert(args) => run_convert(args),
    }
}

/// Load or create the configuration and apply the log level
fn load_config(common: &CommonArgs) -> Result<Config> {
    let config_path = Path::new(&common.config_path);

    let mut config = if config_path.exists() {
        Config::from_file(config_path)?
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            common.config_path
        );

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json).context(format!(
            "Failed to write default config to file: {}",
            common.config_path
        ))?;

        config
    };

    if let Some(log_level) = &common.log_level {
        config.log_level = log_level.clone().into();
    }
    log::set_max_level((&config.log_level).into());

    Ok(config)
}

fn run_align(args: AlignArgs) -> Result<()> {
    let mut config = load_config(&args.common)?;

    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.to_string_lossy().to_string();
    }

    let controller = Controller::with_config(config)?;
    let inputs = RunInputs {
        words: args.words,
        sentences: args.sentences,
        audio_sentences: args.audio_sentences,
    };

    match controller.run(&inputs, args.force_overwrite)? {
        Some(reports) => {
            let written: usize = reports.iter().map(|r| r.files.len()).sum();
            info!("Success: {} subtitle files written", written);
        }
        None => info!("Nothing to do"),
    }

    Ok(())
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    let config = load_config(&args.common)?;
    config.validate().context("Configuration validation failed")?;

    if !args.input.is_file() {
        return Err(anyhow!("Input file does not exist: {:?}", args.input));
    }

    if ass_converter::convert_srt_to_ass(&args.input, &args.output, &config.ass) {
        Ok(())
    } else {
        Err(anyhow!("Conversion of {:?} failed", args.input))
    }
}
