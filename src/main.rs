// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use vdscript2llc::app_config::{self, Config};
use vdscript2llc::app_controller::Controller;

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
    /// Convert a .vdscript file (or every .vdscript in a directory) into .llc (default command)
    Convert(ConvertArgs),

    /// Generate shell completions for vdscript2llc
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Input .vdscript file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output .llc file (single file input only)
    #[arg(short, long, value_name = "LLC_PATH")]
    output: Option<PathBuf>,

    /// Name of the original video file written into the project
    #[arg(short, long)]
    media_file_name: Option<String>,

    /// Frame rate of the original video (e.g. 23.976, 25)
    #[arg(short = 'r', long)]
    fps: Option<f64>,

    /// Frames to add at the start of each cut (negative values remove frames)
    #[arg(short = 's', long, allow_negative_numbers = true)]
    extra_frames_start: Option<i64>,

    /// Frames to add at the end of each cut (negative values remove frames)
    #[arg(short = 'e', long, allow_negative_numbers = true)]
    extra_frames_end: Option<i64>,

    /// Name cuts "segment 1", "segment 2", ...
    #[arg(short, long)]
    number_segments: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// vdscript2llc - VirtualDub script to LosslessCut project converter
///
/// Re-applies the cuts made on a proxy video in VirtualDub to the original
/// video in LosslessCut, frame-accurately.
#[derive(Parser, Debug)]
#[command(name = "vdscript2llc")]
#[command(version)]
#[command(about = "Convert VirtualDub .vdscript cuts into LosslessCut .llc projects")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "vdscript2llc reads the kept ranges of a VirtualDub / VirtualDub2 .vdscript file
and writes them as a LosslessCut .llc project with start/end times in seconds.

EXAMPLES:
    vdscript2llc cuts.vdscript                      # Writes cuts.llc for cuts.mp4
    vdscript2llc -r 23.976 cuts.vdscript            # Set the frame rate of the original
    vdscript2llc -s -4 -e 0 cuts.vdscript           # Remove 4 frames before each cut
    vdscript2llc -s 50 -e 50 cuts.vdscript          # Pad each cut for an inaccurate proxy
    vdscript2llc -n -m movie.mkv -o out.llc cuts.vdscript
    vdscript2llc /edits/                            # Convert every .vdscript in a directory
    vdscript2llc completions bash > vdscript2llc.bash

FRAME OFFSETS:
    Positive values always ADD frames and negative values always REMOVE frames.
    A start never goes below frame 0, and cuts left without any duration are
    skipped with a warning.

CONFIGURATION:
    Defaults are stored in conf.json. You can specify a different file with
    --config-path. If the file doesn't exist, a default one is created.
    Command line options override the file.

    CHECK THE FRAME RATE: timecodes are only as accurate as the fps setting.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    convert: ConvertArgs,
}

// @struct: Custom logger implementation
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                color,
                now,
                tag,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() {
    // Info until the configuration tells us otherwise
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let cli = CommandLineOptions::parse();

    let result = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "vdscript2llc", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Convert(args)) => run_convert(args),
        None => run_convert(cli.convert),
    };

    if let Err(e) = result {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run_convert(options: ConvertArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let input_path = options
        .input_path
        .clone()
        .ok_or_else(|| anyhow!("INPUT_PATH is required"))?;

    let config = load_config(&options)?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?;

    if input_path.is_file() {
        controller.run(
            &input_path,
            options.output.as_deref(),
            options.media_file_name.as_deref(),
        )?;
    } else if input_path.is_dir() {
        if options.output.is_some() || options.media_file_name.is_some() {
            return Err(anyhow!(
                "--output and --media-file-name only apply to a single input file"
            ));
        }
        let summary = controller.run_folder(&input_path)?;
        if summary.failed > 0 {
            return Err(anyhow!("{} script(s) could not be converted", summary.failed));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    Ok(())
}

// Load or create the configuration file, then apply command line overrides
fn load_config(options: &ConvertArgs) -> Result<Config> {
    let config_path = Path::new(&options.config_path);

    let mut config = if config_path.exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at {:?}, creating default config.", config_path);
        let config = Config::default();
        config.save_to_file(config_path)?;
        config
    };

    if let Some(fps) = options.fps {
        config.fps = fps;
    }

    if let Some(extra_frames_start) = options.extra_frames_start {
        config.extra_frames_start = extra_frames_start;
    }

    if let Some(extra_frames_end) = options.extra_frames_end {
        config.extra_frames_end = extra_frames_end;
    }

    if options.number_segments {
        config.add_segment_number = true;
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}
