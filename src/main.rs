// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use icu_po_lint::app_config::{self, ColorChoice, Config, ConfigOverrides, OutputFormat};
use icu_po_lint::report::{self, Reporter};
use icu_po_lint::{Controller, ErrorKind, ExitStatus};

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

/// CLI Wrapper for OutputFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliOutputFormat {
    Text,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(cli_format: CliOutputFormat) -> Self {
        match cli_format {
            CliOutputFormat::Text => OutputFormat::Text,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// CLI Wrapper for ColorChoice to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliColorChoice {
    Auto,
    Always,
    Never,
}

impl From<CliColorChoice> for ColorChoice {
    fn from(cli_color: CliColorChoice) -> Self {
        match cli_color {
            CliColorChoice::Auto => ColorChoice::Auto,
            CliColorChoice::Always => ColorChoice::Always,
            CliColorChoice::Never => ColorChoice::Never,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check catalogs under a directory (default command)
    Check(CheckArgs),

    /// List every ICU error kind that can be ignored
    Kinds,

    /// Generate shell completions for icu-po-lint
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Default)]
struct CheckArgs {
    /// Directory to search for catalogs
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Glob that catalog file names must match (e.g. '*.po', '**/LC_MESSAGES/*.po')
    #[arg(short, long)]
    pattern: Option<String>,

    /// ICU error kind to ignore; repeat or separate with commas
    #[arg(short, long, value_name = "KIND", value_delimiter = ',')]
    ignore: Vec<ErrorKind>,

    /// Configuration file path
    #[arg(short, long)]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Report format
    #[arg(long, value_enum)]
    format: Option<CliOutputFormat>,

    /// When to color the report
    #[arg(long, value_enum)]
    color: Option<CliColorChoice>,

    /// Skip entries flagged fuzzy
    #[arg(long)]
    skip_fuzzy: bool,
}

/// icu-po-lint - ICU MessageFormat linter for gettext catalogs
///
/// Checks that every source message and translation in a set of .po files
/// is valid ICU MessageFormat, and that translations keep the formatting
/// of their source.
#[derive(Parser, Debug)]
#[command(name = "icu-po-lint")]
#[command(version)]
#[command(about = "Validate ICU MessageFormat syntax in gettext catalogs")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "icu-po-lint validates ICU MessageFormat strings in gettext translation catalogs.

EXAMPLES:
    icu-po-lint                                  # Check every *.po file under the current directory
    icu-po-lint locales/                         # Check a specific directory
    icu-po-lint -p '**/LC_MESSAGES/*.po' .       # Match catalogs by relative path
    icu-po-lint -i MISSING_OTHER_CLAUSE locales/ # Ignore an error kind
    icu-po-lint --format json locales/ > out.json
    icu-po-lint kinds                            # List error kinds
    icu-po-lint completions bash > icu-po-lint.bash

CONFIGURATION:
    A JSON configuration file can be given with --config-path. Command line
    flags override file values; ignore lists from both are combined.

EXIT STATUS:
    0  no problems found
    1  findings or unreadable catalogs
    2  invalid arguments, configuration or directory")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    check: CheckArgs,
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

    // @returns: ANSI color and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌"),
            Level::Warn => ("\x1B[1;33m", "🚧"),
            Level::Info => ("\x1B[1;32m", " "),
            Level::Debug => ("\x1B[1;36m", "🔍"),
            Level::Trace => ("\x1B[1;35m", "📋"),
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
            let (color, emoji) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

fn main() -> ExitCode {
    // The logger accepts everything; the effective level is narrowed with
    // set_max_level once the config is known
    if CustomLogger::init(LevelFilter::Trace).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }

    let cli = CommandLineOptions::parse();

    let result = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "icu-po-lint", &mut std::io::stdout());
            Ok(true)
        }
        Some(Commands::Kinds) => print_kinds(),
        Some(Commands::Check(args)) => run_check(args),
        None => run_check(cli.check),
    };

    if let Err(e) = &result {
        error!("{:#}", e);
    }

    ExitCode::from(ExitStatus::from_outcome(&result).code())
}

fn print_kinds() -> Result<bool> {
    let mut stdout = std::io::stdout().lock();
    for kind in ErrorKind::ALL {
        writeln!(stdout, "{:<42} {}", kind.as_str(), kind.description())?;
    }
    Ok(true)
}

impl From<&CheckArgs> for ConfigOverrides {
    fn from(options: &CheckArgs) -> Self {
        ConfigOverrides {
            pattern: options.pattern.clone(),
            ignore: options.ignore.clone(),
            skip_fuzzy: options.skip_fuzzy,
            output_format: options.format.clone().map(Into::into),
            color: options.color.clone().map(Into::into),
            log_level: options.log_level.clone().map(Into::into),
        }
    }
}

fn run_check(options: CheckArgs) -> Result<bool> {
    // Apply the command line level early so config loading is logged at it
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let config = Config::resolve(options.config_path.as_deref(), ConfigOverrides::from(&options))?;
    log::set_max_level(level_filter(&config.log_level));

    let dir = options.dir.unwrap_or_else(|| PathBuf::from("."));
    let reporter = Reporter::new(config.output_format, report::use_color(config.color));

    let controller = Controller::with_config(config)?;
    let summary = controller.run(&dir)?;

    let mut stdout = std::io::stdout().lock();
    reporter.write(&mut stdout, &summary)?;
    stdout.flush()?;

    Ok(summary.success())
}
