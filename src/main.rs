// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use glosswatch::app_config::{self, Config};
use glosswatch::app_controller::{parse_text_args, Controller, GlossaryCommand};

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
    /// Show aggregates, languages and remote glossary status (default command)
    Overview,

    /// List glossary aggregates sorted by the configured language
    List,

    /// List the glossary languages derived from the supported language pairs
    Languages,

    /// Show whether the remote glossaries are outdated
    Status,

    /// Show database statistics
    Stats,

    /// Create a new aggregate; every glossary language needs a text
    Create {
        /// Text per language, e.g. --text EN=House --text DE=Haus
        #[arg(short, long = "text", value_name = "LANG=TEXT", required = true)]
        texts: Vec<String>,
    },

    /// Update texts of an existing aggregate
    Update {
        /// Aggregate identifier
        aggregate_identifier: String,

        /// Text per language, e.g. --text DE=Gebäude
        #[arg(short, long = "text", value_name = "LANG=TEXT", required = true)]
        texts: Vec<String>,
    },

    /// Delete an aggregate with all its languages
    Delete {
        /// Aggregate identifier
        aggregate_identifier: String,
    },

    /// Generate shell completions for glosswatch
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// glosswatch - multilingual glossary maintenance
///
/// Maintains glossary terms in several languages and reports whether the
/// glossaries hosted by DeepL are older than the local edits.
#[derive(Parser, Debug)]
#[command(name = "glosswatch")]
#[command(version)]
#[command(about = "Multilingual glossary maintenance with DeepL staleness checks")]
#[command(long_about = "glosswatch maintains glossary terms in several languages and checks
whether the glossaries hosted by DeepL are older than the local edits.

EXAMPLES:
    glosswatch                                        # Overview as JSON
    glosswatch list                                   # Aggregates only
    glosswatch create --text EN=House --text DE=Haus  # New aggregate
    glosswatch update <ID> --text DE=Gebäude          # Change one language
    glosswatch delete <ID>                            # Remove an aggregate
    glosswatch completions bash > glosswatch.bash     # Shell completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file
    doesn't exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// SQLite database file, overrides the configuration
    #[arg(short, long, env = "GLOSSWATCH_DATABASE")]
    database: Option<String>,
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

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
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

            // stdout carries the JSON result, so log lines go to stderr
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger starts permissive; the effective level is applied below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    let command = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "glosswatch", &mut std::io::stdout());
            return Ok(());
        }
        Some(Commands::Overview) | None => GlossaryCommand::Overview,
        Some(Commands::List) => GlossaryCommand::List,
        Some(Commands::Languages) => GlossaryCommand::Languages,
        Some(Commands::Status) => GlossaryCommand::Status,
        Some(Commands::Stats) => GlossaryCommand::Stats,
        Some(Commands::Create { texts }) => GlossaryCommand::Create {
            texts: parse_text_args(&texts)?,
        },
        Some(Commands::Update { aggregate_identifier, texts }) => GlossaryCommand::Update {
            aggregate_identifier,
            texts: parse_text_args(&texts)?,
        },
        Some(Commands::Delete { aggregate_identifier }) => GlossaryCommand::Delete {
            aggregate_identifier,
        },
    };

    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }
    log::set_max_level((&config.log_level).into());

    if let Some(database) = cli.database {
        config.database.path = Some(database);
    }

    config.validate()
        .context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    let output = controller.run(command).await?;
    println!("{}", output);

    Ok(())
}
