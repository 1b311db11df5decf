// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use nyayasetu::app_config::{Config, LogLevel};
use nyayasetu::database::CategoryRepository;
use nyayasetu::pipeline::RequestPipeline;
use nyayasetu::providers::{HttpClassifier, HttpDetector, HttpTranslator};
use nyayasetu::server::{self, AppState};
use nyayasetu::taxonomy::Taxonomy;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the classification HTTP service (default command)
    Serve(ServeArgs),

    /// Import section records from a JSON seed file into the store
    Import(ImportArgs),

    /// Generate shell completions for nyayasetu
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Bind host, overrides the config file
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overrides the config file
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Parser, Debug)]
struct ImportArgs {
    /// Path to a JSON file containing an array of section records
    #[arg(value_name = "SEED_FILE")]
    seed_file: PathBuf,
}

/// NyayaSetu - Legal complaint classification service
///
/// Classifies free-text legal complaints (English or Hindi) against a fixed
/// taxonomy of Indian Penal Code categories and returns the matching
/// section records, bilingually for Hindi input.
#[derive(Parser, Debug)]
#[command(name = "nyayasetu")]
#[command(version = "0.1.0")]
#[command(about = "Legal complaint classification service")]
#[command(long_about = "NyayaSetu classifies legal complaints against Indian Penal Code \
categories using zero-shot classification, with automatic Hindi handling.

EXAMPLES:
    nyayasetu serve                         # Serve using conf.json
    nyayasetu serve --port 8080             # Override the bind port
    nyayasetu import data/ipc_sections.json # Load section records into the store
    nyayasetu completions bash              # Generate bash completions

CONFIGURATION:
    Configuration is read from conf.json by default. You can specify a
    different file with --config. Missing fields fall back to defaults.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
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
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
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
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
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
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let shell = *shell;
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "nyayasetu", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::from_file_or_default(&cli.config_path)
        .with_context(|| format!("Failed to load configuration from {}", cli.config_path))?;

    // CLI flag wins over the config file
    let log_level = cli
        .log_level
        .map(LogLevel::from)
        .unwrap_or_else(|| config.log_level.clone());
    log::set_max_level(log_level.to_level_filter());

    match cli.command {
        Some(Commands::Import(args)) => run_import(config, args).await,
        Some(Commands::Serve(args)) => run_serve(config, args).await,
        None => {
            run_serve(
                config,
                ServeArgs {
                    host: None,
                    port: None,
                },
            )
            .await
        }
        Some(Commands::Completions { .. }) => unreachable!("handled above"),
    }
}

async fn run_serve(config: Config, args: ServeArgs) -> Result<()> {
    info!("Starting nyayasetu");

    let taxonomy = Taxonomy::from_file(&config.pipeline.taxonomy_path)?;
    info!(
        "Loaded taxonomy with {} categories from {}",
        taxonomy.len(),
        config.pipeline.taxonomy_path
    );

    let repository = CategoryRepository::open(&config.store.database_path)?;
    match repository.count().await {
        Ok(count) => info!("Section store holds {} record(s)", count),
        Err(e) => info!("Could not count section records: {}", e),
    }

    let pipeline = RequestPipeline::new(
        Arc::new(HttpDetector::new(&config.detector)),
        Arc::new(HttpTranslator::new(&config.translator)),
        Arc::new(HttpClassifier::new(&config.classifier)),
        repository,
        taxonomy,
        config.pipeline.score_threshold,
    );

    let state = Arc::new(AppState {
        pipeline,
        request_timeout: Duration::from_secs(config.server.request_timeout_secs),
    });

    let host = args.host.unwrap_or(config.server.host);
    let port = args.port.unwrap_or(config.server.port);

    server::serve(state, &host, port).await
}

async fn run_import(config: Config, args: ImportArgs) -> Result<()> {
    let repository = CategoryRepository::open(&config.store.database_path)?;
    let imported = repository.import_records(&args.seed_file).await?;
    info!(
        "Imported {} record(s) into {}",
        imported, config.store.database_path
    );
    Ok(())
}
