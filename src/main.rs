// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug};
use std::io::Write;
use std::path::PathBuf;

use pollingo::app_config::{self, Config};
use pollingo::app_controller::Controller;
use pollingo::language_utils::LanguageCatalog;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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

/// Language options shared by the translation commands
#[derive(Args, Debug)]
struct LanguageArgs {
    /// Target language code (e.g., 'fr', 'de', 'pt-br')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Source language code (e.g., 'en')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Context applied to every string
    #[arg(long)]
    context: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a single text and print the result
    Text {
        /// Text to translate
        #[arg(value_name = "TEXT")]
        text: String,

        #[command(flatten)]
        languages: LanguageArgs,
    },

    /// Translate a JSON document of string groups
    File {
        /// JSON file of the form {"group": {"key": "text"}}
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Output file, or directory receiving <name>.<lang>.json
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        languages: LanguageArgs,
    },

    /// List supported language codes
    Languages,

    /// Generate shell completions for pollingo
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Pollingo - structured string translation with LLMs
///
/// Translates named groups of keyed strings through an OpenAI-compatible
/// chat-completions API.
#[derive(Parser, Debug)]
#[command(name = "pollingo")]
#[command(version)]
#[command(about = "LLM-powered string translation tool")]
#[command(long_about = "Pollingo translates keyed strings with OpenAI-compatible chat-completion APIs.

EXAMPLES:
    pollingo text \"Hello\" -t fr                     # Translate one text to French
    pollingo text \"Save\" -t de --context \"Button\"   # Translate with a context hint
    pollingo file messages.json -t es -o out/       # Write out/messages.es.json
    pollingo languages                              # List language codes
    pollingo completions bash > pollingo.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in pollingo.json by default. If the file doesn't
    exist, a default one is created. OPENAI_API_KEY, OPENAI_MODEL and
    OPENAI_BASE_URL override the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "pollingo.json", global = true)]
    config_path: PathBuf,

    /// Model name to use for translation
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
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

    // @initializes: Global logger; `log::set_max_level` adjusts verbosity later
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour code for log level
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
            let _ = writeln!(
                std::io::stderr(),
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
    // Start at info level; the config or --log-level adjusts it below
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(level) = cli.log_level {
        log::set_max_level(app_config::LogLevel::from(level).to_level_filter());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "pollingo", &mut std::io::stdout());
            Ok(())
        }
        Commands::Languages => {
            let catalog = LanguageCatalog::global()?;
            let mut stdout = std::io::stdout();
            for (code, name) in catalog.languages() {
                writeln!(stdout, "{:<6} {}", code, name)?;
            }
            Ok(())
        }
        Commands::Text { ref text, ref languages } => {
            let controller = build_controller(&cli, languages)?;
            let translated = controller.translate_text(text).await?;
            println!("{}", translated);
            Ok(())
        }
        Commands::File {
            ref input_path,
            ref output,
            ref languages,
        } => {
            let controller = build_controller(&cli, languages)?;
            let json = controller
                .translate_file(input_path, output.as_deref())
                .await?;
            if output.is_none() {
                println!("{}", json);
            }
            Ok(())
        }
    }
}

/// Load the configuration, apply overrides and build the controller
fn build_controller(cli: &CommandLineOptions, languages: &LanguageArgs) -> Result<Controller> {
    let mut config = Config::load_or_create(&cli.config_path)?;
    config.apply_env_overrides();

    if let Some(model) = &cli.model {
        config.translation.model = model.clone();
    }
    if let Some(source_lang) = &languages.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &languages.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(context) = &languages.context {
        config.global_context = Some(context.clone());
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    debug!(
        "Using {} with model {}",
        config.translation.provider.display_name(),
        config.translation.get_model()
    );

    Controller::with_config(config)
}
