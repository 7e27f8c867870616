//! Mauka Phrase - command line entrypoint.
//!
//! Loads configuration, initializes logging, and runs phrase scans over text
//! files or stdin.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use mauka_phrase_lib::config::{ConfigLoader, LogConfig, MaukaPhraseConfig};
use mauka_phrase_lib::error::{ErrorContext, MaukaResult};
use mauka_phrase_lib::logging::init_logging;
use mauka_phrase_lib::search::{group_by_text, MatchGroup, PhraseSearcher};

/// Command line arguments for Mauka Phrase.
#[derive(Parser, Debug)]
#[clap(name = "mauka_phrase", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Find every phrase occurrence in a text
    Scan {
        /// File with one phrase per line
        #[clap(short, long, value_parser)]
        phrases: PathBuf,

        /// Text to scan (stdin when omitted)
        #[clap(short, long, value_parser)]
        text: Option<PathBuf>,

        /// Output format
        #[clap(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// How scan results are printed.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// One line per matched text with its character spans
    Text,
    /// JSON array of matched texts and spans
    Json,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<MaukaPhraseConfig> {
    let loader = ConfigLoader::with_default_path(path);
    loader.load().with_context(|| match loader.config_path() {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to load configuration".to_string(),
    })
}

fn read_phrases(path: &Path) -> MaukaResult<Vec<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

fn read_text(path: Option<&Path>) -> MaukaResult<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn render(groups: &[MatchGroup<'_>], format: OutputFormat) -> MaukaResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(groups)?),
        OutputFormat::Text => Ok(groups
            .iter()
            .map(|group| {
                let spans: Vec<String> = group
                    .spans
                    .iter()
                    .map(|(start, end)| format!("({start}, {end})"))
                    .collect();
                format!("{}: {}", group.text, spans.join(", "))
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn scan(
    config: &MaukaPhraseConfig,
    phrases: &Path,
    text: Option<&Path>,
    format: OutputFormat,
) -> MaukaResult<String> {
    let phrase_texts = read_phrases(phrases)?;
    let text = read_text(text)?;

    let mut searcher = PhraseSearcher::<String>::from_config(config)?;
    let loaded = searcher.load_texts(&phrase_texts)?;
    let hits = searcher.find_all(&text)?;
    let groups = group_by_text(&hits);
    info!(
        phrases = loaded,
        matches = hits.len(),
        distinct = groups.len(),
        "Scan complete"
    );

    render(&groups, format)
}

/// Main entry point for the application.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Scan {
            phrases,
            text,
            format,
        } => {
            let config = load_config(args.config.as_deref())?;
            init_logging(&config.log)?;

            match scan(&config, &phrases, text.as_deref(), format) {
                Ok(output) => {
                    if !output.is_empty() {
                        println!("{output}");
                    }
                    Ok(())
                }
                Err(error) => {
                    let context = ErrorContext::new(error, "scan")
                        .with_details(format!("phrases: {}", phrases.display()));
                    context.report();
                    bail!("{context}")
                }
            }
        }
        Command::Validate => {
            let config = load_config(args.config.as_deref())?;
            init_logging(&config.log)?;
            info!(
                tokenizer = ?config.tokenizer.kind,
                policy = ?config.matcher.compile_policy,
                "Configuration validated successfully"
            );
            Ok(())
        }
        Command::GenConfig { output } => {
            init_logging(&LogConfig::default())?;
            let toml = MaukaPhraseConfig::default().to_toml()?;

            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(&output, toml)
                .with_context(|| format!("Failed to write {}", output.display()))?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}
