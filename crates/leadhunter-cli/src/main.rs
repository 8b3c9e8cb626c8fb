//! `leadhunter` command-line front end.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use leadhunter_core::{rewrite_query, Category, HistorySink, Language, Verdict};
use leadhunter_runtime::{
    Credentials, CsvHistoryLog, MemoryHistory, RuntimeConfig, ValidationInput, ValidationPipeline,
    ValidationReport,
};

const TABLE_HEADER: &str = "URL | Found | Evidence | Notes";

#[derive(Parser)]
#[command(name = "leadhunter")]
#[command(about = "Validate leads against evidence collected from the web")]
#[command(version)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect evidence for a set of URLs and produce a verdict per URL
    Validate {
        /// Answer language: pt, en, es, fr
        #[arg(long, default_value = "pt")]
        lang: String,

        /// jobs, growth, product, competitor or freeform
        #[arg(long, default_value = "freeform")]
        category: String,

        /// Free-text context passed to the evaluator
        #[arg(long, default_value = "")]
        context: String,

        /// URL to validate (repeatable)
        #[arg(long = "url")]
        urls: Vec<String>,

        /// File with one URL per line
        #[arg(long)]
        urls_file: Option<PathBuf>,

        /// CSV table with a `url` column
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Discover more URLs with this search query
        #[arg(long)]
        search: Option<String>,

        /// YAML configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// History log path (overrides the configuration)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Do not write to the history log
        #[arg(long)]
        no_history: bool,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print or export the validation history
    History {
        /// History log path (overrides the configuration)
        #[arg(long)]
        history: Option<PathBuf>,

        /// YAML configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Copy the log to this file instead of printing it
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the category-biased search query
    Rewrite {
        #[arg(long, default_value = "freeform")]
        category: String,

        query: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose { "leadhunter=debug" } else { "leadhunter=info" };
    let filter = match std::env::var("RUST_LOG") {
        Ok(value) if !value.trim().is_empty() => EnvFilter::try_new(value)?,
        _ => EnvFilter::try_new(default)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialize logging")
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Validate {
            lang,
            category,
            context,
            urls,
            urls_file,
            csv,
            search,
            config,
            history,
            no_history,
            json,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(path) = history {
                config.history_path = path;
            }

            let mut manual = urls;
            if let Some(path) = urls_file {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read URL list {}", path.display()))?;
                manual.push(text);
            }

            let language = Language::from_tag(&lang);
            let mut input = ValidationInput::new(language, Category::from_tag(&category))
                .with_context(context)
                .with_manual_urls(manual.join("\n"))
                .with_auto_search(search.unwrap_or_default());

            if let Some(path) = csv {
                input = match std::fs::read(&path) {
                    Ok(data) => input.with_url_table(data),
                    Err(e) => input.with_unreadable_url_table(e.to_string()),
                };
            }

            let mut builder = ValidationPipeline::builder()
                .credentials(Credentials::from_env())
                .config(config);
            if no_history {
                builder = builder.history(Arc::new(MemoryHistory::new()) as Arc<dyn HistorySink>);
            }
            let pipeline = builder.build().context("failed to set up validation")?;

            let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
            let report = runtime.block_on(pipeline.validate(input));

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            if json {
                serde_json::to_writer_pretty(&mut out, &report)?;
                writeln!(out)?;
            } else {
                write!(out, "{}", render_report(&report))?;
            }
            Ok(())
        }

        Commands::History {
            history,
            config,
            output,
        } => {
            let config = load_config(config.as_deref())?;
            let log = CsvHistoryLog::new(history.unwrap_or(config.history_path));

            match output {
                Some(path) => {
                    let mut file = std::fs::File::create(&path)
                        .with_context(|| format!("failed to create {}", path.display()))?;
                    log.export_to(&mut file)?;
                    tracing::info!(path = %path.display(), "History exported");
                }
                None => {
                    let stdout = std::io::stdout();
                    log.export_to(&mut stdout.lock())?;
                }
            }
            Ok(())
        }

        Commands::Rewrite { category, query } => {
            println!("{}", rewrite_query(&query, Category::from_tag(&category)));
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<RuntimeConfig> {
    match path {
        Some(path) => RuntimeConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(RuntimeConfig::default()),
    }
}

/// Human-readable report: optional notice, then the row table or free text.
fn render_report(report: &ValidationReport) -> String {
    let mut out = String::new();

    if let Some(notice) = &report.notice {
        out.push_str(notice);
        out.push_str("\n\n");
    }

    match &report.verdict {
        Verdict::Rows(rows) => {
            out.push_str(TABLE_HEADER);
            out.push('\n');
            for row in rows {
                out.push_str(&row.to_line());
                out.push('\n');
            }
        }
        Verdict::FreeText(text) => {
            out.push_str(text);
            out.push('\n');
        }
    }

    out
}
