//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use storyfreq_core::{ProgressReporter, RunResult};
use storyfreq_shared::{AppConfig, RunConfig, init_config, load_config, load_config_from};

/// Entries listed by a dry run.
const DRY_RUN_PREVIEW: usize = 20;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// storyfreq: mine story articles for deck vocabulary.
#[derive(Parser)]
#[command(
    name = "storyfreq",
    version,
    about = "Add frequent MTG story words to a vocabulary deck.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.storyfreq/storyfreq.toml.
    #[arg(long, env = "STORYFREQ_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Mine the story corpus and add new entries to a deck.
    Run(RunArgs),

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Flags for `storyfreq run`. Each one overrides the config file.
#[derive(Args, Debug)]
pub(crate) struct RunArgs {
    /// Deck JSON file to update.
    #[arg(long, env = "STORYFREQ_DECK")]
    pub deck: PathBuf,

    /// Index pages to scan.
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Entries to add.
    #[arg(long)]
    pub add_count: Option<usize>,

    /// Minimum corpus frequency.
    #[arg(long)]
    pub min_freq: Option<u64>,

    /// Stop dictionary lookups once this many entries are accepted.
    #[arg(long)]
    pub lookup_limit: Option<usize>,

    /// Dictionary request timeout in seconds.
    #[arg(long)]
    pub dict_timeout: Option<u64>,

    /// Pause after each dictionary request, in milliseconds.
    #[arg(long)]
    pub dict_sleep_ms: Option<u64>,

    /// Remove previously generated entries before adding the new batch.
    #[arg(long)]
    pub replace_webfreq: bool,

    /// Show what would be added without writing the deck.
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    /// Overlay these flags on the file config.
    pub fn to_run_config(&self, config: &AppConfig) -> RunConfig {
        let mut run = RunConfig::new(&self.deck, config);
        if let Some(n) = self.max_pages {
            run.corpus.max_pages = n;
        }
        if let Some(n) = self.add_count {
            run.curation.add_count = n;
        }
        if let Some(n) = self.min_freq {
            run.curation.min_freq = n;
        }
        if let Some(n) = self.lookup_limit {
            run.dictionary.lookup_limit = n;
        }
        if let Some(secs) = self.dict_timeout {
            run.dictionary.timeout_secs = secs;
        }
        if let Some(ms) = self.dict_sleep_ms {
            run.dictionary.sleep_ms = ms;
        }
        run.replace_synthetic = self.replace_webfreq;
        run.dry_run = self.dry_run;
        run
    }
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "storyfreq=info",
        1 => "storyfreq=debug",
        _ => "storyfreq=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Run(args) => cmd_run(&args, config_path).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_run(args: &RunArgs, config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let run_config = args.to_run_config(&config);

    info!(
        deck = %run_config.deck_path.display(),
        max_pages = run_config.corpus.max_pages,
        add_count = run_config.curation.add_count,
        replace = run_config.replace_synthetic,
        dry_run = run_config.dry_run,
        "starting run"
    );

    let reporter = CliProgress::new();
    let result = storyfreq_core::run(&run_config, &reporter)
        .await
        .wrap_err_with(|| format!("run failed for deck {}", run_config.deck_path.display()))?;

    print_summary(&result);
    Ok(())
}

fn print_summary(result: &RunResult) {
    println!();
    if result.dry_run {
        println!("  Dry run: {} entries prepared, deck not written.", result.added.len());
        for entry in result.added.iter().take(DRY_RUN_PREVIEW) {
            println!("  - {} ({})", entry.term, entry.pos.as_deref().unwrap_or("?"));
        }
        if result.added.len() > DRY_RUN_PREVIEW {
            println!("  ... and {} more", result.added.len() - DRY_RUN_PREVIEW);
        }
    } else {
        println!("  Deck updated: {}", result.deck_path.display());
    }
    println!("  Stories:    {} found, {} read, {} skipped", result.discovered, result.processed, result.skipped);
    println!("  Candidates: {}", result.candidates);
    println!("  Added:      {}", result.added.len());
    println!("  Removed:    {}", result.removed);
    println!("  Total:      {}", result.total_entries);
    println!("  Time:       {:.1}s", result.elapsed.as_secs_f64());
    println!();
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn document_processed(&self, url: &str, current: usize, total: usize) {
        self.spinner.set_message(format!("Reading [{current}/{total}] {url}"));
    }

    fn entry_prepared(&self, term: &str, current: usize, target: usize) {
        self.spinner.set_message(format!("Prepared [{current}/{target}] {term}"));
    }

    fn done(&self, _result: &RunResult) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}
