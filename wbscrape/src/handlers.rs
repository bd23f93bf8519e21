use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::ArgMatches;
use colored::Colorize;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wbscrape_client::client::DEFAULT_CONNECT_TIMEOUT_SECS;
use wbscrape_client::{ClientConfig, WbClient};
use wbscrape_core::ProgressCallback;
use wbscrape_core::scrape::{ScrapeMode, ScrapeOptions, ScrapeSummary, execute_scrape};

pub const MODE_PROMPT: &str = "Enter 1 for parsing the whole category, 2 - for keyword-based parsing:";
pub const CATEGORY_PROMPT: &str = "Enter the category name or URL:";
pub const SEARCH_PROMPT: &str = "Enter search query:";

/// Settings shared by every flow, read from the command line
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub quiet: bool,
    pub output_dir: PathBuf,
    pub cache_path: PathBuf,
    pub connect_timeout_secs: u64,
    pub timeout_secs: Option<u64>,
    pub show_progress_bars: bool,
}

impl RunSettings {
    pub fn from_args(args: &ArgMatches) -> Self {
        let output_dir = args
            .get_one::<String>("output-dir")
            .map(|dir| expand_path(dir))
            .unwrap_or_else(|| PathBuf::from("."));
        let cache_path = args
            .get_one::<String>("cache-file")
            .map(|file| expand_path(file))
            .unwrap_or_else(|| default_cache_path(&output_dir));

        Self {
            quiet: args.get_flag("quiet"),
            output_dir,
            cache_path,
            connect_timeout_secs: args
                .get_one::<u64>("connect-timeout")
                .copied()
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
            timeout_secs: args.get_one::<u64>("timeout").copied(),
            show_progress_bars: !args.get_flag("no-progress"),
        }
    }
}

/// The two top-level flows offered by the interactive prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Category,
    Search,
}

pub fn parse_mode(input: &str) -> Option<Mode> {
    match input.trim() {
        "1" => Some(Mode::Category),
        "2" => Some(Mode::Search),
        _ => None,
    }
}

pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

pub fn default_cache_path(output_dir: &Path) -> PathBuf {
    output_dir.join("catalog.json")
}

/// Strip the line terminator only; inner and leading whitespace is significant.
pub fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

pub fn print_banner() {
    print_divider();
    println!("{}", "  WBSCRAPE".bright_white().bold());
    println!(
        "  {}",
        "Wildberries catalog & listing exporter".bright_blue()
    );
    print_divider();
    println!();
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

fn prompt(msg: &str) -> Result<String> {
    print!("{} ", msg.bright_cyan().bold());
    io::stdout().flush()?;

    let mut response = String::new();
    let read = io::stdin().lock().read_line(&mut response)?;
    if read == 0 {
        bail!("no input provided");
    }
    Ok(strip_line_ending(&response).to_string())
}

fn require_input(value: String, what: &str) -> Result<String> {
    if value.trim().is_empty() {
        bail!("{} must not be empty", what);
    }
    Ok(value)
}

pub async fn handle_interactive(settings: &RunSettings) -> Result<()> {
    let answer = prompt(MODE_PROMPT)?;
    match parse_mode(&answer) {
        Some(Mode::Category) => handle_category(settings, None).await,
        Some(Mode::Search) => handle_search(settings, None).await,
        None => bail!("unknown mode '{}', expected 1 or 2", answer.trim()),
    }
}

pub async fn handle_category(settings: &RunSettings, name_or_url: Option<String>) -> Result<()> {
    let input = match name_or_url {
        Some(input) => input,
        None => prompt(CATEGORY_PROMPT)?,
    };
    let input = require_input(input, "category name or URL")?;
    run_scrape(settings, ScrapeMode::Category(input)).await
}

pub async fn handle_search(settings: &RunSettings, keyword: Option<String>) -> Result<()> {
    let keyword = match keyword {
        Some(keyword) => keyword,
        None => prompt(SEARCH_PROMPT)?,
    };
    let keyword = require_input(keyword, "search query")?;
    run_scrape(settings, ScrapeMode::Search(keyword)).await
}

async fn run_scrape(settings: &RunSettings, mode: ScrapeMode) -> Result<()> {
    fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            settings.output_dir.display()
        )
    })?;

    let client = WbClient::with_config(ClientConfig {
        connect_timeout_secs: settings.connect_timeout_secs,
        timeout_secs: settings.timeout_secs,
        ..ClientConfig::default()
    })
    .context("failed to build HTTP client")?;

    let options = ScrapeOptions {
        mode,
        output_dir: settings.output_dir.clone(),
        cache_path: settings.cache_path.clone(),
        run_date: Local::now().date_naive(),
        show_progress_bars: settings.show_progress_bars,
    };
    info!("Starting {:?}", options.mode);

    let summary = execute_scrape(&client, options, Some(progress_printer(settings.quiet))).await?;
    print_summary(&summary, settings.quiet);
    Ok(())
}

fn progress_printer(quiet: bool) -> ProgressCallback {
    Arc::new(move |msg: String| {
        if !quiet {
            println!("{} {}", "→".blue(), msg);
        }
    })
}

fn print_summary(summary: &ScrapeSummary, quiet: bool) {
    if quiet {
        println!("{}", summary.output_path.display());
        return;
    }

    println!();
    print_divider();
    println!("{}", "  EXPORT COMPLETE".green().bold());
    print_divider();
    println!(
        "{} Source: {}",
        "✓".green().bold(),
        summary.base_name.bright_white()
    );
    println!(
        "{} Products: {}",
        "✓".green().bold(),
        summary.product_count.to_string().cyan()
    );
    println!(
        "{} File: {}",
        "✓".green().bold(),
        summary.output_path.display().to_string().bright_white()
    );
    println!();
}
