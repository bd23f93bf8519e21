use crate::aggregate::aggregate_products;
use crate::catalog::{flatten_catalog, load_catalog, resolve_category};
use crate::enrich::enrich_sales;
use crate::error::{CoreError, Result};
use crate::export::export_products;
use crate::{ProgressCallback, report};
use chrono::{Local, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use wbscrape_client::{ListingTarget, WbClient};

/// Which flow a run takes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeMode {
    /// A catalog category, given by its exact name or its URL
    Category(String),
    /// A free-text search keyword
    Search(String),
}

/// Options for configuring a scrape run
pub struct ScrapeOptions {
    pub mode: ScrapeMode,
    pub output_dir: PathBuf,
    pub cache_path: PathBuf,
    pub run_date: NaiveDate,
    pub show_progress_bars: bool,
}

impl ScrapeOptions {
    pub fn new(mode: ScrapeMode) -> Self {
        Self {
            mode,
            output_dir: PathBuf::from("."),
            cache_path: PathBuf::from("catalog.json"),
            run_date: Local::now().date_naive(),
            show_progress_bars: false,
        }
    }
}

/// Outcome of a finished run
#[derive(Debug, Clone)]
pub struct ScrapeSummary {
    pub base_name: String,
    pub product_count: usize,
    pub output_path: PathBuf,
}

/// Work out the export base name and listing target for a run.
///
/// For a category run this loads the catalog (through the cache), flattens it
/// and resolves the user's input. An unresolved category is an error.
pub async fn prepare_target(
    client: &WbClient,
    options: &ScrapeOptions,
    progress: Option<&ProgressCallback>,
) -> Result<(String, ListingTarget)> {
    match &options.mode {
        ScrapeMode::Category(input) => {
            let nodes = load_catalog(client, &options.cache_path, options.run_date).await?;
            report(
                progress,
                format!("Catalog saved: {}", options.cache_path.display()),
            );

            let flat = flatten_catalog(&nodes);
            info!("Catalog flattened into {} categories", flat.len());

            let category = resolve_category(&flat, input, &client.endpoints().site_origin)
                .ok_or_else(|| CoreError::CategoryNotFound(input.clone()))?;
            report(progress, format!("Found category: {}", category.name));

            Ok((
                category.name.clone(),
                ListingTarget::Category {
                    shard: category.shard.clone(),
                    query: category.query.clone(),
                },
            ))
        }
        ScrapeMode::Search(keyword) => Ok((
            keyword.clone(),
            ListingTarget::Search {
                keyword: keyword.clone(),
            },
        )),
    }
}

/// Run the whole pipeline: resolve, paginate, enrich, export.
pub async fn execute_scrape(
    client: &WbClient,
    options: ScrapeOptions,
    progress_callback: Option<ProgressCallback>,
) -> Result<ScrapeSummary> {
    let (base_name, target) = prepare_target(client, &options, progress_callback.as_ref()).await?;

    // Pagination
    let spinner = options.show_progress_bars.then(new_spinner);
    let page_progress = progress_sink(progress_callback.clone(), spinner.clone(), false);
    let products = aggregate_products(client, &target, page_progress.as_ref()).await?;
    if let Some(ref pb) = spinner {
        pb.finish_with_message(format!("Loaded {} products", products.len()));
    }

    // Enrichment
    let bar = options
        .show_progress_bars
        .then(|| new_bar(products.len() as u64));
    let enrich_progress = progress_sink(progress_callback.clone(), bar.clone(), true);
    let products = enrich_sales(client, products, enrich_progress.as_ref()).await?;
    if let Some(ref pb) = bar {
        pb.finish_with_message("sales collected");
    }

    let output_path =
        export_products(&products, &options.output_dir, &base_name, options.run_date)?;
    report(
        progress_callback.as_ref(),
        format!("Data saved to {}", output_path.display()),
    );

    Ok(ScrapeSummary {
        base_name,
        product_count: products.len(),
        output_path,
    })
}

fn new_spinner() -> Arc<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Starting...");
    Arc::new(pb)
}

fn new_bar(len: u64) -> Arc<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    Arc::new(pb)
}

/// Pick the sink for per-page or per-card messages.
///
/// A progress bar takes precedence over the caller's callback. With `advance`
/// set every message moves the bar one step, otherwise the message replaces
/// the bar's text.
fn progress_sink(
    callback: Option<ProgressCallback>,
    bar: Option<Arc<ProgressBar>>,
    advance: bool,
) -> Option<ProgressCallback> {
    let Some(pb) = bar else {
        return callback;
    };

    let to_bar: ProgressCallback = Arc::new(move |msg: String| {
        if advance {
            pb.inc(1);
        } else {
            pb.set_message(msg);
            pb.tick();
        }
    });
    Some(to_bar)
}
