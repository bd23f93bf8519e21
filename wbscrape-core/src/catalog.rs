// Category tree flattening, lookup and the on-disk catalog cache

use crate::error::Result;
use crate::model::{CategoryNode, FlatCategory};
use chrono::{DateTime, Local, NaiveDate};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};
use wbscrape_client::WbClient;

/// Flatten a category tree into pre-order.
///
/// A node lacking any of `name`, `url`, `shard` or `query` is dropped together
/// with its whole subtree. Traversal keeps its own stack of sibling iterators,
/// so arbitrarily deep trees do not grow the call stack.
pub fn flatten_catalog(nodes: &[CategoryNode]) -> Vec<FlatCategory> {
    let mut flat = Vec::new();
    let mut stack = vec![nodes.iter()];

    while let Some(siblings) = stack.last_mut() {
        let Some(node) = siblings.next() else {
            stack.pop();
            continue;
        };

        let Some(category) = node.to_flat() else {
            continue;
        };
        flat.push(category);

        if let Some(children) = &node.children {
            stack.push(children.iter());
        }
    }

    flat
}

/// Find a category by exact name or by URL (with or without the site origin).
///
/// The first match in traversal order wins.
pub fn resolve_category<'a>(
    catalog: &'a [FlatCategory],
    input: &str,
    site_origin: &str,
) -> Option<&'a FlatCategory> {
    let url_suffix = strip_site_origin(input, site_origin);
    catalog
        .iter()
        .find(|category| category.url == url_suffix || category.name == input)
}

/// Returns the text after the last occurrence of `site_origin`, or the whole
/// input when the origin does not occur.
pub fn strip_site_origin<'a>(input: &'a str, site_origin: &str) -> &'a str {
    if site_origin.is_empty() {
        return input;
    }
    input.rsplit(site_origin).next().unwrap_or(input)
}

/// A cache file is stale when it is missing or was last written before `run_date`.
pub fn is_cache_stale(path: &Path, run_date: NaiveDate) -> io::Result<bool> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(true),
        Err(e) => return Err(e),
    };

    let modified: DateTime<Local> = metadata.modified()?.into();
    Ok(modified.date_naive() < run_date)
}

/// Load the category tree, refreshing the cache file first when it is stale.
pub async fn load_catalog(
    client: &WbClient,
    cache_path: &Path,
    run_date: NaiveDate,
) -> Result<Vec<CategoryNode>> {
    if !is_cache_stale(cache_path, run_date)? {
        debug!("Using cached catalog {}", cache_path.display());
        return read_catalog_cache(cache_path);
    }

    info!("Catalog cache {} is stale, downloading", cache_path.display());
    let raw = client.fetch_catalog().await?;
    // Only a document that decodes is cached
    let nodes = parse_catalog(&raw)?;
    write_catalog_cache(cache_path, &raw)?;
    Ok(nodes)
}

pub fn write_catalog_cache(path: &Path, raw: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, raw)?;
    Ok(())
}

pub fn read_catalog_cache(path: &Path) -> Result<Vec<CategoryNode>> {
    let content = fs::read_to_string(path)?;
    parse_catalog(&content)
}

/// Decode a catalog document of any nesting depth.
///
/// serde_json stops at 128 levels by default; the limit is lifted and the
/// stack is grown on demand instead.
pub fn parse_catalog(content: &str) -> Result<Vec<CategoryNode>> {
    let mut deserializer = serde_json::Deserializer::from_str(content);
    deserializer.disable_recursion_limit();
    let nodes = Vec::<CategoryNode>::deserialize(serde_stacker::Deserializer::new(
        &mut deserializer,
    ))?;
    deserializer.end()?;
    Ok(nodes)
}
