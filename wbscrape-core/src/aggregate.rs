use crate::error::Result;
use crate::{ProgressCallback, report};
use tracing::{debug, info};
use wbscrape_client::{ClientError, ListingTarget, Product, WbClient};

/// Hard cap on the number of listing pages requested per run
pub const MAX_PAGES: u32 = 100;

/// Anything that can produce one page of products for a listing target
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn fetch_page(
        &self,
        target: &ListingTarget,
        page: u32,
    ) -> std::result::Result<Vec<Product>, ClientError>;
}

impl PageSource for WbClient {
    async fn fetch_page(
        &self,
        target: &ListingTarget,
        page: u32,
    ) -> std::result::Result<Vec<Product>, ClientError> {
        self.fetch_listing_page(target, page).await
    }
}

/// Collect products page by page until an empty page or [`MAX_PAGES`].
///
/// Pages are requested strictly in order. Source errors are returned as-is.
pub async fn aggregate_products<S: PageSource>(
    source: &S,
    target: &ListingTarget,
    progress: Option<&ProgressCallback>,
) -> Result<Vec<Product>> {
    let mut products = Vec::new();

    for page in 1..=MAX_PAGES {
        report(progress, format!("Fetching products from page {}", page));

        let batch = source.fetch_page(target, page).await?;
        if batch.is_empty() {
            debug!("Page {} is empty, stopping", page);
            report(progress, "Loading of products completed".to_string());
            break;
        }

        report(progress, format!("Added products: {}", batch.len()));
        products.extend(batch);
    }

    info!("Aggregated {} products", products.len());
    Ok(products)
}
