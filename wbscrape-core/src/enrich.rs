use crate::error::Result;
use crate::{ProgressCallback, report};
use tracing::warn;
use wbscrape_client::{ClientError, Product, SoldCount, WbClient};

/// Per-article sales lookup
#[allow(async_fn_in_trait)]
pub trait SalesSource {
    async fn sold_count(&self, article_id: u64) -> std::result::Result<u64, ClientError>;
}

impl SalesSource for WbClient {
    async fn sold_count(&self, article_id: u64) -> std::result::Result<u64, ClientError> {
        self.fetch_sold_count(article_id).await
    }
}

/// Look up one article. Only a connect timeout turns into `NoData`; any other
/// failure is returned to the caller.
pub async fn lookup_sold_count<S: SalesSource>(
    source: &S,
    article_id: u64,
) -> std::result::Result<SoldCount, ClientError> {
    match source.sold_count(article_id).await {
        Ok(count) => Ok(SoldCount::Count(count)),
        Err(ClientError::ConnectTimeout(reason)) => {
            warn!("Sales lookup for {} timed out: {}", article_id, reason);
            Ok(SoldCount::NoData)
        }
        Err(e) => Err(e),
    }
}

/// Attach a sold-count to every product, in order.
pub async fn enrich_sales<S: SalesSource>(
    source: &S,
    products: Vec<Product>,
    progress: Option<&ProgressCallback>,
) -> Result<Vec<Product>> {
    let total = products.len();
    let mut enriched = Vec::with_capacity(total);

    for (idx, product) in products.into_iter().enumerate() {
        let sold_count = lookup_sold_count(source, product.article_id).await?;
        enriched.push(product.with_sold_count(sold_count));
        report(
            progress,
            format!("Collected cards: {} out of {}", idx + 1, total),
        );
    }

    Ok(enriched)
}
