use crate::endpoints::{Endpoints, ListingTarget};
use crate::error::{ClientError, Result};
use crate::product::{ListingPage, Product, SalesEntry};
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const USER_AGENT: &str = "Chrome/51.0.2704.103 Safari/537.36";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Settings for building a [`WbClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoints: Endpoints,
    /// Limit on establishing a connection; running into it is a `ConnectTimeout`
    pub connect_timeout_secs: u64,
    /// Optional limit on a whole request. Unset means wait for the response.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            timeout_secs: None,
        }
    }
}

pub struct WbClient {
    client: Client,
    endpoints: Endpoints,
}

impl WbClient {
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));

        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs.max(1)))
            .redirect(reqwest::redirect::Policy::limited(5));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs.max(1)));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            endpoints: config.endpoints,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Downloads the category tree as the raw JSON document.
    ///
    /// Decoding is left to the caller; the tree can be nested deeper than
    /// the default JSON recursion limit allows.
    pub async fn fetch_catalog(&self) -> Result<String> {
        let url = Url::parse(&self.endpoints.catalog_url).map_err(|e| {
            ClientError::InvalidUrl(format!("{}: {}", self.endpoints.catalog_url, e))
        })?;
        self.get_text(url).await
    }

    /// Fetches one listing page and maps its cards into products.
    pub async fn fetch_listing_page(
        &self,
        target: &ListingTarget,
        page: u32,
    ) -> Result<Vec<Product>> {
        let url = self.endpoints.listing_page_url(target, page)?;
        let listing: ListingPage = self.get_json(url).await?;

        Ok(listing
            .data
            .products
            .into_iter()
            .map(|card| Product::from_card(card, &self.endpoints))
            .collect())
    }

    /// Looks up how many units of an article were sold.
    pub async fn fetch_sold_count(&self, article_id: u64) -> Result<u64> {
        let url = self.endpoints.sales_url(article_id)?;
        let entries: Vec<SalesEntry> = self.get_json(url).await?;

        entries.first().map(|entry| entry.qnt).ok_or_else(|| {
            ClientError::UnexpectedResponse(format!(
                "empty sales response for article {}",
                article_id
            ))
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let body = self.get_text(url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_text(&self, url: Url) -> Result<String> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ClientError::from_transport)?
            .error_for_status()?;

        response.text().await.map_err(ClientError::from_transport)
    }
}
