use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_CATALOG_URL: &str =
    "https://static-basket-01.wb.ru/vol0/data/main-menu-ru-ru-v2.json";
pub const DEFAULT_CATALOG_API: &str = "https://catalog.wb.ru";
pub const DEFAULT_SEARCH_API: &str = "https://search.wb.ru";
pub const DEFAULT_SALES_API: &str = "https://product-order-qnt.wildberries.ru";
pub const DEFAULT_SITE_ORIGIN: &str = "https://www.wildberries.ru";

const CATEGORY_DEST: &str = "-1075831,-77677,-398551,12358499";
const SEARCH_DEST: &str = "-1029256,-102269,-2162196,-1257786";

/// Base URLs of every upstream service the scraper talks to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub catalog_url: String,
    pub catalog_api: String,
    pub search_api: String,
    pub sales_api: String,
    pub site_origin: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            catalog_api: DEFAULT_CATALOG_API.to_string(),
            search_api: DEFAULT_SEARCH_API.to_string(),
            sales_api: DEFAULT_SALES_API.to_string(),
            site_origin: DEFAULT_SITE_ORIGIN.to_string(),
        }
    }
}

impl Endpoints {
    /// Points every API at one base URL. Used by tests against a mock server.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            catalog_url: format!("{}/vol0/data/main-menu-ru-ru-v2.json", base),
            catalog_api: base.to_string(),
            search_api: base.to_string(),
            sales_api: base.to_string(),
            site_origin: DEFAULT_SITE_ORIGIN.to_string(),
        }
    }

    pub fn listing_page_url(&self, target: &ListingTarget, page: u32) -> Result<Url> {
        match target {
            ListingTarget::Category { shard, query } => self.category_page_url(shard, query, page),
            ListingTarget::Search { keyword } => self.search_page_url(keyword, page),
        }
    }

    fn category_page_url(&self, shard: &str, query: &str, page: u32) -> Result<Url> {
        // `query` is an upstream fragment such as "cat=8126" and goes in verbatim
        let raw = format!(
            "{}/catalog/{}/catalog?appType=1&curr=rub&dest={}&page={}&reg=0&sort=popular&spp=0&{}",
            self.catalog_api.trim_end_matches('/'),
            shard,
            CATEGORY_DEST,
            page,
            query
        );
        Url::parse(&raw).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    fn search_page_url(&self, keyword: &str, page: u32) -> Result<Url> {
        let base = format!(
            "{}/exactmatch/ru/common/v4/search",
            self.search_api.trim_end_matches('/')
        );
        let page = page.to_string();
        // Runs of whitespace collapse to one space, ends are trimmed
        let keyword = keyword.split_whitespace().collect::<Vec<_>>().join(" ");
        Url::parse_with_params(
            &base,
            &[
                ("appType", "1"),
                ("curr", "rub"),
                ("dest", SEARCH_DEST),
                ("page", page.as_str()),
                ("pricemarginCoeff", "1.0"),
                ("query", keyword.as_str()),
                ("reg", "0"),
                ("resultset", "catalog"),
                ("sort", "popular"),
                ("spp", "0"),
            ],
        )
        .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base, e)))
    }

    pub fn sales_url(&self, article_id: u64) -> Result<Url> {
        let raw = format!(
            "{}/by-nm/?nm={}",
            self.sales_api.trim_end_matches('/'),
            article_id
        );
        Url::parse(&raw).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    pub fn product_link(&self, article_id: u64) -> String {
        format!(
            "{}/catalog/{}/detail.aspx",
            self.site_origin.trim_end_matches('/'),
            article_id
        )
    }
}

/// What a listing page is fetched for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingTarget {
    /// A catalog category, addressed by its upstream routing parameters
    Category { shard: String, query: String },
    /// A free-text keyword search
    Search { keyword: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_page_url_appends_query_verbatim() {
        let endpoints = Endpoints::default();
        let target = ListingTarget::Category {
            shard: "men_clothes".to_string(),
            query: "cat=8126".to_string(),
        };
        let url = endpoints.listing_page_url(&target, 3).unwrap();

        assert_eq!(url.host_str(), Some("catalog.wb.ru"));
        assert_eq!(url.path(), "/catalog/men_clothes/catalog");
        assert!(url.as_str().ends_with("&spp=0&cat=8126"));
        assert!(url.query_pairs().any(|(k, v)| k == "page" && v == "3"));
    }

    #[test]
    fn test_search_page_url_encodes_keyword() {
        let endpoints = Endpoints::default();
        let target = ListingTarget::Search {
            keyword: "red shoes".to_string(),
        };
        let url = endpoints.listing_page_url(&target, 1).unwrap();

        assert_eq!(url.path(), "/exactmatch/ru/common/v4/search");
        assert!(
            url.query_pairs()
                .any(|(k, v)| k == "query" && v == "red shoes")
        );
        assert!(!url.as_str().contains("red shoes"));
    }

    #[test]
    fn test_search_page_url_collapses_whitespace() {
        let target = ListingTarget::Search {
            keyword: "  red \t  shoes \n".to_string(),
        };
        let url = Endpoints::default().listing_page_url(&target, 1).unwrap();

        let query: Vec<String> = url
            .query_pairs()
            .filter(|(k, _)| k == "query")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(query, vec!["red shoes"]);
    }

    #[test]
    fn test_sales_url() {
        let url = Endpoints::default().sales_url(12345).unwrap();
        assert_eq!(
            url.as_str(),
            "https://product-order-qnt.wildberries.ru/by-nm/?nm=12345"
        );
    }

    #[test]
    fn test_product_link() {
        assert_eq!(
            Endpoints::default().product_link(987),
            "https://www.wildberries.ru/catalog/987/detail.aspx"
        );
    }

    #[test]
    fn test_with_base_strips_trailing_slash() {
        let endpoints = Endpoints::with_base("http://127.0.0.1:9000/");
        assert_eq!(endpoints.catalog_api, "http://127.0.0.1:9000");
        assert_eq!(
            endpoints.catalog_url,
            "http://127.0.0.1:9000/vol0/data/main-menu-ru-ru-v2.json"
        );
    }
}
