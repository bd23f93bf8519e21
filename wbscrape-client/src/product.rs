use crate::endpoints::Endpoints;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Sold-count of a product, `NoData` until a lookup succeeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SoldCount {
    Count(u64),
    #[default]
    NoData,
}

impl SoldCount {
    pub const NO_DATA: &'static str = "no data";
}

impl fmt::Display for SoldCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoldCount::Count(count) => write!(f, "{}", count),
            SoldCount::NoData => f.write_str(Self::NO_DATA),
        }
    }
}

impl Serialize for SoldCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SoldCount::Count(count) => serializer.serialize_u64(*count),
            SoldCount::NoData => serializer.serialize_str(Self::NO_DATA),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub link: String,
    pub article_id: u64,
    pub name: String,
    pub brand: String,
    pub brand_id: u64,
    pub price: u64,
    pub sale_price: u64,
    pub rating: f64,
    pub feedback_count: u64,
    pub sold_count: SoldCount,
}

impl Product {
    /// Spreadsheet header, one entry per field in declaration order
    pub const COLUMNS: [&'static str; 10] = [
        "Link",
        "Article",
        "Name",
        "Brand",
        "Brand ID",
        "Price",
        "Sale Price",
        "Rating",
        "Feedbacks",
        "Sold",
    ];

    pub fn from_card(card: ProductCard, endpoints: &Endpoints) -> Self {
        Self {
            link: endpoints.product_link(card.id),
            article_id: card.id,
            name: card.name,
            brand: card.brand,
            brand_id: card.brand_id,
            price: minor_to_major(card.price_u),
            sale_price: minor_to_major(card.sale_price_u),
            rating: card.rating,
            feedback_count: card.feedbacks,
            sold_count: SoldCount::NoData,
        }
    }

    pub fn with_sold_count(mut self, sold_count: SoldCount) -> Self {
        self.sold_count = sold_count;
        self
    }
}

/// Upstream prices are quoted in hundredths; the fraction is dropped.
pub fn minor_to_major(value: u64) -> u64 {
    value / 100
}

/// One product entry of a listing page as the API sends it
#[derive(Debug, Clone, Deserialize)]
pub struct ProductCard {
    pub id: u64,
    pub name: String,
    pub brand: String,
    #[serde(rename = "brandId")]
    pub brand_id: u64,
    #[serde(rename = "priceU")]
    pub price_u: u64,
    #[serde(rename = "salePriceU")]
    pub sale_price_u: u64,
    pub rating: f64,
    pub feedbacks: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingPage {
    pub data: ListingData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingData {
    pub products: Vec<ProductCard>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SalesEntry {
    pub qnt: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(price_u: u64, sale_price_u: u64) -> ProductCard {
        ProductCard {
            id: 42,
            name: "Sneakers".to_string(),
            brand: "Acme".to_string(),
            brand_id: 7,
            price_u,
            sale_price_u,
            rating: 4.0,
            feedbacks: 12,
        }
    }

    #[test]
    fn test_price_conversion() {
        let product = Product::from_card(card(150000, 99999), &Endpoints::default());
        assert_eq!(product.price, 1500);
        assert_eq!(product.sale_price, 999);
    }

    #[test]
    fn test_price_conversion_truncates() {
        assert_eq!(minor_to_major(150099), 1500);
        assert_eq!(minor_to_major(99), 0);
    }

    #[test]
    fn test_fresh_product_has_no_sold_count() {
        let product = Product::from_card(card(100, 100), &Endpoints::default());
        assert_eq!(product.sold_count, SoldCount::NoData);
        assert_eq!(
            product.link,
            "https://www.wildberries.ru/catalog/42/detail.aspx"
        );
    }

    #[test]
    fn test_sold_count_serializes_sentinel() {
        let product = Product::from_card(card(100, 100), &Endpoints::default());
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["sold_count"], "no data");

        let json = serde_json::to_value(product.with_sold_count(SoldCount::Count(17))).unwrap();
        assert_eq!(json["sold_count"], 17);
    }

    #[test]
    fn test_listing_page_missing_products_is_an_error() {
        let result = serde_json::from_str::<ListingPage>(r#"{"data": {}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_listing_page_decodes_cards() {
        let body = r#"{"data": {"products": [
            {"id": 1, "name": "A", "brand": "B", "brandId": 2, "priceU": 1000,
             "salePriceU": 900, "rating": 5, "feedbacks": 3, "colors": []}
        ]}}"#;
        let page: ListingPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.data.products.len(), 1);
        assert_eq!(page.data.products[0].rating, 5.0);
    }
}
