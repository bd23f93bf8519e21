pub mod client;
pub mod endpoints;
pub mod error;
pub mod product;

pub use client::{ClientConfig, WbClient};
pub use endpoints::{Endpoints, ListingTarget};
pub use error::ClientError;
pub use product::{Product, SoldCount};
