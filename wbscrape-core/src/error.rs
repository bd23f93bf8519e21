use thiserror::Error;
use wbscrape_client::ClientError;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Spreadsheet export failed: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
