pub mod aggregate;
pub mod catalog;
pub mod enrich;
pub mod error;
pub mod export;
pub mod model;
pub mod scrape;

use std::sync::Arc;

pub use error::CoreError;

/// Callback for reporting progress messages
pub type ProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

pub(crate) fn report(progress: Option<&ProgressCallback>, msg: String) {
    if let Some(callback) = progress {
        callback(msg);
    }
}
