pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    Mode, RunSettings, default_cache_path, expand_path, parse_mode, strip_line_ending,
};

// Re-export the pipeline entry point from wbscrape-core
pub use wbscrape_core::scrape::{ScrapeMode, ScrapeOptions, ScrapeSummary, execute_scrape};
