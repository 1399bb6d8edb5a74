//! Descriptive statistics over the Netflix movie dataset: Hidden Gem vs IMDb
//! correlation, production languages and view ratings through time.
pub mod charts;
pub mod config;
pub mod error;
pub mod languages;
pub mod loader;
pub mod output;
pub mod reports;
pub mod scores;
pub mod timeline;
pub mod types;
pub mod util;

#[cfg(test)]
mod testutil;

pub use error::{AnalysisError, Result};
