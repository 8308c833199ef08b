use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors for app logic and infrastructure (data sources, arguments).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("[Status {status}] building config for world {world}: {body}")]
    CatalogStatus {
        world: String,
        status: u16,
        body: String,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Error parsing building config: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Village points dropped from {from} to {to} at {at}")]
    ScoreDecrease {
        from: u32,
        to: u32,
        at: DateTime<Utc>,
    },

    #[error("Invalid value {value:?} for {var}")]
    InvalidConfig { var: String, value: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Search task failed: {0}")]
    SearchTask(String),
}
