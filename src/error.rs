//! Error type for loading item trees and configuration.
//!
//! The widget itself never fails; only the I/O around it does.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectTreeError {
    #[error("failed to read items from {path}")]
    ReadItems {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid item tree in {path}: {source}")]
    ParseItems {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read config file {path}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown stale-search policy `{0}` (expected `keep` or `clear`)")]
    UnknownPolicy(String),
}

pub type Result<T> = std::result::Result<T, SelectTreeError>;
