//! Crate-wide error type.
//!
//! Only loaders (config, charts) return errors. Gameplay paths absorb
//! anomalies locally and log them instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotefallError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid chart file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to load beatmap {path:?}: {message}")]
    Beatmap { path: PathBuf, message: String },

    #[error("Lane {lane} is not mapped (lane count is {lanes})")]
    InvalidLane { lane: usize, lanes: usize },

    #[error("Invalid setting `{field}`: {message}")]
    InvalidConfig { field: &'static str, message: String },

    #[error("Unsupported chart format: {0:?}")]
    UnsupportedChart(PathBuf),
}

pub type Result<T> = std::result::Result<T, NotefallError>;
