use std::path::PathBuf;

use thiserror::Error;

pub mod bundle;
pub mod features;
pub mod regression;
pub mod task;
pub mod vectorizer;

/// Errors produced while loading or running the model bundle.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("failed to load model bundle from {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("missing required field {field}")]
    Validation { field: &'static str },

    #[error("{0}")]
    Prediction(String),
}
