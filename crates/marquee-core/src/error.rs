//! Engine error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StageError {
    #[error("manifest rejected: {0}")]
    Manifest(String),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
