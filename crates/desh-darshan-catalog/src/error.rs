use std::path::PathBuf;

use thiserror::Error;
pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Catalog file not found: {0}")]
    CatalogFileNotFound(PathBuf),
    #[error("Catalog source is empty")]
    EmptySource,
    #[error("Catalog root is not an array (found {0})")]
    NotAnArray(&'static str),
}
