use desh_darshan_catalog::PlaceId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeshDarshanError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] desh_darshan_catalog::CatalogError),
    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),
    #[error("Favorites error: {0}")]
    Favorites(#[from] crate::favorites::FavoritesError),
    #[error("Bookmarks error: {0}")]
    Bookmarks(#[from] crate::bookmarks::BookmarksError),
    #[error("Directions error: {0}")]
    Directions(#[from] crate::directions::DirectionsError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unknown place: {0}")]
    UnknownPlace(PlaceId),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Init Logging error: {0}")]
    InitLoggingError(#[from] tracing_subscriber::filter::ParseError),
}

pub type Result<T> = std::result::Result<T, DeshDarshanError>;
