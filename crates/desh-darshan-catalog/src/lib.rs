//! Place catalog for Desh Darshan.
//!
//! This crate owns the data side of the application: the typed [`Place`]
//! schema, reading raw catalog records from the bundled dataset, a file or
//! inline JSON, and turning those records into validated places.
//!
//! ```rust
//! use desh_darshan_catalog::{CatalogSource, RawCatalog, sanitize};
//!
//! let raw = RawCatalog::load(&CatalogSource::Embedded);
//! let places = sanitize(&raw);
//! assert!(places.iter().all(|p| !p.name.is_empty()));
//! ```

mod error;
pub mod place;
pub mod raw;
pub mod sanitize;
pub mod test_data;

pub use error::{CatalogError, Result};
pub use place::{Category, Coordinates, DEFAULT_AMENITIES, Place, PlaceId};
pub use raw::{CatalogSource, RawCatalog};
pub use sanitize::{Rejection, sanitize};
pub use test_data::{TestDataConfig, create_test_catalog_file, create_test_records};
