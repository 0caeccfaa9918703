use desh_darshan_catalog::{Coordinates, Place};
use thiserror::Error;

pub const DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/dir/?api=1&destination=";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DirectionsError {
    #[error("Location coordinates not available for {0}")]
    MissingCoordinates(String),
    #[error("Invalid coordinates for {name}: {lat}, {lng}")]
    InvalidCoordinates { name: String, lat: f64, lng: f64 },
}

/// External directions link to `place`.
pub fn directions_url(place: &Place) -> Result<String, DirectionsError> {
    let Some(Coordinates { lat, lng }) = place.coordinates else {
        return Err(DirectionsError::MissingCoordinates(place.name.clone()));
    };
    let in_range = lat.is_finite()
        && lng.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lng);
    if !in_range {
        return Err(DirectionsError::InvalidCoordinates {
            name: place.name.clone(),
            lat,
            lng,
        });
    }
    Ok(format!("{DIRECTIONS_BASE_URL}{lat},{lng}"))
}
