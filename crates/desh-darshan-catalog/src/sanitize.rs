//! Conversion of raw catalog records into validated [`Place`]s.
//!
//! A record survives iff it is a JSON object with a usable `id` and a
//! non-empty string `name`. Every other field is read leniently: wrong types
//! fall back to the documented default instead of rejecting the record.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::{
    place::{Category, Coordinates, Place, PlaceId},
    raw::RawCatalog,
};

/// Why a raw record was left out of the catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("record is not an object")]
    NotAnObject,
    #[error("record has no usable id")]
    MissingId,
    #[error("record has no name")]
    MissingName,
}

type Object = Map<String, Value>;

fn string_field(obj: &Object, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(ToString::to_string)
}

fn number_field(obj: &Object, key: &str) -> Option<f64> {
    obj.get(key)
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
}

fn string_list(obj: &Object, key: &str) -> Vec<String> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn coordinates(obj: &Object) -> Option<Coordinates> {
    let coords = obj.get("coordinates")?.as_object()?;
    let lat = number_field(coords, "lat")?;
    let lng = number_field(coords, "lng")?;
    Some(Coordinates { lat, lng })
}

fn reviews(obj: &Object) -> u64 {
    match obj.get("reviews") {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        _ => 0,
    }
}

impl Place {
    /// Validate and convert a single raw record.
    pub fn from_raw(record: &Value) -> Result<Self, Rejection> {
        let obj = record.as_object().ok_or(Rejection::NotAnObject)?;

        let id = obj
            .get("id")
            .and_then(PlaceId::from_json)
            .filter(PlaceId::is_valid)
            .ok_or(Rejection::MissingId)?;

        let name = string_field(obj, "name")
            .filter(|name| !name.is_empty())
            .ok_or(Rejection::MissingName)?;

        Ok(Self {
            id,
            name,
            city: string_field(obj, "city").unwrap_or_default(),
            state: string_field(obj, "state").unwrap_or_default(),
            category: string_field(obj, "category").map(Category::from),
            description: string_field(obj, "description").unwrap_or_default(),
            rating: number_field(obj, "rating").unwrap_or(0.0),
            reviews: reviews(obj),
            visit_time: string_field(obj, "visitTime"),
            best_time: string_field(obj, "bestTime"),
            entry_fee: string_field(obj, "entryFee"),
            coordinates: coordinates(obj),
            highlights: string_list(obj, "highlights"),
            tips: string_field(obj, "tips"),
            image: string_field(obj, "image"),
            facilities: string_list(obj, "facilities"),
        })
    }
}

/// Keep the valid records of `raw`, in input order.
///
/// Rejected records are logged and otherwise ignored.
#[instrument(name = "Sanitize catalog", skip_all, fields(records = raw.len()), level = "debug")]
pub fn sanitize(raw: &RawCatalog) -> Vec<Place> {
    let places: Vec<Place> = raw
        .records()
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match Place::from_raw(record) {
            Ok(place) => Some(place),
            Err(reason) => {
                warn!(index, %reason, "Skipping invalid catalog record");
                debug!(index, ?record, "Rejected record contents");
                None
            }
        })
        .collect();

    info!(
        kept = places.len(),
        rejected = raw.len() - places.len(),
        "Catalog sanitized"
    );
    places
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_full_record() {
        let record = json!({
            "id": 1,
            "name": "Taj Mahal",
            "city": "Agra",
            "state": "Uttar Pradesh",
            "category": "Historical",
            "description": "Ivory-white marble mausoleum",
            "rating": 4.8,
            "reviews": 125000,
            "visitTime": "2-3 hours",
            "bestTime": "October to March",
            "entryFee": "₹50",
            "coordinates": {"lat": 27.1751, "lng": 78.0421},
            "highlights": ["Sunrise view", 42, "Mehtab Bagh"],
            "tips": "Closed on Fridays"
        });

        let place = Place::from_raw(&record).unwrap();
        assert_eq!(place.id, PlaceId::Number(1));
        assert_eq!(place.category, Some(Category::Historical));
        assert_eq!(place.reviews, 125000);
        assert_eq!(place.visit_time.as_deref(), Some("2-3 hours"));
        assert_eq!(
            place.coordinates,
            Some(Coordinates {
                lat: 27.1751,
                lng: 78.0421
            })
        );
        assert_eq!(place.highlights, vec!["Sunrise view", "Mehtab Bagh"]);
        assert!(place.facilities.is_empty());
    }

    #[test]
    fn test_defaults_for_missing_and_mistyped_fields() {
        let record = json!({
            "id": "x1",
            "name": "Somewhere",
            "city": 12,
            "rating": "excellent",
            "reviews": -4,
            "coordinates": {"lat": "north", "lng": 77.0}
        });

        let place = Place::from_raw(&record).unwrap();
        assert_eq!(place.city, "");
        assert_eq!(place.state, "");
        assert_eq!(place.category, None);
        assert_eq!(place.rating, 0.0);
        assert_eq!(place.reviews, 0);
        assert_eq!(place.coordinates, None);
    }

    #[test]
    fn test_rejections() {
        assert_eq!(
            Place::from_raw(&json!("Taj Mahal")),
            Err(Rejection::NotAnObject)
        );
        assert_eq!(Place::from_raw(&json!(null)), Err(Rejection::NotAnObject));
        assert_eq!(
            Place::from_raw(&json!({"name": "No id"})),
            Err(Rejection::MissingId)
        );
        assert_eq!(
            Place::from_raw(&json!({"id": 0, "name": "Zero id"})),
            Err(Rejection::MissingId)
        );
        assert_eq!(
            Place::from_raw(&json!({"id": "", "name": "Empty id"})),
            Err(Rejection::MissingId)
        );
        assert_eq!(
            Place::from_raw(&json!({"id": 3})),
            Err(Rejection::MissingName)
        );
        assert_eq!(
            Place::from_raw(&json!({"id": 3, "name": ""})),
            Err(Rejection::MissingName)
        );
    }

    #[test]
    fn test_sanitize_is_a_stable_filter() {
        let raw = RawCatalog::from_records(vec![
            json!({"id": 3, "name": "C"}),
            json!({"name": "no id"}),
            json!({"id": 1, "name": "A"}),
            json!(17),
            json!({"id": 2, "name": "B"}),
        ]);

        let ids: Vec<_> = sanitize(&raw).into_iter().map(|p| p.id).collect();
        assert_eq!(
            ids,
            vec![PlaceId::Number(3), PlaceId::Number(1), PlaceId::Number(2)]
        );
    }
}
