//! Typed place schema.
//!
//! A [`Place`] is only ever built through [`Place::from_raw`](crate::sanitize),
//! so every instance in a catalog already satisfies the id/name invariant and
//! carries the documented defaults for optional fields.

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable identifier of a place.
///
/// Catalog ids are either integers or strings. The two are never coerced
/// into each other: `PlaceId::Number(2)` and `PlaceId::Text("2")` are
/// different ids, matching how stored favorites are compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlaceId {
    Number(i64),
    Text(String),
}

impl PlaceId {
    /// Read an id from a JSON value. Integral floats are accepted as numbers.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self::Number).or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| Self::Number(f as i64))
            }),
            Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    /// `0` and the empty string are not usable ids.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0,
            Self::Text(s) => !s.is_empty(),
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Number(n) => Value::from(*n),
            Self::Text(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for PlaceId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for PlaceId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PlaceId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Place category.
///
/// The four known categories get their own variants; any other label is
/// kept verbatim in [`Category::Other`] so exact-match filtering still works
/// for catalogs that use labels outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Historical,
    Cultural,
    Nature,
    Museum,
    Other(String),
}

impl Category {
    /// Categories the browsing UI offers as filter tabs, in display order.
    pub const KNOWN: [Self; 4] = [
        Self::Historical,
        Self::Cultural,
        Self::Nature,
        Self::Museum,
    ];

    /// Exact, case-sensitive label match. `"nature"` is not `Nature`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "Historical" => Self::Historical,
            "Cultural" => Self::Cultural,
            "Nature" => Self::Nature,
            "Museum" => Self::Museum,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Historical => "Historical",
            Self::Cultural => "Cultural",
            Self::Nature => "Nature",
            Self::Museum => "Museum",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Amenities shown for a place whose record lists no facilities.
pub const DEFAULT_AMENITIES: [&str; 8] = [
    "Parking Available",
    "Wheelchair Accessible",
    "Restrooms",
    "Food & Beverages",
    "Souvenir Shops",
    "Guided Tours",
    "Photography Allowed",
    "WiFi Available",
];

/// A validated tourist destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Unique, stable identifier (never `0` or empty)
    pub id: PlaceId,
    /// Display name (never empty)
    pub name: String,
    /// City, empty when the record has none
    pub city: String,
    /// Free-form region label, kept untrimmed as loaded
    pub state: String,
    /// `None` for unclassified places
    pub category: Option<Category>,
    pub description: String,
    /// Average rating, `0.0` when missing or non-numeric
    pub rating: f64,
    /// Review count, `0` when missing or non-numeric
    pub reviews: u64,
    pub visit_time: Option<String>,
    pub best_time: Option<String>,
    pub entry_fee: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub highlights: Vec<String>,
    pub tips: Option<String>,
    pub image: Option<String>,
    pub facilities: Vec<String>,
}

impl Place {
    #[must_use]
    pub fn id(&self) -> &PlaceId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The region label with incidental whitespace removed.
    #[must_use]
    pub fn trimmed_state(&self) -> &str {
        self.state.trim()
    }

    #[must_use]
    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    /// Listed facilities, or the default amenity list when none are listed.
    #[must_use]
    pub fn amenities(&self) -> Vec<&str> {
        if self.facilities.is_empty() {
            DEFAULT_AMENITIES.to_vec()
        } else {
            self.facilities.iter().map(String::as_str).collect()
        }
    }
}
