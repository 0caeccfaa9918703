use std::io::Write;

use serde_json::{Value, json};
use tempfile::NamedTempFile;
use tracing::info;

use super::error::Result;

/// Configuration for test catalog generation
#[derive(Debug, Clone)]
pub struct TestDataConfig {
    /// Number of valid place records
    pub valid_rows: usize,
    /// Number of malformed records interleaved with the valid ones
    pub invalid_rows: usize,
    /// Whether to use realistic places or minimal synthetic ones
    pub realistic_data: bool,
}

impl Default for TestDataConfig {
    fn default() -> Self {
        Self {
            valid_rows: 8,
            invalid_rows: 3,
            realistic_data: true,
        }
    }
}

impl TestDataConfig {
    /// Minimal data for unit tests
    pub fn minimal() -> Self {
        Self {
            valid_rows: 3,
            invalid_rows: 0,
            realistic_data: false,
        }
    }

    /// Sample data for integration tests
    pub fn sample() -> Self {
        Self {
            valid_rows: 8,
            invalid_rows: 5,
            realistic_data: true,
        }
    }
}

/// Create raw catalog records.
///
/// Invalid records are placed after every valid one (round robin) so tests
/// exercise the stable filter, then any leftovers are appended.
pub fn create_test_records(config: &TestDataConfig) -> Vec<Value> {
    let valid = if config.realistic_data && config.valid_rows > 3 {
        realistic_records(config.valid_rows)
    } else {
        minimal_records(config.valid_rows)
    };
    let mut invalid = invalid_records(config.invalid_rows).into_iter();

    let mut records = Vec::with_capacity(config.valid_rows + config.invalid_rows);
    for record in valid {
        records.push(record);
        if let Some(bad) = invalid.next() {
            records.push(bad);
        }
    }
    records.extend(invalid);
    records
}

/// Write a test catalog to a temporary JSON file.
pub fn create_test_catalog_file(config: &TestDataConfig) -> Result<NamedTempFile> {
    info!("Creating test catalog with config: {:?}", config);

    let mut file = NamedTempFile::with_suffix(".json")?;
    serde_json::to_writer_pretty(&mut file, &create_test_records(config))?;
    file.flush()?;
    Ok(file)
}

fn realistic_records(rows: usize) -> Vec<Value> {
    let base_data = [
        (1, "Taj Mahal", "Agra", "Uttar Pradesh", "Historical", 4.8, 125000, Some((27.1751, 78.0421))),
        (2, "Gateway of India", "Mumbai", "Maharashtra", "Historical", 4.5, 89000, Some((18.9220, 72.8347))),
        (3, "Golden Temple", "Amritsar", "Punjab", "Cultural", 4.9, 110000, Some((31.6200, 74.8765))),
        (4, "Kerala Backwaters", "Alleppey", " Kerala ", "Nature", 4.7, 47000, Some((9.4981, 76.3388))),
        (5, "Victoria Memorial", "Kolkata", "West Bengal", "Museum", 4.6, 58000, Some((22.5448, 88.3426))),
        (6, "Munnar Tea Gardens", "Munnar", "Kerala", "Nature", 4.6, 33000, None),
        (7, "Hampi", "Hampi", "Karnataka", "Historical", 4.7, 36000, Some((15.3350, 76.4600))),
        (8, "Varanasi Ghats", "Varanasi", "Uttar Pradesh", "Cultural", 4.7, 73000, None),
    ];

    base_data
        .iter()
        .cycle()
        .take(rows)
        .enumerate()
        .map(|(i, (id, name, city, state, category, rating, reviews, coords))| {
            let round = i / base_data.len();
            let id = *id + (round * base_data.len()) as i64;
            let name = if round == 0 {
                (*name).to_string()
            } else {
                format!("{name} {}", round + 1)
            };
            let mut record = json!({
                "id": id,
                "name": name,
                "city": city,
                "state": state,
                "category": category,
                "description": format!("{name} in {city}"),
                "rating": rating,
                "reviews": reviews,
            });
            if let Some((lat, lng)) = coords {
                record["coordinates"] = json!({"lat": lat, "lng": lng});
            }
            record
        })
        .collect()
}

fn minimal_records(rows: usize) -> Vec<Value> {
    (1..=rows)
        .map(|i| json!({"id": i, "name": format!("Place {i}")}))
        .collect()
}

fn invalid_records(rows: usize) -> Vec<Value> {
    let shapes = [
        json!({"name": "Missing Id"}),
        json!({"id": 9001}),
        json!({"id": 9002, "name": ""}),
        json!({"id": 0, "name": "Zero Id"}),
        json!("not a record"),
        Value::Null,
    ];
    shapes.iter().cycle().take(rows).cloned().collect()
}
