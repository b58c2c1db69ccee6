use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A business record from the ingested dataset
///
/// Records are created once at ingestion and never mutated; searches only
/// ever borrow them from the current dataset snapshot.
#[derive(Debug, Clone)]
pub struct BusinessRecord {
    pub business_id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Star rating 0.0-5.0; absent means unknown, not zero
    pub stars: Option<f64>,
    /// Comma-joined free-text category tags, e.g. "Hotels, Event Planning"
    pub categories: Option<String>,
    /// Raw attribute map from the source dataset; may be absent entirely
    pub attributes: Option<HashMap<String, serde_json::Value>>,
}

impl BusinessRecord {
    /// Category tags, if the record has any
    pub fn categories(&self) -> Option<&str> {
        self.categories.as_deref()
    }

    /// Whether the attribute map is present and contains `key`
    ///
    /// All attribute presence checks go through here so call sites never
    /// branch on the optional map directly.
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes
            .as_ref()
            .is_some_and(|attrs| attrs.contains_key(key))
    }
}

/// Center point of a proximity query, in signed degrees
///
/// Longitude must already match the dataset's sign convention (western
/// hemisphere negative); normalizing caller input is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl QueryPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A record annotated with its distance from the query point
///
/// Recomputed per query; `distance_km` only means anything relative to the
/// query point that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "businessId")]
    pub business_id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    pub stars: Option<f64>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
}

impl SearchResult {
    pub fn from_record(record: &BusinessRecord, distance_km: f64) -> Self {
        Self {
            business_id: record.business_id.clone(),
            name: record.name.clone(),
            address: record.address.clone(),
            city: record.city.clone(),
            state: record.state.clone(),
            postal_code: record.postal_code.clone(),
            stars: record.stars,
            latitude: record.latitude,
            longitude: record.longitude,
            distance_km,
        }
    }
}

/// Curated denylist applied to the lodging facet
///
/// Raw category taxonomies are noisy free text; a record tagged "Hotels" can
/// also be a transport hub or a distillery tour. Terms match
/// case-insensitively.
#[derive(Debug, Clone)]
pub struct LodgingRules {
    pub excluded_terms: Vec<String>,
}

impl Default for LodgingRules {
    fn default() -> Self {
        Self {
            excluded_terms: vec!["Transport".to_string(), "Distilleries".to_string()],
        }
    }
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_attributes(
        attributes: Option<HashMap<String, serde_json::Value>>,
    ) -> BusinessRecord {
        BusinessRecord {
            business_id: "b1".to_string(),
            name: "Test Venue".to_string(),
            address: "1 Main St".to_string(),
            city: "New Orleans".to_string(),
            state: "LA".to_string(),
            postal_code: "70130".to_string(),
            latitude: 29.9511,
            longitude: -90.0715,
            stars: Some(4.0),
            categories: None,
            attributes,
        }
    }

    #[test]
    fn test_has_attribute_absent_map() {
        let record = record_with_attributes(None);
        assert!(!record.has_attribute("RestaurantsPriceRange2"));
    }

    #[test]
    fn test_has_attribute_present_key() {
        let mut attrs = HashMap::new();
        attrs.insert(
            "RestaurantsPriceRange2".to_string(),
            serde_json::Value::String("2".to_string()),
        );
        let record = record_with_attributes(Some(attrs));
        assert!(record.has_attribute("RestaurantsPriceRange2"));
        assert!(!record.has_attribute("WiFi"));
    }

    #[test]
    fn test_default_lodging_rules() {
        let rules = LodgingRules::default();
        assert_eq!(rules.excluded_terms, vec!["Transport", "Distilleries"]);
    }
}
