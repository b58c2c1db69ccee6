use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to search for nearby lodging
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LodgingSearchRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    /// Signed degrees, western hemisphere negative
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(alias = "radius_km", rename = "radiusKm")]
    pub radius_km: f64,
    #[serde(default = "default_limit")]
    pub limit: u16,
}

/// Request to search for nearby dining, optionally narrowed by cuisine
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiningSearchRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(alias = "radius_km", rename = "radiusKm")]
    pub radius_km: f64,
    /// Free-text cuisine filter, e.g. "Thai"; empty matches everything
    #[serde(default)]
    pub cuisine: String,
    #[serde(default = "default_limit")]
    pub limit: u16,
}

fn default_limit() -> u16 {
    50
}
