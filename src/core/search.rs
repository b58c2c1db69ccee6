use crate::core::classifier::{is_dining, is_lodging, matches_cuisine};
use crate::core::proximity::filter_by_radius;
use crate::models::{BusinessRecord, LodgingRules, QueryPoint, SearchResult};
use thiserror::Error;

/// A query rejected before any scan happens
///
/// Distinct from an empty result: no matches within the radius is a
/// legitimate `Ok(vec![])`, while a nonsensical center point or radius is an
/// error so caller bugs don't get masked by silently empty output.
#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("latitude {0} is not a finite value in [-90, 90]")]
    InvalidLatitude(f64),

    #[error("longitude {0} is not a finite value in [-180, 180]")]
    InvalidLongitude(f64),

    #[error("search radius {0} must be a finite value greater than zero")]
    InvalidRadius(f64),
}

/// Reject non-finite or out-of-domain query parameters
pub fn validate_query(center: QueryPoint, radius_km: f64) -> Result<(), QueryError> {
    if !center.latitude.is_finite() || !(-90.0..=90.0).contains(&center.latitude) {
        return Err(QueryError::InvalidLatitude(center.latitude));
    }

    if !center.longitude.is_finite() || !(-180.0..=180.0).contains(&center.longitude) {
        return Err(QueryError::InvalidLongitude(center.longitude));
    }

    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(QueryError::InvalidRadius(radius_km));
    }

    Ok(())
}

/// Search orchestrator - composes classification and proximity filtering
///
/// Stateless between calls: given the same dataset snapshot and parameters,
/// repeated queries return identical output. The dataset is only ever
/// borrowed, never mutated.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    lodging_rules: LodgingRules,
}

impl SearchEngine {
    pub fn new(lodging_rules: LodgingRules) -> Self {
        Self { lodging_rules }
    }

    pub fn with_default_rules() -> Self {
        Self {
            lodging_rules: LodgingRules::default(),
        }
    }

    /// Find lodging venues within `radius_km` of `center`
    ///
    /// Applies the lodging classifier to the full dataset, then the
    /// proximity filter. Results are sorted by distance ascending and capped
    /// at `cap` entries.
    pub fn find_nearby_lodging(
        &self,
        records: &[BusinessRecord],
        center: QueryPoint,
        radius_km: f64,
        cap: usize,
    ) -> Result<Vec<SearchResult>, QueryError> {
        validate_query(center, radius_km)?;

        let lodging = records
            .iter()
            .filter(|record| is_lodging(record, &self.lodging_rules));

        Ok(filter_by_radius(lodging, center, radius_km, cap))
    }

    /// Find dining venues within `radius_km` of `center`, narrowed by
    /// free-text cuisine
    ///
    /// Empty cuisine text matches every dining record, so the search degrades
    /// to a plain radius search over the dining facet.
    pub fn find_nearby_dining_by_cuisine(
        &self,
        records: &[BusinessRecord],
        center: QueryPoint,
        radius_km: f64,
        cuisine: &str,
        cap: usize,
    ) -> Result<Vec<SearchResult>, QueryError> {
        validate_query(center, radius_km)?;

        let dining = records
            .iter()
            .filter(|record| is_dining(record) && matches_cuisine(record, cuisine));

        Ok(filter_by_radius(dining, center, radius_km, cap))
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::with_default_rules()
    }
}
