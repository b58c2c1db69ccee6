use crate::models::BoundingBox;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Great-circle distance in kilometers. Inputs are assumed to be within
/// latitude [-90, 90] and longitude [-180, 180]; values outside that domain
/// produce a mathematically defined but meaningless result.
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Calculate a bounding box around a center point
///
/// This is much faster than Haversine for pre-filtering.
/// 1° latitude ≈ 111km, 1° longitude ≈ 111km * cos(latitude)
///
/// The 111.0 km/degree figure understates the spherical 111.195 km/degree,
/// so the box strictly contains the search disc.
///
/// # Arguments
/// * `lat` - Center latitude in degrees
/// * `lon` - Center longitude in degrees
/// * `radius_km` - Radius in kilometers
///
/// # Returns
/// BoundingBox with min/max lat/lon
pub fn calculate_bounding_box(lat: f64, lon: f64, radius_km: f64) -> BoundingBox {
    // 1 degree latitude is approximately 111 km
    let lat_delta = radius_km / 111.0;

    // 1 degree longitude varies by latitude
    let lon_delta = radius_km / (111.0 * lat.to_radians().cos().abs());

    BoundingBox {
        min_lat: lat - lat_delta,
        max_lat: lat + lat_delta,
        min_lon: lon - lon_delta,
        max_lon: lon + lon_delta,
    }
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(lat: f64, lon: f64, bbox: &BoundingBox) -> bool {
    lat >= bbox.min_lat
        && lat <= bbox.max_lat
        && lon >= bbox.min_lon
        && lon <= bbox.max_lon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance() {
        // New Orleans to Kenner is approximately 17 km
        let nola_lat = 29.9511;
        let nola_lon = -90.0715;
        let kenner_lat = 29.9941;
        let kenner_lon = -90.2417;

        let distance = haversine_distance(nola_lat, nola_lon, kenner_lat, kenner_lon);
        assert!(
            (distance - 17.1).abs() < 0.5,
            "Distance should be ~17.1km, got {}",
            distance
        );
    }

    #[test]
    fn test_haversine_symmetry() {
        let d1 = haversine_distance(39.9526, -75.1652, 36.1627, -86.7816);
        let d2 = haversine_distance(36.1627, -86.7816, 39.9526, -75.1652);
        assert!((d1 - d2).abs() < 1e-9 * d1.max(d2));
    }

    #[test]
    fn test_haversine_zero_for_identical_points() {
        let distance = haversine_distance(32.2226, -110.9747, 32.2226, -110.9747);
        assert!(distance.abs() < 1e-9);
    }

    #[test]
    fn test_bounding_box() {
        let bbox = calculate_bounding_box(29.9511, -90.0715, 10.0);

        assert!(bbox.min_lat < 29.9511);
        assert!(bbox.max_lat > 29.9511);
        assert!(bbox.min_lon < -90.0715);
        assert!(bbox.max_lon > -90.0715);

        // Check approximate size (20km / 111km per degree = ~0.18 degrees)
        let lat_span = bbox.max_lat - bbox.min_lat;
        assert!((lat_span - 0.18).abs() < 0.02, "Lat span should be ~0.18 degrees");
    }

    #[test]
    fn test_bounding_box_contains_radius_edge() {
        // A point exactly at the radius edge must survive the pre-filter
        let center_lat = 29.9511;
        let center_lon = -90.0715;
        let radius_km = 10.0;
        let km_per_degree = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
        let edge_lat = center_lat + radius_km / km_per_degree;

        let bbox = calculate_bounding_box(center_lat, center_lon, radius_km);
        assert!(is_within_bounding_box(edge_lat, center_lon, &bbox));
    }

    #[test]
    fn test_point_within_bbox() {
        let bbox = calculate_bounding_box(29.9511, -90.0715, 10.0);

        // Center point should be within
        assert!(is_within_bounding_box(29.9511, -90.0715, &bbox));

        // Close point should be within
        assert!(is_within_bounding_box(29.95, -90.07, &bbox));

        // Far point should not be within
        assert!(!is_within_bounding_box(39.9526, -75.1652, &bbox));
    }
}
