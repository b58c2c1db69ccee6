use crate::core::distance::{calculate_bounding_box, haversine_distance, is_within_bounding_box};
use crate::models::{BusinessRecord, QueryPoint, SearchResult};

/// Default maximum number of results returned per query
pub const DEFAULT_RESULT_CAP: usize = 50;

/// Filter records to those within `radius_km` of `center`, annotated with
/// their distance, sorted by distance ascending, truncated to `cap` entries
///
/// The radius boundary is inclusive: a record exactly at the edge is kept.
/// The sort is stable, so ties keep the records' ingestion order and repeated
/// queries over the same dataset return identical output.
///
/// This is a deliberate linear scan; the dataset is assumed to fit in memory
/// comfortably. A bounding box screens out distant records before the exact
/// haversine check.
pub fn filter_by_radius<'a, I>(
    records: I,
    center: QueryPoint,
    radius_km: f64,
    cap: usize,
) -> Vec<SearchResult>
where
    I: IntoIterator<Item = &'a BusinessRecord>,
{
    let bbox = calculate_bounding_box(center.latitude, center.longitude, radius_km);

    // The box is only a valid superset test while it stays clear of the
    // poles and the antimeridian; otherwise fall back to haversine alone.
    let prefilter = bbox.min_lat > -90.0
        && bbox.max_lat < 90.0
        && bbox.min_lon > -180.0
        && bbox.max_lon < 180.0;

    let mut results: Vec<SearchResult> = records
        .into_iter()
        .filter(|record| {
            !prefilter || is_within_bounding_box(record.latitude, record.longitude, &bbox)
        })
        .filter_map(|record| {
            let distance_km = haversine_distance(
                center.latitude,
                center.longitude,
                record.latitude,
                record.longitude,
            );

            if distance_km <= radius_km {
                Some(SearchResult::from_record(record, distance_km))
            } else {
                None
            }
        })
        .collect();

    // Vec::sort_by is stable, which is what keeps tie order deterministic
    results.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    results.truncate(cap);

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::distance::haversine_distance;

    fn create_record(id: &str, latitude: f64, longitude: f64) -> BusinessRecord {
        BusinessRecord {
            business_id: id.to_string(),
            name: format!("Venue {}", id),
            address: "1 Main St".to_string(),
            city: "New Orleans".to_string(),
            state: "LA".to_string(),
            postal_code: "70130".to_string(),
            latitude,
            longitude,
            stars: Some(3.5),
            categories: Some("Restaurants".to_string()),
            attributes: None,
        }
    }

    const CENTER: QueryPoint = QueryPoint {
        latitude: 29.9511,
        longitude: -90.0715,
    };

    #[test]
    fn test_filters_outside_radius() {
        let records = vec![
            create_record("near", 29.9611, -90.0715),  // ~1.1 km
            create_record("far", 30.4511, -90.0715),   // ~55.6 km
        ];

        let results = filter_by_radius(&records, CENTER, 10.0, DEFAULT_RESULT_CAP);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].business_id, "near");
    }

    #[test]
    fn test_sorted_by_distance_ascending() {
        let records = vec![
            create_record("c", 29.9711, -90.0715), // ~2.2 km
            create_record("a", 29.9521, -90.0715), // ~0.1 km
            create_record("b", 29.9611, -90.0715), // ~1.1 km
        ];

        let results = filter_by_radius(&records, CENTER, 10.0, DEFAULT_RESULT_CAP);

        let ids: Vec<&str> = results.iter().map(|r| r.business_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        for pair in results.windows(2) {
            assert!(pair[0].distance_km <= pair[1].distance_km);
        }
    }

    #[test]
    fn test_ties_keep_ingestion_order() {
        // Identical coordinates, so identical distances
        let records = vec![
            create_record("first", 29.9611, -90.0715),
            create_record("second", 29.9611, -90.0715),
            create_record("third", 29.9611, -90.0715),
        ];

        let results = filter_by_radius(&records, CENTER, 10.0, DEFAULT_RESULT_CAP);

        let ids: Vec<&str> = results.iter().map(|r| r.business_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_radius_edge_is_inclusive() {
        let record = create_record("edge", 30.0411, -90.0715);
        let exact = haversine_distance(
            CENTER.latitude,
            CENTER.longitude,
            record.latitude,
            record.longitude,
        );

        let results = filter_by_radius(std::iter::once(&record), CENTER, exact, 10);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_cap_keeps_the_closest() {
        let records: Vec<BusinessRecord> = (0..20)
            .map(|i| create_record(&i.to_string(), 29.9511 + i as f64 * 0.005, -90.0715))
            .collect();

        let results = filter_by_radius(&records, CENTER, 50.0, 5);

        assert_eq!(results.len(), 5);
        let ids: Vec<&str> = results.iter().map(|r| r.business_id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_radius_monotonicity() {
        let records = vec![
            create_record("a", 29.9611, -90.0715),
            create_record("b", 30.0411, -90.0715),
        ];

        let narrow = filter_by_radius(&records, CENTER, 5.0, DEFAULT_RESULT_CAP);
        let wide = filter_by_radius(&records, CENTER, 20.0, DEFAULT_RESULT_CAP);

        for result in &narrow {
            assert!(wide.iter().any(|r| r.business_id == result.business_id));
        }
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let records = vec![create_record("far", 39.9526, -75.1652)];
        let results = filter_by_radius(&records, CENTER, 10.0, DEFAULT_RESULT_CAP);
        assert!(results.is_empty());
    }

    #[test]
    fn test_antimeridian_center_skips_prefilter() {
        let records = vec![
            create_record("across", -17.84, 179.95),
            create_record("distant", -17.84, 170.0),
        ];
        let center = QueryPoint::new(-17.84, -179.95);

        // ~11 km across the antimeridian; the bbox cannot express this, so
        // the scan must fall back to haversine alone and still find it
        let results = filter_by_radius(&records, center, 25.0, DEFAULT_RESULT_CAP);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].business_id, "across");
    }
}
