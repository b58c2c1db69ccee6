// Core algorithm exports
pub mod classifier;
pub mod distance;
pub mod proximity;
pub mod search;

pub use classifier::{is_dining, is_lodging, matches_cuisine};
pub use distance::{calculate_bounding_box, haversine_distance, is_within_bounding_box};
pub use proximity::{filter_by_radius, DEFAULT_RESULT_CAP};
pub use search::{validate_query, QueryError, SearchEngine};
