// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{BoundingBox, BusinessRecord, LodgingRules, QueryPoint, SearchResult};
pub use requests::{DiningSearchRequest, LodgingSearchRequest};
pub use responses::{ErrorResponse, HealthResponse, SearchResponse};
