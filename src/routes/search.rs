use crate::core::{validate_query, SearchEngine};
use crate::models::{
    DiningSearchRequest, ErrorResponse, HealthResponse, LodgingSearchRequest, QueryPoint,
    SearchResponse,
};
use crate::services::DatasetService;
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<DatasetService>,
    pub engine: SearchEngine,
    /// Hard ceiling on the per-request result cap
    pub max_limit: u16,
}

/// Configure all search-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/search/lodging", web::post().to(search_lodging))
        .route("/search/dining", web::post().to(search_dining));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let snapshot = state.dataset.cached_snapshot().await;

    let status = if snapshot.is_some() { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        dataset_records: snapshot.map(|s| s.records.len()),
    })
}

/// Lodging search endpoint
///
/// POST /api/v1/search/lodging
///
/// Request body:
/// ```json
/// {
///   "latitude": 29.9511,
///   "longitude": -90.0715,
///   "radiusKm": 10.0,
///   "limit": 50
/// }
/// ```
async fn search_lodging(
    state: web::Data<AppState>,
    req: web::Json<LodgingSearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for lodging search: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let center = QueryPoint::new(req.latitude, req.longitude);

    // Reject bad parameters before touching the dataset
    if let Err(e) = validate_query(center, req.radius_km) {
        return invalid_query_response(e);
    }

    let limit = req.limit.min(state.max_limit) as usize;

    tracing::info!(
        "Lodging search at ({}, {}), radius {} km, limit {}",
        req.latitude,
        req.longitude,
        req.radius_km,
        limit
    );

    let snapshot = match state.dataset.snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => return dataset_unavailable_response(e),
    };

    match state
        .engine
        .find_nearby_lodging(&snapshot.records, center, req.radius_km, limit)
    {
        Ok(results) => {
            tracing::debug!(
                "Lodging search returned {} results from {} records",
                results.len(),
                snapshot.records.len()
            );
            HttpResponse::Ok().json(SearchResponse {
                total_results: results.len(),
                results,
            })
        }
        Err(e) => invalid_query_response(e),
    }
}

/// Dining search endpoint
///
/// POST /api/v1/search/dining
///
/// Request body:
/// ```json
/// {
///   "latitude": 29.9511,
///   "longitude": -90.0715,
///   "radiusKm": 10.0,
///   "cuisine": "Thai",
///   "limit": 50
/// }
/// ```
async fn search_dining(
    state: web::Data<AppState>,
    req: web::Json<DiningSearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for dining search: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let center = QueryPoint::new(req.latitude, req.longitude);

    if let Err(e) = validate_query(center, req.radius_km) {
        return invalid_query_response(e);
    }

    let limit = req.limit.min(state.max_limit) as usize;

    tracing::info!(
        "Dining search at ({}, {}), radius {} km, cuisine {:?}, limit {}",
        req.latitude,
        req.longitude,
        req.radius_km,
        req.cuisine,
        limit
    );

    let snapshot = match state.dataset.snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => return dataset_unavailable_response(e),
    };

    match state.engine.find_nearby_dining_by_cuisine(
        &snapshot.records,
        center,
        req.radius_km,
        &req.cuisine,
        limit,
    ) {
        Ok(results) => {
            tracing::debug!(
                "Dining search returned {} results from {} records",
                results.len(),
                snapshot.records.len()
            );
            HttpResponse::Ok().json(SearchResponse {
                total_results: results.len(),
                results,
            })
        }
        Err(e) => invalid_query_response(e),
    }
}

fn invalid_query_response(e: crate::core::QueryError) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "invalid_query".to_string(),
        message: e.to_string(),
        status_code: 400,
    })
}

fn dataset_unavailable_response(e: crate::services::DatasetError) -> HttpResponse {
    tracing::error!("Dataset unavailable: {}", e);
    HttpResponse::ServiceUnavailable().json(ErrorResponse {
        error: "dataset_unavailable".to_string(),
        message: e.to_string(),
        status_code: 503,
    })
}
