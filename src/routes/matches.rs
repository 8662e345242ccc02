use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::Matcher;
use crate::models::{ErrorResponse, HealthResponse, MatchResponse, Profile, RawMatchResponse};
use crate::services::{submit_and_load_pool, ParticipantStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub store: Option<Arc<dyn ParticipantStore>>,
    pub pool_limit: usize,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(root))
        .route("/health", web::get().to(health_check))
        .route("/match_all", web::post().to(match_all))
        .route("/match_raw_all", web::post().to(match_raw_all));
}

async fn root() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "message": "Backend running" }))
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = match &state.store {
        Some(store) => store.health_check().await.unwrap_or(false),
        None => true,
    };

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        llm_enabled: state.matcher.is_enabled(),
        timestamp: chrono::Utc::now(),
    })
}

/// Rank the hackathon pool against the submitted profile
///
/// POST /match_all
///
/// Request body:
/// ```json
/// {
///   "hackathon": "SCE 2025",
///   "name": "string",
///   "contact": "string",
///   "roles": ["FE"],
///   "skills": ["React"],
///   "interests": ["AI"],
///   "availability": "Full weekend",
///   "blurb": ""
/// }
/// ```
async fn match_all(state: web::Data<AppState>, req: web::Json<Profile>) -> impl Responder {
    if let Err(response) = validate(&req) {
        return response;
    }

    let profile = req.into_inner();
    tracing::info!("Matching {} in {}", profile.name, profile.hackathon);

    let pool = submit_and_load_pool(state.store.as_deref(), &profile, state.pool_limit).await;
    let matches = state.matcher.rank(&profile, &pool).await;

    tracing::info!(
        "Returning {} matches for {} (pool of {})",
        matches.len(),
        profile.name,
        pool.len()
    );

    HttpResponse::Ok().json(MatchResponse { matches })
}

/// Return the model's unparsed response for every candidate
///
/// POST /match_raw_all
async fn match_raw_all(state: web::Data<AppState>, req: web::Json<Profile>) -> impl Responder {
    if let Err(response) = validate(&req) {
        return response;
    }

    let profile = req.into_inner();
    let pool = submit_and_load_pool(state.store.as_deref(), &profile, state.pool_limit).await;
    let results = state.matcher.raw_comparisons(&profile, &pool).await;

    tracing::info!("Returning {} raw comparisons for {}", results.len(), profile.name);

    HttpResponse::Ok().json(RawMatchResponse { results })
}

fn validate(profile: &Profile) -> Result<(), HttpResponse> {
    profile.validate().map_err(|errors| {
        tracing::info!("Validation failed for profile: {:?}", errors);
        HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        })
    })
}
