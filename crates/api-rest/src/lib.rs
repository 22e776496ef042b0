//! # API REST
//!
//! REST API implementation for the endodontic diagnosis engine.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS)
//!
//! Uses `api-shared` for common types and `endo-core` for the diagnostic rules.

#![warn(rust_2018_idioms)]

pub mod mapping;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    AdditionalReq, EvaluateReq, EvaluateRes, FindingReq, HealthRes, HealthService, SymptomEntry,
    ToothReq, VocabularyRes,
};
use endo_core::{evaluate, CaseOverview, ServerConfig};

/// Application state shared across REST API handlers
///
/// The vocabulary never changes at runtime, so it is built once and shared.
#[derive(Clone)]
struct AppState {
    vocabulary: Arc<VocabularyRes>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, vocabulary, diagnoses),
    components(schemas(
        HealthRes,
        VocabularyRes,
        SymptomEntry,
        EvaluateReq,
        ToothReq,
        FindingReq,
        AdditionalReq,
        EvaluateRes,
    ))
)]
pub struct ApiDoc;

/// Build the REST router for the given configuration.
///
/// Swagger UI is served at `/swagger-ui` with the OpenAPI document at `/api-docs/openapi.json`.
pub fn router(config: &ServerConfig) -> Router {
    let state = AppState {
        vocabulary: Arc::new(mapping::vocabulary()),
    };

    let app = Router::new()
        .route("/health", get(health))
        .route("/vocabulary", get(vocabulary))
        .route("/diagnoses", post(diagnoses))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state);

    if config.cors_permissive() {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Bind the configured address and serve the REST API until the process stops.
///
/// # Errors
/// Returns an error if the address cannot be bound or the HTTP server fails while running.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let addr = config.rest_addr();
    tracing::info!("-- Starting Endo REST API on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(&config)).await?;

    Ok(())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/vocabulary",
    responses(
        (status = 200, description = "Pulpal and periapical symptom vocabularies", body = VocabularyRes)
    )
)]
/// List the symptoms a request may use, by key and display label.
#[axum::debug_handler]
async fn vocabulary(State(state): State<AppState>) -> Json<VocabularyRes> {
    Json(state.vocabulary.as_ref().clone())
}

#[utoipa::path(
    post,
    path = "/diagnoses",
    request_body = EvaluateReq,
    responses(
        (status = 200, description = "Diagnoses, safety alerts and treatment recommendation", body = EvaluateRes),
        (status = 400, description = "Unknown or repeated symptom, or invalid tooth"),
        (status = 422, description = "Body is not valid JSON, is not sent as JSON, or does not match the schema")
    )
)]
/// Evaluate a completed questionnaire
///
/// Symptoms may be given by display label or by short key. When a tooth is supplied the
/// response also carries the rendered case overview.
///
/// # Errors
/// Returns `422 Unprocessable Entity` for any body rejection (syntax, content type, schema).
///
/// Returns `400 Bad Request` if:
/// - a symptom is not in its vocabulary or is listed twice,
/// - the tooth kind is unknown or the label is not in its catalogue.
#[axum::debug_handler]
async fn diagnoses(
    State(_state): State<AppState>,
    payload: Result<Json<EvaluateReq>, JsonRejection>,
) -> Result<Json<EvaluateRes>, (StatusCode, String)> {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            tracing::warn!("Malformed diagnosis request body: {}", rejection.body_text());
            return Err((StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text()));
        }
    };

    let (tooth, record) = match mapping::request_to_domain(req) {
        Ok(parts) => parts,
        Err(e) => {
            tracing::warn!("Rejected diagnosis request: {}", e);
            return Err((StatusCode::BAD_REQUEST, e.to_string()));
        }
    };

    let report = evaluate(&record);
    let overview = tooth
        .as_ref()
        .map(|tooth| CaseOverview::new(tooth, &record, &report));

    Ok(Json(mapping::report_to_res(&report, overview.as_ref())))
}
