use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use bridge_solver::model::BridgeModel;

use crate::metrics::design_metrics;
use crate::pipeline::{AnalysisOutcome, AnalysisPipeline};

/// Application state
pub struct AppState {
    pipeline: AnalysisPipeline,
}

/// Build the API router
pub fn create_router(pipeline: AnalysisPipeline) -> Router {
    let state = AppState { pipeline };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/api/v1/version", get(version_handler))
        .route("/api/v1/validate", post(validate_handler))
        .route("/api/v1/analyze", post(analyze_handler))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Root endpoint
async fn root_handler() -> Json<serde_json::Value> {
    Json(json!({
        "service": "Bridge Analysis Service",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "description": "Structural safety estimation for truss bridge models with external solver fallback",
        "providers": ["external_solver", "native_engine", "basic_fallback"]
    }))
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let (external_configured, external_available) = match state.pipeline.external() {
        Some(client) => (true, client.health_check().await.is_ok()),
        None => (false, false),
    };

    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "external_solver_configured": external_configured,
        "external_solver_available": external_available,
    }))
}

/// Version endpoint
async fn version_handler() -> Json<serde_json::Value> {
    Json(json!({
        "service": "bridge-service",
        "version": env!("CARGO_PKG_VERSION"),
        "engine": bridge_solver::report::ENGINE_ID,
    }))
}

/// Validate a model without running analysis
async fn validate_handler(Json(model): Json<BridgeModel>) -> impl IntoResponse {
    let (errors, warnings) = validate_model(&model);
    let is_valid = errors.is_empty();

    let status = if is_valid {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    (
        status,
        Json(json!({
            "status": if is_valid { "valid" } else { "invalid" },
            "errors": errors,
            "warnings": warnings,
            "nodes": model.nodes.len(),
            "beams": model.beams.len(),
            "supports": model.supports.len(),
            "loads": model.loads.len(),
        })),
    )
}

/// Run the analysis pipeline on a model
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(model): Json<BridgeModel>,
) -> impl IntoResponse {
    let request_id = Uuid::new_v4();
    tracing::info!(
        "analysis request {}: {} nodes, {} beams, {} supports, {} loads",
        request_id,
        model.nodes.len(),
        model.beams.len(),
        model.supports.len(),
        model.loads.len()
    );

    let (_, warnings) = validate_model(&model);
    if !warnings.is_empty() {
        tracing::warn!("request {}: {}", request_id, warnings.join("; "));
    }

    let outcome = state.pipeline.run(&model).await;

    match outcome {
        AnalysisOutcome::Report(assessment) => {
            tracing::info!(
                "request {} complete: {:?}, safety factor {:.2}",
                request_id,
                assessment.status,
                assessment.safety_factor
            );

            let metrics = design_metrics(&model, &assessment);
            let mut body = match serde_json::to_value(&*assessment) {
                Ok(value) => value,
                Err(err) => return output_error(request_id, err),
            };
            body["design_metrics"] = match serde_json::to_value(&metrics) {
                Ok(value) => value,
                Err(err) => return output_error(request_id, err),
            };

            (StatusCode::OK, Json(body))
        }
        AnalysisOutcome::Error(report) => {
            tracing::info!(
                "request {} ended with structured error: {}",
                request_id,
                report.error
            );
            // A structured error is a terminal, valid output of the
            // analysis, so it travels with a success status.
            match serde_json::to_value(&report) {
                Ok(body) => (StatusCode::OK, Json(body)),
                Err(err) => output_error(request_id, err),
            }
        }
    }
}

fn output_error(request_id: Uuid, err: serde_json::Error) -> (StatusCode, Json<serde_json::Value>) {
    tracing::error!("request {}: failed to serialize result: {}", request_id, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "status": "error",
            "error": "output_error",
            "message": "failed to serialize result",
        })),
    )
}

/// Structural sanity checks on the raw model. Errors block analysis at the
/// validation endpoint; warnings are advisory only.
fn validate_model(model: &BridgeModel) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if model.nodes.len() < 2 {
        errors.push("at least 2 nodes are required".to_string());
    }
    if model.beams.is_empty() {
        errors.push("at least 1 beam is required".to_string());
    }

    for (i, beam) in model.beams.iter().enumerate() {
        if beam.endpoints(model.nodes.len()).is_none() {
            errors.push(format!("beam {i}: node reference out of range"));
        } else if beam.start == beam.end {
            errors.push(format!("beam {i}: connects a node to itself"));
        }
    }

    let mut connected = vec![false; model.nodes.len()];
    for beam in &model.beams {
        if let Some((start, end)) = beam.endpoints(model.nodes.len()) {
            connected[start] = true;
            connected[end] = true;
        }
    }
    let isolated = connected.iter().filter(|&&c| !c).count();
    if isolated > 0 && !model.nodes.is_empty() {
        warnings.push(format!("{isolated} isolated node(s) detected"));
    }

    if model.supports.is_empty() {
        warnings.push("no supports defined - structure may be unstable".to_string());
    }

    (errors, warnings)
}
