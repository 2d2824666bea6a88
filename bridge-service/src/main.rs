mod api;
mod client;
mod fallback;
mod metrics;
mod pipeline;

use bridge_solver::analysis::AnalysisConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::client::ExternalSolverClient;
use crate::pipeline::AnalysisPipeline;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bridge_service=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Bridge Analysis Service");

    // Optional external high-fidelity solver
    let external = match std::env::var("EXTERNAL_SOLVER_URL") {
        Ok(url) => {
            let client = ExternalSolverClient::new(url);
            tracing::info!("Using external solver at {}", client.base_url());
            match client.health_check().await {
                Ok(_) => tracing::info!("External solver found and accessible"),
                Err(e) => {
                    tracing::warn!("External solver not reachable: {}", e);
                    tracing::warn!("Requests will fall back to the native engine");
                }
            }
            Some(client)
        }
        Err(_) => {
            tracing::warn!("EXTERNAL_SOLVER_URL not set");
            tracing::warn!("Requests will be analyzed by the native engine directly");
            None
        }
    };

    // Optional fixed noise seed for reproducible estimates
    let config = match std::env::var("ANALYSIS_SEED")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
    {
        Some(seed) => {
            tracing::info!("Using fixed analysis seed {}", seed);
            AnalysisConfig::seeded(seed)
        }
        None => AnalysisConfig::default(),
    };

    let pipeline = AnalysisPipeline::new(external, config);

    // Build application router
    let app = api::create_router(pipeline);

    // Bind to address
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8085".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Listening on {}", addr);
    tracing::info!("API endpoints:");
    tracing::info!("  GET  /health");
    tracing::info!("  GET  /api/v1/version");
    tracing::info!("  POST /api/v1/validate");
    tracing::info!("  POST /api/v1/analyze");

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
