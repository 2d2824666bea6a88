//! Client for the external high-fidelity solver service
//!
//! The external solver is an optional collaborator that accepts the same
//! model payload and returns an equivalent report shape. Its absence is an
//! expected condition handled by the pipeline, never a fault.

use bridge_solver::model::BridgeModel;
use bridge_solver::report::{AnalysisMetadata, BridgeAssessment};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Provenance tag for results produced by the external solver
pub const BACKEND_EXTERNAL: &str = "external_solver";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("solver returned an error: {0}")]
    Api(String),
}

/// HTTP client for the external solver
pub struct ExternalSolverClient {
    base_url: String,
    client: reqwest::Client,
}

impl ExternalSolverClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Get the base URL for the client
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if the solver service is healthy
    pub async fn health_check(&self) -> Result<HealthResponse, ClientError> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?.json().await?;
        Ok(response)
    }

    /// Submit the model for analysis
    pub async fn analyze(&self, model: &BridgeModel) -> Result<BridgeAssessment, ClientError> {
        let url = format!("{}/api/v1/analyze", self.base_url);
        let response = self.client.post(&url).json(model).send().await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(ClientError::Api(error_text));
        }

        let mut assessment: BridgeAssessment = response.json().await?;

        // Tag provenance regardless of what the remote says about itself.
        assessment.backend = BACKEND_EXTERNAL.to_string();
        assessment.analysis_metadata = AnalysisMetadata {
            timestamp: Utc::now().to_rfc3339(),
            engine: BACKEND_EXTERNAL.to_string(),
            version: "1.0".to_string(),
            computation_level: None,
            reliability: None,
        };

        Ok(assessment)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}
