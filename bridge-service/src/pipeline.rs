//! Ordered provider fallback
//!
//! One pass, most capable provider first: the external high-fidelity solver
//! (when configured), the native estimation engine, and finally the
//! deterministic basic fallback. Every attempt is recorded; the surviving
//! result carries the attempt history and an orchestration summary.

use std::time::Instant;

use bridge_solver::analysis::{analyze, AnalysisConfig};
use bridge_solver::model::BridgeModel;
use bridge_solver::report::{
    AttemptRecord, BridgeAssessment, ErrorReport, ServiceMetadata, BACKEND_NATIVE,
};
use serde::Serialize;

use crate::client::{ExternalSolverClient, BACKEND_EXTERNAL};
use crate::fallback::{self, BACKEND_BASIC};

/// Result of an orchestrated analysis: a full assessment or a structured
/// terminal error. Both are valid outputs of the service.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Report(Box<BridgeAssessment>),
    Error(ErrorReport),
}

/// The ordered set of analysis providers
pub struct AnalysisPipeline {
    external: Option<ExternalSolverClient>,
    config: AnalysisConfig,
}

impl AnalysisPipeline {
    pub fn new(external: Option<ExternalSolverClient>, config: AnalysisConfig) -> Self {
        Self { external, config }
    }

    /// The configured external solver, if any
    pub fn external(&self) -> Option<&ExternalSolverClient> {
        self.external.as_ref()
    }

    /// Run the ordered attempts until one provider produces a result.
    pub async fn run(&self, model: &BridgeModel) -> AnalysisOutcome {
        let mut attempts = Vec::new();

        if let Some(client) = &self.external {
            let started = Instant::now();
            match client.analyze(model).await {
                Ok(mut assessment) => {
                    tracing::info!("external solver succeeded");
                    attempts.push(success(BACKEND_EXTERNAL, started));
                    enrich(&mut assessment, attempts);
                    return AnalysisOutcome::Report(Box::new(assessment));
                }
                Err(err) => {
                    tracing::warn!("external solver failed: {}", err);
                    attempts.push(failed(BACKEND_EXTERNAL, started, err.to_string()));
                }
            }
        }

        let started = Instant::now();
        match self.run_native(model).await {
            Ok(Ok(mut assessment)) => {
                tracing::info!("native engine succeeded");
                attempts.push(success(BACKEND_NATIVE, started));
                enrich(&mut assessment, attempts);
                return AnalysisOutcome::Report(Box::new(assessment));
            }
            Ok(Err(err)) if err.is_terminal() => {
                // Missing input data is a terminal verdict, not an engine
                // fault; no other provider could do better with it.
                tracing::info!("native engine returned terminal result: {}", err);
                return AnalysisOutcome::Error(ErrorReport::from_solver(&err, BACKEND_NATIVE));
            }
            Ok(Err(err)) => {
                tracing::error!("native engine failed: {}", err);
                attempts.push(failed(BACKEND_NATIVE, started, err.to_string()));
            }
            Err(panic_message) => {
                tracing::error!("native engine panicked: {}", panic_message);
                attempts.push(failed(BACKEND_NATIVE, started, panic_message));
            }
        }

        let started = Instant::now();
        match fallback::basic_analysis(model) {
            Ok(mut assessment) => {
                tracing::warn!("all advanced providers failed, using basic fallback");
                attempts.push(success(BACKEND_BASIC, started));
                enrich(&mut assessment, attempts);
                AnalysisOutcome::Report(Box::new(assessment))
            }
            Err(report) => {
                tracing::error!("even the basic fallback refused the model");
                AnalysisOutcome::Error(report)
            }
        }
    }

    /// Run the native engine off the async runtime. A panic inside the
    /// engine surfaces as the outer `Err` and counts as a failed attempt.
    async fn run_native(
        &self,
        model: &BridgeModel,
    ) -> Result<bridge_solver::error::SolverResult<BridgeAssessment>, String> {
        let model = model.clone();
        let config = self.config;
        tokio::task::spawn_blocking(move || analyze(&model, &config))
            .await
            .map_err(|join_err| join_err.to_string())
    }
}

fn success(method: &str, started: Instant) -> AttemptRecord {
    AttemptRecord {
        method: method.to_string(),
        status: "success".to_string(),
        error: None,
        processing_time: started.elapsed().as_secs_f64(),
    }
}

fn failed(method: &str, started: Instant, error: String) -> AttemptRecord {
    AttemptRecord {
        method: method.to_string(),
        status: "failed".to_string(),
        error: Some(error),
        processing_time: started.elapsed().as_secs_f64(),
    }
}

fn enrich(assessment: &mut BridgeAssessment, attempts: Vec<AttemptRecord>) {
    let successful_method = attempts
        .iter()
        .find(|a| a.status == "success")
        .map(|a| a.method.clone())
        .unwrap_or_else(|| "none".to_string());

    assessment.service_metadata = Some(ServiceMetadata {
        service_version: env!("CARGO_PKG_VERSION").to_string(),
        total_methods_tried: attempts.len(),
        successful_method,
        total_processing_time: attempts.iter().map(|a| a.processing_time).sum(),
    });
    assessment.analysis_attempts = Some(attempts);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_solver::report::AssessmentStatus;

    fn triangle() -> BridgeModel {
        let mut model = BridgeModel::new();
        let a = model.add_node(0.0, 0.0);
        let b = model.add_node(300.0, 0.0);
        let c = model.add_node(150.0, 120.0);
        model.add_beam(a, b);
        model.add_beam(b, c);
        model.add_beam(a, c);
        model.add_support(a);
        model.add_support(b);
        model
    }

    fn pipeline(config: AnalysisConfig) -> AnalysisPipeline {
        AnalysisPipeline::new(None, config)
    }

    #[tokio::test]
    async fn test_native_engine_handles_request() {
        let outcome = pipeline(AnalysisConfig::seeded(1)).run(&triangle()).await;
        match outcome {
            AnalysisOutcome::Report(assessment) => {
                assert_eq!(assessment.backend, BACKEND_NATIVE);
                let meta = assessment.service_metadata.unwrap();
                assert_eq!(meta.successful_method, BACKEND_NATIVE);
                assert_eq!(meta.total_methods_tried, 1);
                assert_eq!(assessment.analysis_attempts.unwrap().len(), 1);
            }
            AnalysisOutcome::Error(report) => panic!("unexpected error: {}", report.message),
        }
    }

    #[tokio::test]
    async fn test_insufficient_data_is_terminal() {
        let outcome = pipeline(AnalysisConfig::seeded(1))
            .run(&BridgeModel::new())
            .await;
        match outcome {
            AnalysisOutcome::Error(report) => {
                assert_eq!(report.status, AssessmentStatus::Error);
                assert_eq!(report.error, "insufficient_data");
                assert_eq!(report.backend, BACKEND_NATIVE);
            }
            AnalysisOutcome::Report(_) => panic!("expected a terminal error"),
        }
    }

    #[tokio::test]
    async fn test_degraded_engine_still_answers() {
        // A broken section degrades the stress stage inside the engine; the
        // native provider still produces a result, so the basic fallback
        // stays out of the picture.
        let config = AnalysisConfig::seeded(1)
            .with_section(bridge_solver::material::Section::new(-1.0, 8.33e-6, 0.05, 0.05));

        let outcome = pipeline(config).run(&triangle()).await;
        match outcome {
            AnalysisOutcome::Report(assessment) => {
                assert_eq!(assessment.backend, BACKEND_NATIVE);
                assert!(assessment.stresses.is_empty());
            }
            AnalysisOutcome::Error(report) => panic!("unexpected error: {}", report.message),
        }
    }

    #[tokio::test]
    async fn test_outcome_serializes_flat() {
        let outcome = pipeline(AnalysisConfig::seeded(1)).run(&triangle()).await;
        let value = serde_json::to_value(&outcome).unwrap();
        // Untagged: the assessment fields sit at the top level.
        assert!(value.get("status").is_some());
        assert!(value.get("analysis_attempts").is_some());
    }
}
