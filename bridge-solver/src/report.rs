//! Assessment compilation - the externally visible analysis result
//!
//! Top-level field names (`maxStress`, `safetyFactor`) are wire-compatible
//! with the consumers of the original analysis service; nested blocks use
//! snake_case.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::analysis::failure::FailureReport;
use crate::analysis::geometry::GeometryReport;
use crate::analysis::safety::SafetyReport;
use crate::analysis::stability::StabilityReport;
use crate::analysis::stress::{MaterialProperties, StressReport};
use crate::error::SolverError;
use crate::model::BridgeModel;

/// Provenance tag for results produced by this engine
pub const BACKEND_NATIVE: &str = "native_engine";
/// Engine identifier recorded in result metadata
pub const ENGINE_ID: &str = "bridge_solver_native";

/// Overall verdict of an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentStatus {
    Safe,
    Unsafe,
    Error,
}

/// Input counts and the constants behind the estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInfo {
    /// Number of nodes in the request
    pub nodes_count: usize,
    /// Number of beams in the request
    pub beams_count: usize,
    /// Yield strength the assessment was made against (Pa)
    pub yield_strength: f64,
    /// Material and section constants used by the estimator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_properties: Option<MaterialProperties>,
    /// Free-form qualifier, e.g. for reduced-fidelity results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Geometry aggregates surfaced in the detailed block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometrySummary {
    /// Horizontal extent over all nodes
    pub span_length: f64,
    /// Vertical extent over all nodes
    pub height_range: f64,
    /// Sum of beam lengths
    pub total_beam_length: f64,
    /// Mean beam length
    pub avg_beam_length: f64,
}

impl From<&GeometryReport> for GeometrySummary {
    fn from(report: &GeometryReport) -> Self {
        Self {
            span_length: report.span_length,
            height_range: report.height_range,
            total_beam_length: report.total_length,
            avg_beam_length: report.avg_beam_length,
        }
    }
}

/// The nested per-discipline reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedAnalysis {
    /// Geometry aggregates
    pub geometry: GeometrySummary,
    /// Stability evaluation
    pub stability: StabilityReport,
    /// Safety factors and classification
    pub safety: SafetyReport,
    /// Failure mode classification
    pub failure_analysis: FailureReport,
}

/// Result provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// RFC3339 production time
    pub timestamp: String,
    /// Engine identifier
    pub engine: String,
    /// Engine version
    pub version: String,
    /// Depth of the computation, e.g. "detailed"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computation_level: Option<String>,
    /// Confidence qualifier, e.g. "low" for the basic fallback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reliability: Option<String>,
}

impl AnalysisMetadata {
    /// Metadata for a result produced by this engine
    pub fn native() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            engine: ENGINE_ID.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_level: Some("detailed".to_string()),
            reliability: None,
        }
    }
}

/// Outcome of one provider attempt during orchestration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Provider tag, e.g. "external_solver"
    pub method: String,
    /// "success" or "failed"
    pub status: String,
    /// Failure detail when status is "failed"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall-clock seconds spent in the attempt
    pub processing_time: f64,
}

/// Summary of the orchestration pass that produced a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceMetadata {
    /// Version of the orchestrating service
    pub service_version: String,
    /// Number of providers attempted
    pub total_methods_tried: usize,
    /// Tag of the provider that produced the result
    pub successful_method: String,
    /// Total wall-clock seconds across attempts
    pub total_processing_time: f64,
}

/// The externally visible analysis result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeAssessment {
    /// Overall verdict
    pub status: AssessmentStatus,
    /// Maximum combined stress (Pa)
    #[serde(rename = "maxStress")]
    pub max_stress: f64,
    /// Per-beam stresses aligned 1:1 with the input beam order
    pub stresses: Vec<f64>,
    /// Governing combined safety factor
    #[serde(rename = "safetyFactor")]
    pub safety_factor: f64,
    /// Provenance tag of the producing method
    pub backend: String,
    /// Input counts and estimator constants
    pub analysis_info: AnalysisInfo,
    /// Per-discipline detail, absent for reduced-fidelity results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_analysis: Option<DetailedAnalysis>,
    /// Result provenance
    pub analysis_metadata: AnalysisMetadata,
    /// Orchestration attempt history, filled in by the service layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_attempts: Option<Vec<AttemptRecord>>,
    /// Orchestration summary, filled in by the service layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_metadata: Option<ServiceMetadata>,
}

/// Merge the sub-analyses into the final assessment. Pure aggregation: the
/// inputs are consumed, never recomputed.
pub fn compile(
    model: &BridgeModel,
    geometry: GeometryReport,
    stress: StressReport,
    stability: StabilityReport,
    safety: SafetyReport,
    failure: FailureReport,
) -> BridgeAssessment {
    let is_safe = safety.is_safe && stability.is_stable;
    let status = if is_safe {
        AssessmentStatus::Safe
    } else {
        AssessmentStatus::Unsafe
    };

    BridgeAssessment {
        status,
        max_stress: stress.max_stress,
        safety_factor: safety.combined_safety_factor,
        backend: BACKEND_NATIVE.to_string(),
        analysis_info: AnalysisInfo {
            nodes_count: model.nodes.len(),
            beams_count: model.beams.len(),
            yield_strength: stress.yield_strength,
            material_properties: Some(stress.material_properties),
            note: None,
        },
        detailed_analysis: Some(DetailedAnalysis {
            geometry: GeometrySummary::from(&geometry),
            stability,
            safety,
            failure_analysis: failure,
        }),
        analysis_metadata: AnalysisMetadata::native(),
        analysis_attempts: None,
        service_metadata: None,
        stresses: stress.stresses,
    }
}

/// Structured terminal error result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Always `error`
    pub status: AssessmentStatus,
    /// Machine-readable error kind
    pub error: String,
    /// Human-readable message
    pub message: String,
    /// Provenance tag of the method that failed
    pub backend: String,
    /// RFC3339 production time
    pub timestamp: String,
}

impl ErrorReport {
    /// Build a structured error result
    pub fn new(kind: impl Into<String>, message: impl Into<String>, backend: &str) -> Self {
        Self {
            status: AssessmentStatus::Error,
            error: kind.into(),
            message: message.into(),
            backend: backend.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// Build a structured error result from a solver error
    pub fn from_solver(err: &SolverError, backend: &str) -> Self {
        Self::new(err.kind(), err.to_string(), backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze, AnalysisConfig};
    use crate::model::BridgeModel;

    fn sample_model() -> BridgeModel {
        let mut model = BridgeModel::new();
        let a = model.add_node(0.0, 0.0);
        let b = model.add_node(400.0, 0.0);
        let c = model.add_node(200.0, 150.0);
        model.add_beam(a, b);
        model.add_beam(b, c);
        model.add_beam(a, c);
        model.add_support(a);
        model.add_support(b);
        model
    }

    #[test]
    fn test_wire_field_names() {
        let assessment = analyze(&sample_model(), &AnalysisConfig::seeded(42)).unwrap();
        let value = serde_json::to_value(&assessment).unwrap();

        assert!(value.get("maxStress").is_some());
        assert!(value.get("safetyFactor").is_some());
        assert!(value.get("stresses").is_some());
        assert_eq!(value["backend"], BACKEND_NATIVE);
        assert!(value.get("detailed_analysis").is_some());
        assert!(value.get("analysis_attempts").is_none());
    }

    #[test]
    fn test_assessment_round_trips() {
        let assessment = analyze(&sample_model(), &AnalysisConfig::seeded(42)).unwrap();
        let json = serde_json::to_string(&assessment).unwrap();
        let parsed: BridgeAssessment = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.max_stress, assessment.max_stress);
        assert_eq!(parsed.stresses, assessment.stresses);
        assert_eq!(parsed.status, assessment.status);
    }

    #[test]
    fn test_error_report_shape() {
        let err = SolverError::InsufficientData("no beams".to_string());
        let report = ErrorReport::from_solver(&err, BACKEND_NATIVE);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "insufficient_data");
        assert_eq!(value["backend"], BACKEND_NATIVE);
    }
}
