//! Deterministic last-resort analysis
//!
//! Runs when both the external solver and the native engine fail. The
//! stresses follow an index-keyed pattern so the result is reproducible
//! without any randomness, at the cost of ignoring the actual geometry.

use bridge_solver::model::BridgeModel;
use bridge_solver::report::{
    AnalysisInfo, AnalysisMetadata, AssessmentStatus, BridgeAssessment, ErrorReport,
};
use chrono::Utc;

/// Provenance tag for last-resort results
pub const BACKEND_BASIC: &str = "basic_fallback";

/// Base stress the index pattern scales (Pa)
const BASE_STRESS: f64 = 150e6;
/// Yield strength assumed by the fallback (Pa)
const YIELD_STRENGTH: f64 = 250e6;

/// Produce a reduced-fidelity assessment that cannot fail on any model with
/// at least one beam.
pub fn basic_analysis(model: &BridgeModel) -> Result<BridgeAssessment, ErrorReport> {
    if model.beams.is_empty() {
        return Err(ErrorReport::new(
            "no_beams",
            "no beams to analyze",
            BACKEND_BASIC,
        ));
    }

    let stresses: Vec<f64> = (0..model.beams.len())
        .map(|i| BASE_STRESS * (0.5 + (i % 10) as f64 * 0.1))
        .collect();

    let max_stress = stresses.iter().copied().fold(0.0, f64::max);
    let safety_factor = if max_stress > 0.0 {
        let factor = YIELD_STRENGTH / max_stress;
        (factor * 100.0).round() / 100.0
    } else {
        10.0
    };

    let status = if safety_factor > 1.5 {
        AssessmentStatus::Safe
    } else {
        AssessmentStatus::Unsafe
    };

    Ok(BridgeAssessment {
        status,
        max_stress,
        stresses,
        safety_factor,
        backend: BACKEND_BASIC.to_string(),
        analysis_info: AnalysisInfo {
            nodes_count: model.nodes.len(),
            beams_count: model.beams.len(),
            yield_strength: YIELD_STRENGTH,
            material_properties: None,
            note: Some("simplified emergency analysis".to_string()),
        },
        detailed_analysis: None,
        analysis_metadata: AnalysisMetadata {
            timestamp: Utc::now().to_rfc3339(),
            engine: BACKEND_BASIC.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_level: None,
            reliability: Some("low".to_string()),
        },
        analysis_attempts: None,
        service_metadata: None,
    })
}
