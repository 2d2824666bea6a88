//! Design metric enrichment
//!
//! Aggregate indicators computed from the request and its assessment,
//! attached to successful responses. They rank designs against each other;
//! none of them feed back into the safety verdict.

use bridge_solver::model::BridgeModel;
use bridge_solver::report::BridgeAssessment;
use serde::Serialize;

/// Shape and connectivity indicators
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuralMetrics {
    /// Beams per node
    pub node_beam_ratio: f64,
    /// Average connections per node
    pub connectivity_index: f64,
    /// Horizontal extent over all nodes
    pub span_length: f64,
    /// Highest number of beams meeting at one node
    pub max_node_degree: usize,
}

/// How well the material is worked
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencyMetrics {
    /// Mean stress as a percentage of yield
    pub stress_utilization: f64,
    /// 1.0 when every beam carries the same stress
    pub stress_uniformity: f64,
    /// Beams below 30% of yield
    pub over_designed_beams: usize,
    /// Beams above 80% of yield
    pub critical_beams: usize,
}

/// Margin and redundancy indicators
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StabilityMetrics {
    /// Percent margin above a unit safety factor
    pub safety_margin: f64,
    /// Beams beyond the minimal tree, relative to that minimum
    pub redundancy_level: f64,
    /// Supports per node
    pub support_adequacy: f64,
}

/// The full enrichment block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignMetrics {
    pub structural: StructuralMetrics,
    /// Absent when the result carries no stresses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<EfficiencyMetrics>,
    pub stability: StabilityMetrics,
}

/// Compute the enrichment block for a completed assessment.
pub fn design_metrics(model: &BridgeModel, assessment: &BridgeAssessment) -> DesignMetrics {
    let node_count = model.nodes.len();
    let beam_count = model.beams.len();

    let structural = StructuralMetrics {
        node_beam_ratio: ratio(beam_count as f64, node_count as f64),
        connectivity_index: ratio(beam_count as f64 * 2.0, node_count as f64),
        span_length: span_length(model),
        max_node_degree: max_node_degree(model),
    };

    let efficiency = if assessment.stresses.is_empty() {
        None
    } else {
        let yield_strength = assessment.analysis_info.yield_strength;
        let stresses = &assessment.stresses;
        let sum: f64 = stresses.iter().sum();
        let avg = sum / stresses.len() as f64;
        let max = stresses.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = stresses.iter().copied().fold(f64::INFINITY, f64::min);

        Some(EfficiencyMetrics {
            stress_utilization: avg / yield_strength * 100.0,
            stress_uniformity: if max > 0.0 { 1.0 - (max - min) / max } else { 1.0 },
            over_designed_beams: stresses
                .iter()
                .filter(|&&s| s < yield_strength * 0.3)
                .count(),
            critical_beams: stresses
                .iter()
                .filter(|&&s| s > yield_strength * 0.8)
                .count(),
        })
    };

    let min_beams = node_count.saturating_sub(1).max(1) as f64;
    let stability = StabilityMetrics {
        safety_margin: if assessment.safety_factor > 1.0 {
            (assessment.safety_factor - 1.0) * 100.0
        } else {
            0.0
        },
        redundancy_level: ((beam_count as f64 - min_beams) / min_beams).max(0.0),
        support_adequacy: ratio(model.supports.len() as f64, node_count as f64),
    };

    DesignMetrics {
        structural,
        efficiency,
        stability,
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

fn span_length(model: &BridgeModel) -> f64 {
    if model.nodes.len() < 2 {
        return 0.0;
    }
    let max = model.nodes.iter().map(|n| n.x).fold(f64::NEG_INFINITY, f64::max);
    let min = model.nodes.iter().map(|n| n.x).fold(f64::INFINITY, f64::min);
    max - min
}

fn max_node_degree(model: &BridgeModel) -> usize {
    let mut degrees = vec![0usize; model.nodes.len()];
    for beam in &model.beams {
        if let Some((start, end)) = beam.endpoints(model.nodes.len()) {
            degrees[start] += 1;
            degrees[end] += 1;
        }
    }
    degrees.into_iter().max().unwrap_or(0)
}
