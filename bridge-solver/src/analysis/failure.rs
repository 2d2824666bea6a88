//! Failure mode classification - yield, buckling and fatigue heuristics
//!
//! Each beam is screened independently and may register zero, one or several
//! modes. Probabilities are heuristic rankings, clamped to [0, 1].

use serde::{Deserialize, Serialize};

use crate::analysis::geometry::GeometryReport;
use crate::analysis::stress::StressReport;
use crate::material::Section;
use crate::model::LENGTH_SCALE;

/// Stress above this fraction of yield triggers the yield screen
const YIELD_TRIGGER: f64 = 0.8;
/// Stress above this fraction of yield triggers the fatigue screen
const FATIGUE_TRIGGER: f64 = 0.5;
/// Beams shorter than this (m) are not screened for buckling
const BUCKLING_LENGTH_THRESHOLD: f64 = 2.0;
/// Slenderness ratio above which buckling becomes credible
const BUCKLING_SLENDERNESS_THRESHOLD: f64 = 100.0;

/// Failure mechanisms recognized by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    Yield,
    Buckling,
    Fatigue,
}

impl FailureKind {
    fn description(&self) -> &'static str {
        match self {
            FailureKind::Yield => "plastic deformation of the material",
            FailureKind::Buckling => "lateral instability of a slender beam",
            FailureKind::Fatigue => "degradation under cyclic loading",
        }
    }
}

/// One triggered failure mode on a beam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureMode {
    /// The mechanism
    pub mode: FailureKind,
    /// Heuristic probability in [0, 1]
    pub probability: f64,
    /// Short human-readable description
    pub description: String,
}

/// All failure modes triggered on one beam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamFailureModes {
    /// Position of the beam in the input sequence
    pub beam_index: usize,
    /// Triggered modes, in screen order
    pub failures: Vec<FailureMode>,
}

/// The single most probable (beam, mode) pair across the structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MostLikelyFailure {
    /// Position of the beam in the input sequence
    pub beam_index: usize,
    /// The mechanism
    pub mode: FailureKind,
    /// Heuristic probability in [0, 1]
    pub probability: f64,
    /// Short human-readable description
    pub description: String,
}

/// System-wide failure classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureReport {
    /// Beams that triggered at least one mode
    pub beam_failure_modes: Vec<BeamFailureModes>,
    /// Maximum-probability entry, `None` when nothing triggered
    #[serde(default)]
    pub most_likely_failure: Option<MostLikelyFailure>,
    /// Mean probability across all triggered entries, 0 when none
    pub total_failure_risk: f64,
}

/// Screen every beam for yield, buckling and fatigue.
pub fn classify_failures(
    stress: &StressReport,
    geometry: &GeometryReport,
    section: &Section,
) -> FailureReport {
    let yield_strength = stress.yield_strength;
    let mut beam_failure_modes = Vec::new();
    let mut most_likely: Option<MostLikelyFailure> = None;
    let mut risk_sum = 0.0;
    let mut risk_count = 0usize;

    for (i, &beam_stress) in stress.stresses.iter().enumerate() {
        let mut failures = Vec::new();
        let utilization = beam_stress / yield_strength;

        if utilization > YIELD_TRIGGER {
            failures.push(mode(
                FailureKind::Yield,
                ((utilization - YIELD_TRIGGER) * 5.0).min(1.0),
            ));
        }

        let length = geometry.beam_lengths.get(i).copied().unwrap_or(0.0) * LENGTH_SCALE;
        if length > BUCKLING_LENGTH_THRESHOLD {
            let slenderness = length / section.radius_of_gyration;
            if slenderness > BUCKLING_SLENDERNESS_THRESHOLD {
                failures.push(mode(
                    FailureKind::Buckling,
                    ((slenderness - BUCKLING_SLENDERNESS_THRESHOLD) / 200.0).min(0.8),
                ));
            }
        }

        if utilization > FATIGUE_TRIGGER {
            // The raw heuristic is uncapped and can exceed 1.0 for stresses
            // past yield; clamp to keep probabilities in domain.
            failures.push(mode(
                FailureKind::Fatigue,
                ((utilization - FATIGUE_TRIGGER) * 0.3).min(1.0),
            ));
        }

        if failures.is_empty() {
            continue;
        }

        for failure in &failures {
            risk_sum += failure.probability;
            risk_count += 1;

            let is_new_max = most_likely
                .as_ref()
                .map_or(true, |m| failure.probability > m.probability);
            if is_new_max {
                most_likely = Some(MostLikelyFailure {
                    beam_index: i,
                    mode: failure.mode,
                    probability: failure.probability,
                    description: failure.description.clone(),
                });
            }
        }

        beam_failure_modes.push(BeamFailureModes {
            beam_index: i,
            failures,
        });
    }

    let total_failure_risk = if risk_count == 0 {
        0.0
    } else {
        risk_sum / risk_count as f64
    };

    FailureReport {
        beam_failure_modes,
        most_likely_failure: most_likely,
        total_failure_risk,
    }
}

fn mode(kind: FailureKind, probability: f64) -> FailureMode {
    FailureMode {
        mode: kind,
        probability,
        description: kind.description().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::stress::MaterialProperties;
    use approx::assert_relative_eq;

    fn stress_report(stresses: Vec<f64>) -> StressReport {
        let max_stress = stresses.iter().copied().fold(0.0, f64::max);
        StressReport {
            max_stress,
            avg_stress: max_stress,
            stresses,
            yield_strength: 250e6,
            material_properties: MaterialProperties {
                e: 200e9,
                yield_strength: 250e6,
                assumed_area: 0.01,
                assumed_inertia: 8.33e-6,
            },
            error: None,
        }
    }

    fn geometry_report(lengths: Vec<f64>) -> GeometryReport {
        GeometryReport {
            span_length: 0.0,
            height_range: 0.0,
            beam_angles: vec![0.0; lengths.len()],
            beam_lengths: lengths,
            avg_beam_length: 0.0,
            total_length: 0.0,
            error: None,
        }
    }

    #[test]
    fn test_quiet_beam_triggers_nothing() {
        let report = classify_failures(
            &stress_report(vec![100e6]),
            &geometry_report(vec![100.0]),
            &Section::assumed(),
        );
        assert!(report.beam_failure_modes.is_empty());
        assert!(report.most_likely_failure.is_none());
        assert_eq!(report.total_failure_risk, 0.0);
    }

    #[test]
    fn test_yield_and_fatigue_probabilities() {
        // 0.9 utilization: yield p = 0.5, fatigue p = 0.12
        let report = classify_failures(
            &stress_report(vec![225e6]),
            &geometry_report(vec![100.0]),
            &Section::assumed(),
        );

        let failures = &report.beam_failure_modes[0].failures;
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].mode, FailureKind::Yield);
        assert_relative_eq!(failures[0].probability, 0.5, epsilon = 1e-9);
        assert_eq!(failures[1].mode, FailureKind::Fatigue);
        assert_relative_eq!(failures[1].probability, 0.12, epsilon = 1e-9);

        let most_likely = report.most_likely_failure.unwrap();
        assert_eq!(most_likely.mode, FailureKind::Yield);
        assert_eq!(most_likely.beam_index, 0);
        assert_relative_eq!(report.total_failure_risk, 0.31, epsilon = 1e-9);
    }

    #[test]
    fn test_buckling_requires_length_and_slenderness() {
        // 600 input units = 6 m, slenderness 120 -> p = 0.1
        let report = classify_failures(
            &stress_report(vec![10e6]),
            &geometry_report(vec![600.0]),
            &Section::assumed(),
        );
        let failures = &report.beam_failure_modes[0].failures;
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].mode, FailureKind::Buckling);
        assert_relative_eq!(failures[0].probability, 0.1, epsilon = 1e-9);

        // Short but stressed beams never register buckling.
        let report = classify_failures(
            &stress_report(vec![10e6]),
            &geometry_report(vec![150.0]),
            &Section::assumed(),
        );
        assert!(report.beam_failure_modes.is_empty());
    }

    #[test]
    fn test_buckling_probability_capped() {
        // 40000 input units -> slenderness 8000, uncapped would be 39.5
        let report = classify_failures(
            &stress_report(vec![10e6]),
            &geometry_report(vec![40000.0]),
            &Section::assumed(),
        );
        assert_eq!(report.beam_failure_modes[0].failures[0].probability, 0.8);
    }

    #[test]
    fn test_fatigue_probability_clamped_to_one() {
        // Clamp stress 1.2x yield: raw fatigue p = 0.21, yield p capped at 1.0
        let report = classify_failures(
            &stress_report(vec![300e6]),
            &geometry_report(vec![100.0]),
            &Section::assumed(),
        );
        let failures = &report.beam_failure_modes[0].failures;
        for failure in failures {
            assert!(failure.probability <= 1.0);
        }
        assert_eq!(failures[0].probability, 1.0);
    }

    #[test]
    fn test_most_likely_spans_beams() {
        let report = classify_failures(
            &stress_report(vec![130e6, 240e6]),
            &geometry_report(vec![100.0, 100.0]),
            &Section::assumed(),
        );
        let most_likely = report.most_likely_failure.unwrap();
        assert_eq!(most_likely.beam_index, 1);
        assert_eq!(most_likely.mode, FailureKind::Yield);
    }
}
