//! Safety factor evaluation and classification

use serde::{Deserialize, Serialize};

use crate::analysis::stability::StabilityReport;
use crate::analysis::stress::StressReport;

/// Sentinel strength factor reported when max stress is zero; stands in for
/// "no load, infinitely safe" without emitting a non-JSON infinity.
pub const MAX_STRENGTH_FACTOR: f64 = 1e6;

/// Combined factors at or above this are considered safe
pub const SAFE_FACTOR_THRESHOLD: f64 = 1.5;

/// Discrete safety classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyTier {
    #[serde(rename = "Very safe")]
    VerySafe,
    #[serde(rename = "Safe")]
    Safe,
    #[serde(rename = "Marginally safe")]
    MarginallySafe,
    #[serde(rename = "Unsafe")]
    Unsafe,
    #[serde(rename = "Critical")]
    Critical,
}

impl SafetyTier {
    /// Classify a combined safety factor (inclusive lower bounds)
    pub fn classify(combined: f64) -> Self {
        if combined >= 2.5 {
            SafetyTier::VerySafe
        } else if combined >= 2.0 {
            SafetyTier::Safe
        } else if combined >= SAFE_FACTOR_THRESHOLD {
            SafetyTier::MarginallySafe
        } else if combined >= 1.0 {
            SafetyTier::Unsafe
        } else {
            SafetyTier::Critical
        }
    }
}

/// Strength and stability safety factors with their classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyReport {
    /// Yield strength over max stress, rounded to two decimals
    pub strength_safety_factor: f64,
    /// The stability factor, passed through
    pub stability_safety_factor: f64,
    /// min(strength, 2 x stability) - the governing, more conservative value
    pub combined_safety_factor: f64,
    /// Discrete tier derived from the combined factor
    pub safety_status: SafetyTier,
    /// True iff the combined factor clears the safe threshold
    pub is_safe: bool,
}

/// Convert stress and stability results into safety factors.
///
/// Pure function: the same reports always produce the same evaluation.
pub fn evaluate_safety(stress: &StressReport, stability: &StabilityReport) -> SafetyReport {
    let strength = if stress.max_stress > 0.0 {
        (stress.yield_strength / stress.max_stress).min(MAX_STRENGTH_FACTOR)
    } else {
        MAX_STRENGTH_FACTOR
    };

    let stability_factor = stability.stability_factor;
    let combined = strength.min(stability_factor * 2.0);

    SafetyReport {
        strength_safety_factor: round2(strength),
        stability_safety_factor: round2(stability_factor),
        combined_safety_factor: round2(combined),
        safety_status: SafetyTier::classify(combined),
        is_safe: combined >= SAFE_FACTOR_THRESHOLD,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::stress::MaterialProperties;

    fn stress_report(max_stress: f64) -> StressReport {
        StressReport {
            stresses: vec![max_stress],
            max_stress,
            avg_stress: max_stress,
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

    fn stability_report(factor: f64) -> StabilityReport {
        StabilityReport {
            status: "Statically determinate".to_string(),
            stability_factor: factor,
            static_determinacy: 0,
            connected_components: 1,
            total_dof: 6,
            constraints: 6,
            is_stable: true,
        }
    }

    #[test]
    fn test_strength_factor_is_yield_over_max() {
        let report = evaluate_safety(&stress_report(100e6), &stability_report(2.0));
        assert_eq!(report.strength_safety_factor, 2.5);
        assert_eq!(report.combined_safety_factor, 2.5);
        assert_eq!(report.safety_status, SafetyTier::VerySafe);
        assert!(report.is_safe);
    }

    #[test]
    fn test_zero_stress_uses_sentinel() {
        let report = evaluate_safety(&stress_report(0.0), &stability_report(1.0));
        assert_eq!(report.strength_safety_factor, MAX_STRENGTH_FACTOR);
        // Stability still governs: min(sentinel, 2 x 1.0) = 2.0
        assert_eq!(report.combined_safety_factor, 2.0);
    }

    #[test]
    fn test_stability_governs_when_conservative() {
        let report = evaluate_safety(&stress_report(50e6), &stability_report(0.0));
        assert_eq!(report.combined_safety_factor, 0.0);
        assert_eq!(report.safety_status, SafetyTier::Critical);
        assert!(!report.is_safe);
    }

    #[test]
    fn test_tier_thresholds_inclusive() {
        assert_eq!(SafetyTier::classify(2.5), SafetyTier::VerySafe);
        assert_eq!(SafetyTier::classify(2.0), SafetyTier::Safe);
        assert_eq!(SafetyTier::classify(1.5), SafetyTier::MarginallySafe);
        assert_eq!(SafetyTier::classify(1.0), SafetyTier::Unsafe);
        assert_eq!(SafetyTier::classify(0.99), SafetyTier::Critical);
    }

    #[test]
    fn test_evaluation_is_pure() {
        let stress = stress_report(125e6);
        let stability = stability_report(1.2);
        let first = evaluate_safety(&stress, &stability);
        let second = evaluate_safety(&stress, &stability);
        assert_eq!(first, second);
    }
}
