//! Material and section constants used by the stress estimator
//!
//! These are engineering placeholders, not properties derived from real
//! section geometry: the estimator assumes every beam shares one material
//! and one idealized cross-section.

use serde::{Deserialize, Serialize};

/// Material properties for the stress estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Modulus of elasticity (Young's modulus) in Pa
    pub e: f64,
    /// Yield strength in Pa
    pub yield_strength: f64,
}

impl Material {
    /// Create a new material with given properties
    pub fn new(e: f64, yield_strength: f64) -> Self {
        Self { e, yield_strength }
    }

    /// Typical structural steel
    pub fn steel() -> Self {
        Self {
            e: 200e9,              // 200 GPa
            yield_strength: 250e6, // 250 MPa
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel()
    }
}

/// Assumed cross-section properties shared by all beams
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Cross-sectional area in m²
    pub area: f64,
    /// Moment of inertia in m⁴
    pub inertia: f64,
    /// Radius of gyration in m, governs slenderness
    pub radius_of_gyration: f64,
    /// Distance from neutral axis to extreme fiber in m
    pub half_depth: f64,
}

impl Section {
    /// Create a section with explicit properties
    pub fn new(area: f64, inertia: f64, radius_of_gyration: f64, half_depth: f64) -> Self {
        Self {
            area,
            inertia,
            radius_of_gyration,
            half_depth,
        }
    }

    /// The idealized section assumed by the estimator: 0.01 m² area,
    /// 8.33e-6 m⁴ inertia, 5 cm radius of gyration, 10 cm total depth.
    pub fn assumed() -> Self {
        Self {
            area: 0.01,
            inertia: 8.33e-6,
            radius_of_gyration: 0.05,
            half_depth: 0.05,
        }
    }

    /// True when every property is positive and usable in stress math
    pub fn is_valid(&self) -> bool {
        self.area > 0.0
            && self.inertia > 0.0
            && self.radius_of_gyration > 0.0
            && self.half_depth > 0.0
    }
}

impl Default for Section {
    fn default() -> Self {
        Self::assumed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steel_properties() {
        let steel = Material::steel();
        assert_eq!(steel.e, 200e9);
        assert_eq!(steel.yield_strength, 250e6);
    }

    #[test]
    fn test_assumed_section_is_valid() {
        assert!(Section::assumed().is_valid());
        assert!(!Section::new(0.0, 8.33e-6, 0.05, 0.05).is_valid());
    }
}
