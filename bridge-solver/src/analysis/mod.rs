//! Analysis pipeline and configuration
//!
//! Stage order: geometry feeds both the stress estimator and the stability
//! analyzer; safety consumes stress + stability; failure classification
//! consumes stress + geometry; the compiler merges everything. A stage that
//! fails internally is downgraded to a degraded-but-well-shaped report so
//! later stages always receive usable input; only missing input data aborts
//! the run, and that is itself a structured outcome.

pub mod failure;
pub mod geometry;
pub mod safety;
pub mod stability;
pub mod stress;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{SolverError, SolverResult};
use crate::material::{Material, Section};
use crate::model::BridgeModel;
use crate::report::{self, BridgeAssessment};

/// Options for a single analysis run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Material shared by all beams
    #[serde(default)]
    pub material: Material,
    /// Idealized cross-section shared by all beams
    #[serde(default)]
    pub section: Section,
    /// Seed for the bounded estimation noise. `None` draws from entropy,
    /// making results non-reproducible across runs.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            material: Material::steel(),
            section: Section::assumed(),
            seed: None,
        }
    }
}

impl AnalysisConfig {
    /// Configuration with a fixed noise seed, for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Override the material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Override the section
    pub fn with_section(mut self, section: Section) -> Self {
        self.section = section;
        self
    }
}

/// Run the full analysis pipeline over a bridge model.
///
/// Returns `SolverError::InsufficientData` when the model has no nodes or no
/// beams; callers serialize that as a structured error result, not a fault.
pub fn analyze(model: &BridgeModel, config: &AnalysisConfig) -> SolverResult<BridgeAssessment> {
    if model.nodes.is_empty() || model.beams.is_empty() {
        return Err(SolverError::InsufficientData(
            "at least one node and one beam are required".to_string(),
        ));
    }

    log::info!(
        "analyzing bridge: {} nodes, {} beams, {} supports, {} loads",
        model.nodes.len(),
        model.beams.len(),
        model.supports.len(),
        model.loads.len()
    );

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let geometry = geometry::analyze_geometry(&model.nodes, &model.beams).unwrap_or_else(|err| {
        log::error!("geometry analysis degraded: {err}");
        geometry::GeometryReport::degraded(err.to_string())
    });

    let stress = stress::estimate_stresses(model, &geometry, config, &mut rng).unwrap_or_else(
        |err| {
            log::error!("stress estimation degraded: {err}");
            stress::StressReport::degraded(err.to_string(), config)
        },
    );

    let stability = stability::analyze_stability(&model.nodes, &model.beams, &model.supports);
    let safety = safety::evaluate_safety(&stress, &stability);
    let failure = failure::classify_failures(&stress, &geometry, &config.section);

    let assessment = report::compile(model, geometry, stress, stability, safety, failure);
    log::info!(
        "analysis complete: {:?}, safety factor {:.2}",
        assessment.status,
        assessment.safety_factor
    );
    Ok(assessment)
}
