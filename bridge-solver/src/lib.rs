//! Bridge Solver - structural safety estimation for planar truss bridges
//!
//! This library is the fallback analysis path used when a high-fidelity
//! external solver is unavailable. It derives member geometry from node
//! coordinates, estimates combined axial/bending stresses from fixed
//! material constants and applied point loads, checks global stability via
//! static-determinacy bookkeeping and graph connectivity, evaluates safety
//! factors and classifies likely failure modes, then compiles everything
//! into a single structured assessment.
//!
//! It is a bounded heuristic estimator, not a finite-element solver: no
//! stiffness matrix is assembled and results carry a documented estimation
//! noise. The contract is a plausible, always-terminating verdict.
//!
//! ## Example
//! ```rust
//! use bridge_solver::prelude::*;
//!
//! let mut model = BridgeModel::new();
//!
//! // A minimal triangular truss (coordinates in input units)
//! let a = model.add_node(0.0, 0.0);
//! let b = model.add_node(400.0, 0.0);
//! let c = model.add_node(200.0, 150.0);
//! model.add_beam(a, b);
//! model.add_beam(b, c);
//! model.add_beam(a, c);
//! model.add_support(a);
//! model.add_support(b);
//! model.add_load(c, 0.0, -12000.0);
//!
//! let config = AnalysisConfig::seeded(42);
//! let assessment = analyze(&model, &config).unwrap();
//! assert_eq!(assessment.stresses.len(), 3);
//! ```

pub mod analysis;
pub mod error;
pub mod material;
pub mod model;
pub mod report;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{analyze, AnalysisConfig};
    pub use crate::analysis::{
        failure::{FailureKind, FailureReport},
        geometry::GeometryReport,
        safety::{SafetyReport, SafetyTier},
        stability::StabilityReport,
        stress::StressReport,
    };
    pub use crate::error::{SolverError, SolverResult};
    pub use crate::material::{Material, Section};
    pub use crate::model::{Beam, BridgeModel, Node, PointLoad, Support};
    pub use crate::report::{AssessmentStatus, BridgeAssessment, ErrorReport};
}
