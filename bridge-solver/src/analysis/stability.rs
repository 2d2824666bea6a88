//! Stability analysis - static determinacy and connectivity
//!
//! Planar bookkeeping: every node carries three degrees of freedom and every
//! support removes three. A structure split into disjoint pieces is unstable
//! no matter what the determinacy arithmetic says.

use petgraph::algo::connected_components;
use petgraph::graph::UnGraph;
use serde::{Deserialize, Serialize};

use crate::model::{Beam, Node, Support};

/// Degrees of freedom per planar node (two translations, one rotation)
const DOF_PER_NODE: i64 = 3;
/// Constraints per fully fixed support
const CONSTRAINTS_PER_SUPPORT: i64 = 3;
/// Redundancy bonus per unit of static indeterminacy
const REDUNDANCY_BONUS: f64 = 0.1;
/// Upper bound on the stability factor
const MAX_STABILITY_FACTOR: f64 = 2.0;

/// Global stability characteristics of the structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StabilityReport {
    /// Human-readable determinacy classification
    pub status: String,
    /// 0.0 unstable, 1.0 determinate, up to 2.0 with redundancy
    pub stability_factor: f64,
    /// beams + constraints - degrees of freedom; negative means
    /// under-constrained
    pub static_determinacy: i64,
    /// Number of connected components over the node set
    pub connected_components: usize,
    /// Total degrees of freedom (3 per node)
    pub total_dof: i64,
    /// Total constraints (3 per support)
    pub constraints: i64,
    /// True iff determinacy >= 0 and the structure is one connected piece
    pub is_stable: bool,
}

/// Evaluate static determinacy and connectivity.
///
/// Beams with invalid endpoints contribute to the beam count (they occupy an
/// input slot) but add no connectivity edge.
pub fn analyze_stability(nodes: &[Node], beams: &[Beam], supports: &[Support]) -> StabilityReport {
    let total_dof = nodes.len() as i64 * DOF_PER_NODE;
    let constraints = supports.len() as i64 * CONSTRAINTS_PER_SUPPORT;
    let static_determinacy = beams.len() as i64 + constraints - total_dof;

    let (stability_factor, status) = match static_determinacy {
        d if d < 0 => (0.0, "Unstable - insufficient restraint"),
        0 => (1.0, "Statically determinate"),
        d => (
            (1.0 + d as f64 * REDUNDANCY_BONUS).min(MAX_STABILITY_FACTOR),
            "Statically indeterminate",
        ),
    };

    let mut graph = UnGraph::<(), ()>::with_capacity(nodes.len(), beams.len());
    let indices: Vec<_> = nodes.iter().map(|_| graph.add_node(())).collect();
    for beam in beams {
        if let Some((start, end)) = beam.endpoints(nodes.len()) {
            graph.add_edge(indices[start], indices[end], ());
        }
    }
    let components = connected_components(&graph);

    StabilityReport {
        status: status.to_string(),
        stability_factor,
        static_determinacy,
        connected_components: components,
        total_dof,
        constraints,
        is_stable: static_determinacy >= 0 && components == 1,
    }
}
