//! Geometry analysis - spans, beam lengths and orientations

use serde::{Deserialize, Serialize};

use crate::error::{SolverError, SolverResult};
use crate::model::{Beam, Node};

/// Derived geometric properties of the bridge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryReport {
    /// Horizontal extent over all nodes
    pub span_length: f64,
    /// Vertical extent over all nodes
    pub height_range: f64,
    /// Per-beam Euclidean lengths, aligned 1:1 with the input beam order.
    /// Beams with an invalid endpoint occupy their slot with length 0.
    pub beam_lengths: Vec<f64>,
    /// Per-beam orientations in degrees, range (-180, 180]
    pub beam_angles: Vec<f64>,
    /// Arithmetic mean of beam lengths, 0 with no beams
    pub avg_beam_length: f64,
    /// Sum of beam lengths
    pub total_length: f64,
    /// Set when this stage degraded instead of producing real values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GeometryReport {
    /// A well-shaped but empty report carrying the failure message, so
    /// downstream stages still receive usable input.
    pub(crate) fn degraded(message: String) -> Self {
        Self {
            span_length: 0.0,
            height_range: 0.0,
            beam_lengths: Vec::new(),
            beam_angles: Vec::new(),
            avg_beam_length: 0.0,
            total_length: 0.0,
            error: Some(message),
        }
    }
}

/// Derive span metrics and per-beam length/angle from node coordinates.
///
/// Beams referencing an out-of-range node contribute a zero-length,
/// zero-angle slot and are excluded from the aggregates.
pub fn analyze_geometry(nodes: &[Node], beams: &[Beam]) -> SolverResult<GeometryReport> {
    if nodes
        .iter()
        .any(|n| !n.x.is_finite() || !n.y.is_finite())
    {
        return Err(SolverError::Computation {
            stage: "geometry",
            message: "non-finite node coordinate".to_string(),
        });
    }

    let span_length = extent(nodes.iter().map(|n| n.x));
    let height_range = extent(nodes.iter().map(|n| n.y));

    let mut beam_lengths = Vec::with_capacity(beams.len());
    let mut beam_angles = Vec::with_capacity(beams.len());

    for beam in beams {
        match beam.endpoints(nodes.len()) {
            Some((start, end)) => {
                let a = nodes[start];
                let b = nodes[end];
                let dx = b.x - a.x;
                let dy = b.y - a.y;
                beam_lengths.push((dx * dx + dy * dy).sqrt());
                beam_angles.push(dy.atan2(dx).to_degrees());
            }
            None => {
                beam_lengths.push(0.0);
                beam_angles.push(0.0);
            }
        }
    }

    let total_length: f64 = beam_lengths.iter().sum();
    let avg_beam_length = if beam_lengths.is_empty() {
        0.0
    } else {
        total_length / beam_lengths.len() as f64
    };

    Ok(GeometryReport {
        span_length,
        height_range,
        beam_lengths,
        beam_angles,
        avg_beam_length,
        total_length,
        error: None,
    })
}

fn extent(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let max = values.clone().fold(f64::NEG_INFINITY, f64::max);
    let min = values.fold(f64::INFINITY, f64::min);
    if max >= min {
        max - min
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle() -> Vec<Node> {
        vec![
            Node::new(0.0, 0.0),
            Node::new(400.0, 0.0),
            Node::new(200.0, 150.0),
        ]
    }

    #[test]
    fn test_span_and_height() {
        let report = analyze_geometry(&triangle(), &[]).unwrap();
        assert_relative_eq!(report.span_length, 400.0);
        assert_relative_eq!(report.height_range, 150.0);
        assert_eq!(report.avg_beam_length, 0.0);
    }

    #[test]
    fn test_beam_lengths_and_angles() {
        let beams = vec![Beam::new(0, 1), Beam::new(0, 2)];
        let report = analyze_geometry(&triangle(), &beams).unwrap();

        assert_relative_eq!(report.beam_lengths[0], 400.0);
        assert_relative_eq!(report.beam_angles[0], 0.0);
        assert_relative_eq!(report.beam_lengths[1], 250.0);
        assert_relative_eq!(
            report.beam_angles[1],
            (150.0f64).atan2(200.0).to_degrees()
        );
        assert_relative_eq!(report.total_length, 650.0);
        assert_relative_eq!(report.avg_beam_length, 325.0);
    }

    #[test]
    fn test_invalid_endpoint_keeps_slot() {
        let beams = vec![Beam::new(0, 1), Beam::new(1, 7), Beam::new(-2, 0)];
        let report = analyze_geometry(&triangle(), &beams).unwrap();

        assert_eq!(report.beam_lengths.len(), 3);
        assert_eq!(report.beam_lengths[1], 0.0);
        assert_eq!(report.beam_angles[1], 0.0);
        assert_eq!(report.beam_lengths[2], 0.0);
        assert_relative_eq!(report.total_length, 400.0);
    }

    #[test]
    fn test_zero_length_beam() {
        let nodes = vec![Node::new(10.0, 10.0), Node::new(10.0, 10.0)];
        let report = analyze_geometry(&nodes, &[Beam::new(0, 1)]).unwrap();
        assert_eq!(report.beam_lengths[0], 0.0);
        assert_eq!(report.beam_angles[0], 0.0);
    }

    #[test]
    fn test_non_finite_coordinate_errors() {
        let nodes = vec![Node::new(f64::NAN, 0.0)];
        let err = analyze_geometry(&nodes, &[]).unwrap_err();
        assert_eq!(err.kind(), "computation_error");
    }
}
