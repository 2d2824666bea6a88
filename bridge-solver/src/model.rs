//! Input model - nodes, beams, supports and loads of a planar bridge
//!
//! Nodes are identified by their position in the input sequence. Beam
//! endpoints and support/load node references are kept as signed integers so
//! an out-of-range reference is a modeled condition: the element degrades to
//! structurally absent instead of panicking on an array bound.

use serde::{Deserialize, Serialize};

/// Input coordinates and lengths are in centimeters; stress math works in
/// meters.
pub const LENGTH_SCALE: f64 = 1.0 / 100.0;

/// A node in the bridge model
///
/// Wire format is a bare `[x, y]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Node {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Node {
    /// Create a new node at the given coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<[f64; 2]> for Node {
    fn from(coords: [f64; 2]) -> Self {
        Self::new(coords[0], coords[1])
    }
}

impl From<Node> for [f64; 2] {
    fn from(node: Node) -> Self {
        [node.x, node.y]
    }
}

/// A beam connecting two nodes by index
///
/// Wire format is a bare `[start, end]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i64; 2]", into = "[i64; 2]")]
pub struct Beam {
    /// Index of the start node
    pub start: i64,
    /// Index of the end node
    pub end: i64,
}

impl Beam {
    /// Create a new beam between two node indices
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Resolve both endpoints against the node sequence.
    ///
    /// Returns `None` when either reference is negative or out of range; the
    /// beam is then structurally absent.
    pub fn endpoints(&self, node_count: usize) -> Option<(usize, usize)> {
        let start = usize::try_from(self.start).ok()?;
        let end = usize::try_from(self.end).ok()?;
        (start < node_count && end < node_count).then_some((start, end))
    }

    /// True when the load references either endpoint of this beam
    pub fn touches(&self, node: i64) -> bool {
        self.start == node || self.end == node
    }
}

impl From<[i64; 2]> for Beam {
    fn from(indices: [i64; 2]) -> Self {
        Self::new(indices[0], indices[1])
    }
}

impl From<Beam> for [i64; 2] {
    fn from(beam: Beam) -> Self {
        [beam.start, beam.end]
    }
}

/// A kinematic constraint at a node, fully fixed in the plane
///
/// Accepts either a bare node index or a `{ "node": ... }` descriptor on
/// the wire; extra descriptor fields are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SupportInput")]
pub struct Support {
    /// Index of the supported node
    pub node: i64,
}

impl Support {
    /// Create a support at the given node index
    pub fn new(node: i64) -> Self {
        Self { node }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SupportInput {
    Index(i64),
    Descriptor { node: i64 },
}

impl From<SupportInput> for Support {
    fn from(input: SupportInput) -> Self {
        match input {
            SupportInput::Index(node) | SupportInput::Descriptor { node } => Support { node },
        }
    }
}

/// A point load applied at a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLoad {
    /// Index of the loaded node
    pub node: i64,
    /// Force component in X (N)
    #[serde(default)]
    pub fx: f64,
    /// Force component in Y (N)
    #[serde(default)]
    pub fy: f64,
}

impl PointLoad {
    /// Create a new point load at the given node index
    pub fn new(node: i64, fx: f64, fy: f64) -> Self {
        Self { node, fx, fy }
    }
}

/// The full bridge description consumed by the analysis pipeline
///
/// Missing wire fields default to empty sequences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeModel {
    /// Ordered node coordinates
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Ordered beam endpoint pairs
    #[serde(default)]
    pub beams: Vec<Beam>,
    /// Supported node indices
    #[serde(default)]
    pub supports: Vec<Support>,
    /// Applied point loads
    #[serde(default)]
    pub loads: Vec<PointLoad>,
}

impl BridgeModel {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a model from its JSON wire format
    pub fn from_json(json: &str) -> crate::error::SolverResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add a node, returning its index
    pub fn add_node(&mut self, x: f64, y: f64) -> usize {
        self.nodes.push(Node::new(x, y));
        self.nodes.len() - 1
    }

    /// Add a beam between two node indices
    pub fn add_beam(&mut self, start: usize, end: usize) {
        self.beams.push(Beam::new(start as i64, end as i64));
    }

    /// Add a support at a node index
    pub fn add_support(&mut self, node: usize) {
        self.supports.push(Support::new(node as i64));
    }

    /// Add a point load at a node index
    pub fn add_load(&mut self, node: usize, fx: f64, fy: f64) {
        self.loads.push(PointLoad::new(node as i64, fx, fy));
    }
}
