//! Simulation nodes.
//!
//! Nodes are the bodies moved by the force simulation. Each node has:
//! - A stable identifier, assigned sequentially from 1
//! - Position (x, y) in layout space
//! - The neighbor list it was created with (duplicates and self-ids kept)
//! - Mass, velocity, scalar acceleration and unit move direction

use std::fmt;

/// Stable node identifier.
///
/// Ids start at 1 and are never reused or mutated for the lifetime of a
/// layout. It wraps a u32 for cheap copies and WebAssembly interop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new NodeId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Zero-based slot of this id in the layout's node vector.
    #[inline]
    pub(crate) fn slot(self) -> usize {
        (self.0 as usize).saturating_sub(1)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl From<u32> for NodeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NodeId> for u32 {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// Options for creating a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeOptions {
    /// Explicit initial position. `None` places the node near the layout
    /// center with random jitter.
    pub position: Option<(f64, f64)>,
    /// Node mass (default: 1.0). Must be finite and positive.
    pub mass: f64,
}

impl Default for NodeOptions {
    fn default() -> Self {
        Self {
            position: None,
            mass: 1.0,
        }
    }
}

impl NodeOptions {
    /// Options placing the node at an explicit position.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Some((x, y)),
            ..Self::default()
        }
    }

    /// Set the node mass.
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }
}

/// Simulation state of a single node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    /// Neighbor ids in insertion order. A repeated id encodes edge weight.
    pub neighbors: Vec<NodeId>,
    /// Length of `neighbors`, fixed at creation.
    pub degree: usize,
    pub mass: f64,
    pub velocity: [f64; 2],
    /// Scalar magnitude; the vector part lives in `direction`.
    pub acceleration: f64,
    /// Unit vector of the last net force, or exactly zero.
    pub direction: [f64; 2],
}

impl Node {
    /// Create a node at rest at `(x, y)`.
    pub fn new(id: NodeId, x: f64, y: f64, neighbors: Vec<NodeId>, mass: f64) -> Self {
        let degree = neighbors.len();
        Self {
            id,
            x,
            y,
            neighbors,
            degree,
            mass,
            velocity: [0.0, 0.0],
            acceleration: 0.0,
            direction: [0.0, 0.0],
        }
    }

    /// Current position as a pair.
    #[inline]
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Kinetic energy `0.5 * m * |v|^2`.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        let [vx, vy] = self.velocity;
        0.5 * self.mass * (vx * vx + vy * vy)
    }
}
