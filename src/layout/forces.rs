//! Pairwise force model.
//!
//! Computes the scalar edge force between two nodes, the centering gravity,
//! and the net force acting on a node from every other node. All functions
//! read node state only; writing the resulting direction back onto the node
//! is left to the simulation loop so that a whole tick can be evaluated
//! against one snapshot of positions.
//!
//! # Force regimes
//!
//! The edge force from B on A depends on the raw distance `d` compared to the
//! overlap radius `r`:
//!
//! - `d > r`: attraction minus repulsion
//! - `d == r`: exactly zero
//! - `d < r`: doubled repulsion only, attraction is dropped
//!
//! Positive values pull A toward B, negative values push it away.

use crate::graph::{Node, Topology};

use super::config::{AttractionMode, LayoutConfig};

/// A 2-D vector stored as `[x, y]`.
pub type Vec2 = [f64; 2];

/// Euclidean norm of a vector.
#[inline]
pub fn norm(v: Vec2) -> f64 {
    (v[0] * v[0] + v[1] * v[1]).sqrt()
}

/// Unit vector of `v`, or the zero vector when `v` has no length.
#[inline]
pub fn unit(v: Vec2) -> Vec2 {
    let length = norm(v);
    if length != 0.0 {
        [v[0] / length, v[1] / length]
    } else {
        [0.0, 0.0]
    }
}

/// Net force acting on one node for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetForce {
    /// Length of the summed force vector.
    pub magnitude: f64,
    /// Unit direction of the summed force, zero when the sum is zero.
    pub direction: Vec2,
}

/// Force computations for one layout configuration and topology.
#[derive(Debug, Clone, Copy)]
pub struct ForceModel<'a> {
    config: &'a LayoutConfig,
    topology: &'a Topology,
}

impl<'a> ForceModel<'a> {
    pub fn new(config: &'a LayoutConfig, topology: &'a Topology) -> Self {
        Self { config, topology }
    }

    /// Euclidean distance between two nodes.
    pub fn distance(&self, a: &Node, b: &Node) -> f64 {
        ((a.x - b.x) * (a.x - b.x) + (a.y - b.y) * (a.y - b.y)).sqrt()
    }

    /// Unit vector from `a` toward `b`: the axis along which an edge force
    /// from `b` acts on `a`. Zero for coincident nodes.
    pub fn direction(&self, a: &Node, b: &Node) -> Vec2 {
        let distance = self.distance(a, b);
        if distance != 0.0 {
            [(b.x - a.x) / distance, (b.y - a.y) / distance]
        } else {
            [0.0, 0.0]
        }
    }

    /// Unit vector from `a` toward the layout center. Zero when `a` sits on
    /// the center.
    pub fn dir_to_center(&self, a: &Node) -> Vec2 {
        let (cx, cy) = self.config.center();
        unit([cx - a.x, cy - a.y])
    }

    /// Weight of the edge from `a` to `b`, as seen from `a`'s neighbor list.
    pub fn edge_weight(&self, a: &Node, b: &Node) -> u32 {
        self.topology.edge_weight(a.id, b.id)
    }

    /// Attraction that `b` exerts on `a` through an edge of weight `w`.
    pub fn attraction(&self, a: &Node, b: &Node, w: u32) -> f64 {
        let stretch = self.distance(a, b) - self.config.olradius;
        let weight = f64::from(w).powf(self.config.ips_w);
        match self.config.attraction_mode() {
            AttractionMode::LinLog => weight * (1.0 + stretch).ln(),
            // only a's own degree damps the pull
            AttractionMode::DissuadeHubs => stretch / (a.degree as f64 + 1.0),
            AttractionMode::Linear => weight * stretch,
        }
    }

    /// Degree-weighted repulsion between `a` and `b`, doubled when the pair
    /// overlaps. Infinite for coincident nodes; see [`ForceModel::net_force`].
    pub fn repulsion(&self, a: &Node, b: &Node, overlapping: bool) -> f64 {
        let k_r = if overlapping {
            self.config.k_r * 2.0
        } else {
            self.config.k_r
        };
        k_r * (a.degree as f64 + 1.0) * (b.degree as f64 + 1.0) / self.distance(a, b)
    }

    /// Scalar edge force of `b` on `a`.
    pub fn edge_force(&self, a: &Node, b: &Node) -> f64 {
        let w = self.edge_weight(a, b);
        let distance = self.distance(a, b);
        let olradius = self.config.olradius;

        if distance > olradius {
            self.attraction(a, b, w) - self.repulsion(a, b, false)
        } else if distance == olradius {
            0.0
        } else {
            -self.repulsion(a, b, true)
        }
    }

    /// Magnitude of the centering gravity on `a`.
    pub fn gravity(&self, a: &Node) -> f64 {
        self.config.k_g * (a.degree as f64 + 1.0)
    }

    /// Net force on `a` from every other node in `nodes` plus gravity.
    ///
    /// Pairs are skipped only by id equality, so a self-loop in the
    /// neighbor list never pairs a node with itself. A coincident pair has
    /// no direction and contributes nothing.
    pub fn net_force(&self, a: &Node, nodes: &[Node]) -> NetForce {
        let mut force: Vec2 = [0.0, 0.0];

        for b in nodes {
            if b.id == a.id {
                continue;
            }
            if self.distance(a, b) == 0.0 {
                continue;
            }
            let direction = self.direction(a, b);
            let magnitude = self.edge_force(a, b);
            force[0] += magnitude * direction[0];
            force[1] += magnitude * direction[1];
        }

        let gravity = self.gravity(a);
        let to_center = self.dir_to_center(a);
        force[0] += gravity * to_center[0];
        force[1] += gravity * to_center[1];

        NetForce {
            magnitude: norm(force),
            direction: unit(force),
        }
    }
}
