//! ForceLayout - the simulation loop.
//!
//! Owns the nodes, the configuration and the jitter RNG. One tick evaluates
//! the net force on every node against the positions left by the previous
//! tick (a Jacobi update: no node sees a position moved in the same tick),
//! then integrates every node and recomputes the total kinetic energy. The
//! layout is converged while that energy stays below
//! [`CONVERGENCE_THRESHOLD`]. The state follows the energy of the last tick,
//! and adding a node puts the layout back into `Running`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::error::{LayoutError, Result};
use crate::graph::{Node, NodeId, NodeOptions, Topology};

use super::config::LayoutConfig;
use super::forces::{ForceModel, NetForce};
use super::integrator::integrate;

/// Total kinetic energy below which the layout counts as converged.
pub const CONVERGENCE_THRESHOLD: f64 = 0.001;

/// Side of the square around the center in which new nodes are scattered.
pub const INIT_SIZE: f64 = 30.0;

/// Simulation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    Running,
    Converged,
}

/// Position of one node in a layout snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodePosition {
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

/// Force-directed layout simulation.
pub struct ForceLayout {
    config: LayoutConfig,
    nodes: Vec<Node>,
    /// Rebuilt lazily after nodes are added.
    topology: Option<Topology>,
    rng: StdRng,
    energy: f64,
    ticks: u32,
    state: SimulationState,
}

impl ForceLayout {
    /// Create an empty layout.
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            config,
            nodes: Vec::new(),
            topology: None,
            rng,
            energy: 0.0,
            ticks: 0,
            state: SimulationState::Running,
        })
    }

    /// The configuration this layout runs with.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    // =========================================================================
    // Node Operations
    // =========================================================================

    /// Add a node near the layout center with the given neighbor ids.
    ///
    /// Neighbor ids may refer to nodes that are added later; they are
    /// checked before the next tick.
    pub fn add_node(&mut self, neighbors: &[u32]) -> Result<NodeId> {
        self.add_node_with(neighbors, NodeOptions::default())
    }

    /// Add a node with explicit creation options.
    pub fn add_node_with(&mut self, neighbors: &[u32], options: NodeOptions) -> Result<NodeId> {
        if !(options.mass.is_finite() && options.mass > 0.0) {
            return Err(LayoutError::InvalidNodeConfiguration {
                reason: format!("mass must be finite and positive, got {}", options.mass),
            });
        }

        let id = next_id(self.nodes.len())?;

        if let Some(&zero) = neighbors.iter().find(|&&n| n == 0) {
            return Err(LayoutError::UnknownNeighborReference {
                node: id,
                neighbor: zero,
            });
        }

        let (x, y) = match options.position {
            Some((x, y)) if x.is_finite() && y.is_finite() => (x, y),
            Some((x, y)) => {
                return Err(LayoutError::InvalidNodeConfiguration {
                    reason: format!("position must be finite, got ({x}, {y})"),
                });
            }
            None => self.jittered_center(),
        };

        let neighbors = neighbors.iter().copied().map(NodeId).collect();
        self.nodes.push(Node::new(id, x, y, neighbors, options.mass));
        self.topology = None;
        self.state = SimulationState::Running;

        debug!(%id, x, y, "added node");
        Ok(id)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        if id.raw() == 0 {
            return None;
        }
        self.nodes.get(id.slot())
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    fn jittered_center(&mut self) -> (f64, f64) {
        let (cx, cy) = self.config.center();
        let x = cx + INIT_SIZE * (self.rng.r#gen::<f64>() - 0.5);
        let y = cy + INIT_SIZE * (self.rng.r#gen::<f64>() - 0.5);
        (x, y)
    }

    // =========================================================================
    // Simulation
    // =========================================================================

    /// Check every neighbor reference, building the topology if needed.
    pub fn validate(&mut self) -> Result<()> {
        let topology = self.take_topology()?;
        self.topology = Some(topology);
        Ok(())
    }

    fn take_topology(&mut self) -> Result<Topology> {
        if let Some(topology) = self.topology.take() {
            return Ok(topology);
        }
        let topology = Topology::build(&self.nodes)?;
        debug!(
            nodes = topology.node_count(),
            edges = topology.edge_count(),
            "built topology"
        );
        Ok(topology)
    }

    /// Advance exactly one tick and return the total kinetic energy after it.
    pub fn step(&mut self) -> Result<f64> {
        let forces = self.compute_forces()?;

        for (node, force) in self.nodes.iter_mut().zip(forces) {
            node.direction = force.direction;
            integrate(node, force.magnitude, &self.config);
            trace!(id = %node.id, x = node.x, y = node.y, "moved node");
        }

        self.energy = self.total_energy();
        self.ticks += 1;
        self.state = if self.energy < CONVERGENCE_THRESHOLD {
            SimulationState::Converged
        } else {
            SimulationState::Running
        };

        debug!(tick = self.ticks, energy = self.energy, "tick");
        Ok(self.energy)
    }

    /// Net force on every node from the current snapshot. Nothing is
    /// written until all forces are known.
    fn compute_forces(&mut self) -> Result<Vec<NetForce>> {
        let topology = self.take_topology()?;
        let forces: Vec<NetForce> = {
            let model = ForceModel::new(&self.config, &topology);
            self.nodes
                .iter()
                .map(|node| model.net_force(node, &self.nodes))
                .collect()
        };
        self.topology = Some(topology);
        Ok(forces)
    }

    /// Tick until the energy drops below [`CONVERGENCE_THRESHOLD`].
    ///
    /// Returns the final energy. With `max_ticks` set, running out of ticks
    /// fails with [`LayoutError::NonConvergence`]; with `None` the loop has
    /// no bound. A layout whose last tick converged returns immediately.
    pub fn run_until_converged(&mut self, max_ticks: Option<u32>) -> Result<f64> {
        let mut ticks = 0u32;
        while self.state == SimulationState::Running {
            if max_ticks.is_some_and(|max| ticks >= max) {
                warn!(ticks, energy = self.energy, "layout did not converge");
                return Err(LayoutError::NonConvergence {
                    ticks,
                    energy: self.energy,
                });
            }
            self.step()?;
            ticks += 1;
        }

        info!(ticks = self.ticks, energy = self.energy, "layout converged");
        Ok(self.energy)
    }

    /// Total kinetic energy `sum(0.5 * m * |v|^2)` of the current velocities.
    pub fn total_energy(&self) -> f64 {
        self.nodes.iter().map(Node::kinetic_energy).sum()
    }

    /// Energy computed at the end of the last tick (0 before the first).
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Number of ticks run so far.
    pub fn tick_count(&self) -> u32 {
        self.ticks
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn is_converged(&self) -> bool {
        self.state == SimulationState::Converged
    }

    // =========================================================================
    // Layout Snapshot
    // =========================================================================

    /// Current layout as `(id, x, y)` in id order.
    pub fn positions(&self) -> Vec<NodePosition> {
        self.nodes
            .iter()
            .map(|node| {
                let (x, y) = node.position();
                NodePosition {
                    id: node.id.raw(),
                    x,
                    y,
                }
            })
            .collect()
    }

    /// Bounding box of the layout as (min_x, min_y, max_x, max_y).
    /// Returns None if there are no nodes.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        if self.nodes.is_empty() {
            return None;
        }

        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for (x, y) in self.nodes.iter().map(Node::position) {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        Some((min_x, min_y, max_x, max_y))
    }
}

/// Id of the node created after `count` existing nodes.
fn next_id(count: usize) -> Result<NodeId> {
    count
        .checked_add(1)
        .and_then(|next| u32::try_from(next).ok())
        .map(NodeId)
        .ok_or_else(|| LayoutError::InvalidNodeConfiguration {
            reason: format!("node id space exhausted after {count} nodes"),
        })
}
