//! Force-directed layout.
//!
//! Each tick computes pairwise edge forces (attraction minus degree-weighted
//! repulsion, or pure repulsion inside the overlap radius) plus a centering
//! gravity, then moves every node with a damped integrator. Ticks repeat
//! until the total kinetic energy falls below a threshold.

pub mod config;
pub mod forces;
pub mod integrator;
pub mod simulation;

pub use config::{AttractionMode, LayoutConfig};
pub use forces::{ForceModel, NetForce};
pub use simulation::{CONVERGENCE_THRESHOLD, ForceLayout, NodePosition, SimulationState};
