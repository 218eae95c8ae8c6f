//! Graph data structures.
//!
//! Nodes own their neighbor lists; the topology is derived from those lists
//! using petgraph's StableGraph so that multi-edges and self-loops keep their
//! literal counts.

mod node;
mod topology;

pub use node::{Node, NodeId, NodeOptions};
pub use topology::Topology;
