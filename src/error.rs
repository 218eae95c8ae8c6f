//! Error type shared by the layout engine and its bindings.

use crate::graph::NodeId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("invalid node configuration: {reason}")]
    InvalidNodeConfiguration { reason: String },

    #[error("{node} references unknown neighbor id {neighbor}")]
    UnknownNeighborReference { node: NodeId, neighbor: u32 },

    #[error("layout did not converge after {ticks} ticks (energy {energy})")]
    NonConvergence { ticks: u32, energy: f64 },

    #[error("invalid configuration field `{field}`: {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
