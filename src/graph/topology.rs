//! Topology - edge bookkeeping derived from node neighbor lists.
//!
//! Edges are not first-class in the layout: each entry `B` in node `A`'s
//! neighbor list becomes one directed edge A→B in a petgraph StableGraph.
//! Repeated entries become parallel edges and a node's own id becomes a
//! self-loop, so the weight of A→B is simply the number of A→B edges.
//! A's view of the pair is independent of B's.

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::Directed;

use super::node::{Node, NodeId};
use crate::error::{LayoutError, Result};

/// Directed multigraph over the layout's nodes.
///
/// Node indices coincide with node slots because nodes are only ever
/// appended and never removed.
#[derive(Debug, Clone)]
pub struct Topology {
    graph: StableGraph<NodeId, (), Directed>,
}

impl Topology {
    /// Build the topology from the full node list.
    ///
    /// Fails with [`LayoutError::UnknownNeighborReference`] when a neighbor
    /// list names an id that does not belong to any node.
    pub fn build(nodes: &[Node]) -> Result<Self> {
        let edge_capacity = nodes.iter().map(|n| n.degree).sum();
        let mut graph = StableGraph::with_capacity(nodes.len(), edge_capacity);

        let indices: Vec<NodeIndex> = nodes.iter().map(|n| graph.add_node(n.id)).collect();

        for (node, &source) in nodes.iter().zip(&indices) {
            for &neighbor in &node.neighbors {
                let target = resolve(&indices, neighbor).ok_or(
                    LayoutError::UnknownNeighborReference {
                        node: node.id,
                        neighbor: neighbor.raw(),
                    },
                )?;
                graph.add_edge(source, target, ());
            }
        }

        Ok(Self { graph })
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges, counting every neighbor-list entry once.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Weight of the edge from `a` to `b`: how many times `b` appears in
    /// `a`'s neighbor list, 0 if it never does.
    pub fn edge_weight(&self, a: NodeId, b: NodeId) -> u32 {
        let (Some(source), Some(target)) = (self.index_of(a), self.index_of(b)) else {
            return 0;
        };
        self.graph
            .edges(source)
            .filter(|edge| edge.target() == target)
            .count() as u32
    }

    fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        if id.raw() == 0 {
            return None;
        }
        let index = NodeIndex::new(id.slot());
        self.graph.contains_node(index).then_some(index)
    }
}

fn resolve(indices: &[NodeIndex], id: NodeId) -> Option<NodeIndex> {
    if id.raw() == 0 {
        return None;
    }
    indices.get(id.slot()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u32, neighbors: &[u32]) -> Node {
        Node::new(
            NodeId(id),
            0.0,
            0.0,
            neighbors.iter().copied().map(NodeId).collect(),
            1.0,
        )
    }

    #[test]
    fn test_build_counts_every_entry() {
        let nodes = vec![node(1, &[2, 3, 2]), node(2, &[1]), node(3, &[])];
        let topology = Topology::build(&nodes).unwrap();

        assert_eq!(topology.node_count(), 3);
        assert_eq!(topology.edge_count(), 4);
    }

    #[test]
    fn test_edge_weight_counts_duplicates() {
        let nodes = vec![node(1, &[2, 3, 2]), node(2, &[1]), node(3, &[])];
        let topology = Topology::build(&nodes).unwrap();

        assert_eq!(topology.edge_weight(NodeId(1), NodeId(2)), 2);
        assert_eq!(topology.edge_weight(NodeId(1), NodeId(3)), 1);
        assert_eq!(topology.edge_weight(NodeId(2), NodeId(1)), 1);
        // directional: 3 does not list 1
        assert_eq!(topology.edge_weight(NodeId(3), NodeId(1)), 0);
    }

    #[test]
    fn test_self_loop_weight() {
        let nodes = vec![node(1, &[1, 1, 2]), node(2, &[])];
        let topology = Topology::build(&nodes).unwrap();

        assert_eq!(topology.edge_weight(NodeId(1), NodeId(1)), 2);
        assert_eq!(topology.edge_count(), 3);
    }

    #[test]
    fn test_forward_references_resolve() {
        // node 1 names node 3 before it exists in insertion order
        let nodes = vec![node(1, &[3]), node(2, &[]), node(3, &[1])];
        let topology = Topology::build(&nodes).unwrap();
        assert_eq!(topology.edge_weight(NodeId(1), NodeId(3)), 1);
    }

    #[test]
    fn test_unknown_neighbor_is_rejected() {
        let nodes = vec![node(1, &[2]), node(2, &[7])];
        let err = Topology::build(&nodes).unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnknownNeighborReference {
                node: NodeId(2),
                neighbor: 7
            }
        );
    }

    #[test]
    fn test_zero_id_is_rejected() {
        let nodes = vec![node(1, &[0])];
        assert!(matches!(
            Topology::build(&nodes),
            Err(LayoutError::UnknownNeighborReference { neighbor: 0, .. })
        ));
    }

    #[test]
    fn test_unknown_ids_have_no_weight() {
        let nodes = vec![node(1, &[])];
        let topology = Topology::build(&nodes).unwrap();
        assert_eq!(topology.edge_weight(NodeId(1), NodeId(9)), 0);
        assert_eq!(topology.edge_weight(NodeId(0), NodeId(1)), 0);
    }
}
