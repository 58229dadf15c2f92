//! Fixture types for spanning-forest property tests.

use test_strategy::Arbitrary;

use crate::graph::Graph;

/// Topology family a fixture was drawn from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum GraphShape {
    /// A bare random spanning tree.
    #[weight(1)]
    Tree,
    /// A spanning tree plus roughly `n/2..n` extra edges, parallels allowed.
    #[weight(2)]
    Sparse,
    /// Most vertex pairs joined.
    #[weight(2)]
    Dense,
    /// Weights drawn from a pool of at most three values.
    #[weight(3)]
    Ties,
    /// Two to four components with no edges between them.
    #[weight(2)]
    Disconnected,
}

/// A generated graph and what the generator knows about it.
#[derive(Clone, Debug)]
pub(super) struct GraphFixture {
    pub graph: Graph,
    pub shape: GraphShape,
    /// Number of connected components by construction.
    pub components: usize,
}

impl GraphFixture {
    /// Short description for failure messages.
    pub(super) fn describe(&self) -> String {
        format!(
            "shape={:?}, vertices={}, edges={}, components={}",
            self.shape,
            self.graph.vertex_count(),
            self.graph.edge_count(),
            self.components,
        )
    }
}
