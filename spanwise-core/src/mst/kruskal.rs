//! Sort-then-union Kruskal.

use tracing::{debug, instrument};

use crate::graph::Graph;
use crate::union_find::UnionFind;

use super::{Algorithm, ForestBuilder, MstResult};

/// Computes a minimum spanning forest with Kruskal's algorithm.
///
/// Edges are stable-sorted by weight and then by their lexicographically
/// ordered endpoints, so equal keys keep insertion order. The sort is charged
/// a flat `floor(E ln E)` units. The scan stops as soon as `V - 1` edges are
/// accepted; on a disconnected graph that never happens and the whole list
/// is consumed.
///
/// # Examples
/// ```
/// use spanwise_core::{Graph, kruskal};
///
/// let graph = Graph::from_parts(1, ["A", "B", "C", "D"], [("A", "B", 1), ("C", "D", 2)])?;
/// let result = kruskal(&graph);
/// assert_eq!(result.total_cost(), 3);
/// assert_eq!(result.edge_count(), 2);
/// # Ok::<(), spanwise_core::GraphError>(())
/// ```
#[must_use]
#[instrument(
    name = "mst.kruskal",
    skip(graph),
    fields(
        graph_id = graph.id(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count()
    ),
)]
pub fn kruskal(graph: &Graph) -> MstResult {
    let vertex_count = graph.vertex_count();
    let target = vertex_count.saturating_sub(1);
    let mut forest = ForestBuilder::start(Algorithm::Kruskal, target);

    let edges = graph.edges();
    let mut order: Vec<usize> = (0..edges.len()).collect();
    order.sort_by(|&left, &right| edges[left].cmp_priority(&edges[right]));
    let sort_units = sort_charge(edges.len());
    forest.counter.add(sort_units);

    let mut sets = UnionFind::new(vertex_count);
    for edge in order {
        // The edge that ends the scan still counts as visited.
        forest.counter.tick();
        if forest.len() == target {
            break;
        }
        let Some((from, to)) = graph.endpoints(edge) else {
            continue;
        };
        let from_root = sets.find(from);
        let to_root = sets.find(to);
        forest.counter.add(2);
        if sets.union_roots(from_root, to_root) {
            forest.accept(&edges[edge]);
        }
    }

    let result = forest.finish();
    debug!(
        total_cost = result.total_cost(),
        operations = result.operations(),
        accepted = result.edge_count(),
        sort_units,
        "kruskal finished"
    );
    result
}

/// Operation units charged for sorting `len` edges: `floor(len * ln len)`,
/// or zero for fewer than two edges.
pub(super) fn sort_charge(len: usize) -> u64 {
    if len < 2 {
        return 0;
    }
    let len = len as f64;
    (len * len.ln()).floor() as u64
}
