//! Independent structural checks for spanning-forest outputs.
//!
//! Nothing here trusts the engine that produced a result: acyclicity is
//! re-derived with a fresh union-find and component counts with a traversal
//! over the full input graph.

use std::collections::HashSet;

use thiserror::Error;

use crate::graph::{Edge, Graph};
use crate::mst::MstResult;
use crate::union_find::{KeyedUnionFind, UnionFind};

/// Returns `true` when no edge in `edges` closes a cycle.
///
/// # Examples
/// ```
/// use spanwise_core::{Edge, validate::is_acyclic};
///
/// let path = [Edge::new("A", "B", 1)?, Edge::new("B", "C", 1)?];
/// assert!(is_acyclic(&path));
/// let triangle = [Edge::new("A", "B", 1)?, Edge::new("B", "C", 1)?, Edge::new("C", "A", 1)?];
/// assert!(!is_acyclic(&triangle));
/// # Ok::<(), spanwise_core::GraphError>(())
/// ```
#[must_use]
pub fn is_acyclic(edges: &[Edge]) -> bool {
    let mut sets = KeyedUnionFind::new(edges.iter().flat_map(|edge| [edge.from(), edge.to()]));
    edges
        .iter()
        .all(|edge| sets.union(edge.from(), edge.to()).unwrap_or(false))
}

/// Returns `true` when every identifier in `vertices` is touched by at least
/// one edge.
///
/// A single vertex with no edges counts as covered, as does an empty vertex
/// list.
#[must_use]
pub fn connects_all_vertices<'a>(
    edges: &[Edge],
    vertices: impl IntoIterator<Item = &'a str>,
) -> bool {
    let vertices: Vec<&str> = vertices.into_iter().collect();
    if vertices.len() == 1 && edges.is_empty() {
        return true;
    }
    let touched: HashSet<&str> = edges
        .iter()
        .flat_map(|edge| [edge.from(), edge.to()])
        .collect();
    vertices.iter().all(|id| touched.contains(id))
}

/// Counts the connected components of the full graph by breadth-first
/// traversal. The empty graph has none.
#[must_use]
pub fn count_connected_components(graph: &Graph) -> usize {
    let mut visited = vec![false; graph.vertex_count()];
    (0..graph.vertex_count())
        .filter(|&start| graph.flood(start, &mut visited) > 0)
        .count()
}

/// Structural defect found in a spanning-forest result.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ForestViolation {
    /// The edge closes a cycle with previously accepted edges.
    #[error("edge ({from}, {to}) closes a cycle")]
    Cycle {
        /// First endpoint of the offending edge.
        from: String,
        /// Second endpoint of the offending edge.
        to: String,
    },
    /// The forest does not have `V - components` edges.
    #[error("forest has {actual} edges, expected {expected}")]
    EdgeCount {
        /// `V - components` for the input graph.
        expected: usize,
        /// Number of edges in the result.
        actual: usize,
    },
    /// The reported cost differs from the sum of the edge weights.
    #[error("reported cost {reported} differs from recomputed cost {recomputed}")]
    CostMismatch {
        /// Cost stored on the result.
        reported: u64,
        /// Sum of the result's edge weights.
        recomputed: u64,
    },
    /// An edge references a vertex absent from the input graph.
    #[error("edge endpoint `{id}` is not part of the graph")]
    UnknownEndpoint {
        /// The unknown identifier.
        id: String,
    },
}

/// Checks that `result` is a spanning forest of `graph`.
///
/// # Errors
/// Returns the first [`ForestViolation`] found, checking endpoints and
/// cycles edge by edge before the edge count and the cost.
pub fn check_forest(graph: &Graph, result: &MstResult) -> Result<(), ForestViolation> {
    let mut sets = UnionFind::new(graph.vertex_count());
    let mut recomputed = 0_u64;
    for edge in result.edges() {
        let from = endpoint(graph, edge.from())?;
        let to = endpoint(graph, edge.to())?;
        if !sets.union(from, to) {
            return Err(ForestViolation::Cycle {
                from: edge.from().to_owned(),
                to: edge.to().to_owned(),
            });
        }
        recomputed = recomputed.saturating_add(edge.weight());
    }

    let expected = graph.vertex_count() - count_connected_components(graph);
    if result.edge_count() != expected {
        return Err(ForestViolation::EdgeCount {
            expected,
            actual: result.edge_count(),
        });
    }
    if result.total_cost() != recomputed {
        return Err(ForestViolation::CostMismatch {
            reported: result.total_cost(),
            recomputed,
        });
    }
    Ok(())
}

fn endpoint(graph: &Graph, id: &str) -> Result<usize, ForestViolation> {
    graph
        .index_of(id)
        .ok_or_else(|| ForestViolation::UnknownEndpoint { id: id.to_owned() })
}
