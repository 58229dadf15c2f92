//! Lazy priority-queue Prim.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::{debug, instrument, trace};

use crate::error::MstError;
use crate::graph::Graph;

use super::{Algorithm, ForestBuilder, MstResult};

/// Heap key: `(weight, min id, max id, insertion index)`.
type FrontierKey<'g> = Reverse<(u64, &'g str, &'g str, usize)>;

/// Computes a minimum spanning forest with Prim's algorithm, seeding from the
/// first vertex in insertion order.
///
/// When the frontier empties while vertices remain unvisited, the search is
/// re-seeded from the first unvisited vertex, so disconnected graphs yield
/// one tree per component.
///
/// # Examples
/// ```
/// use spanwise_core::{Graph, prim};
///
/// let graph = Graph::from_parts(1, ["A", "B", "C"], [("A", "B", 2), ("B", "C", 1), ("A", "C", 5)])?;
/// let result = prim(&graph);
/// assert_eq!(result.total_cost(), 3);
/// assert_eq!(result.edge_count(), 2);
/// # Ok::<(), spanwise_core::GraphError>(())
/// ```
#[must_use]
#[instrument(
    name = "mst.prim",
    skip(graph),
    fields(
        graph_id = graph.id(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count()
    ),
)]
pub fn prim(graph: &Graph) -> MstResult {
    run(graph, None)
}

/// Computes a minimum spanning forest with Prim's algorithm, seeding from
/// `start`.
///
/// Remaining components, if any, are then seeded in insertion order.
///
/// # Errors
/// Returns [`MstError::UnknownStartVertex`] when `start` is not a vertex of
/// `graph`.
#[instrument(
    name = "mst.prim",
    err,
    skip(graph),
    fields(
        graph_id = graph.id(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count()
    ),
)]
pub fn prim_from(graph: &Graph, start: &str) -> Result<MstResult, MstError> {
    let Some(index) = graph.index_of(start) else {
        return Err(MstError::UnknownStartVertex {
            id: start.to_owned(),
        });
    };
    Ok(run(graph, Some(index)))
}

fn run(graph: &Graph, start: Option<usize>) -> MstResult {
    let vertex_count = graph.vertex_count();
    let mut forest = ForestBuilder::start(Algorithm::Prim, vertex_count.saturating_sub(1));
    let mut visited = vec![false; vertex_count];
    let mut visited_count = 0_usize;
    let mut frontier: BinaryHeap<FrontierKey<'_>> = BinaryHeap::new();

    let seeds = start.into_iter().chain(0..vertex_count);
    for seed in seeds {
        if visited_count == vertex_count {
            break;
        }
        if visited[seed] {
            continue;
        }
        visited[seed] = true;
        visited_count += 1;
        forest.counter.tick();
        for &edge in graph.incident(seed) {
            frontier.push(key(graph, edge));
            forest.counter.tick();
        }
        trace!(seed = graph.vertices()[seed].id(), "seeded frontier");

        while visited_count < vertex_count {
            let Some(Reverse((_, _, _, edge))) = frontier.pop() else {
                break;
            };
            forest.counter.tick();
            let Some((from, to)) = graph.endpoints(edge) else {
                continue;
            };
            let reached = match (visited[from], visited[to]) {
                (true, false) => to,
                (false, true) => from,
                _ => continue,
            };

            visited[reached] = true;
            visited_count += 1;
            forest.accept(&graph.edges()[edge]);

            for &next in graph.incident(reached) {
                forest.counter.tick();
                let Some((left, right)) = graph.endpoints(next) else {
                    continue;
                };
                let far = if left == reached { right } else { left };
                if !visited[far] {
                    frontier.push(key(graph, next));
                    forest.counter.tick();
                }
            }
        }
        frontier.clear();
    }

    let result = forest.finish();
    debug!(
        total_cost = result.total_cost(),
        operations = result.operations(),
        accepted = result.edge_count(),
        "prim finished"
    );
    result
}

fn key(graph: &Graph, edge: usize) -> FrontierKey<'_> {
    let candidate = &graph.edges()[edge];
    let (low, high) = candidate.endpoints_sorted();
    Reverse((candidate.weight(), low, high, edge))
}
