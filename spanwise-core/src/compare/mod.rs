//! Side-by-side runs of both engines with consistency checks.
//!
//! A [`Comparator`] runs Prim and then Kruskal on each graph, insists that
//! they agree on cost and forest size, and optionally re-validates both
//! forests. Any disagreement is logged at `error` level and returned; it is
//! never swallowed.

mod builder;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, error, instrument};

use crate::error::ComparisonError;
use crate::graph::Graph;
use crate::mst::{Algorithm, MstResult};
use crate::validate::{check_forest, count_connected_components};

pub use self::builder::{BatchStrategy, ComparisonBuilder};

/// Both engines' results for one graph plus the graph statistics a report
/// needs.
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    graph_id: u64,
    vertex_count: usize,
    edge_count: usize,
    density: f64,
    components: usize,
    prim: MstResult,
    kruskal: MstResult,
}

impl Comparison {
    /// Returns the identifier of the compared graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn graph_id(&self) -> u64 { self.graph_id }

    /// Returns the number of vertices in the compared graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.vertex_count }

    /// Returns the number of edges in the compared graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edge_count }

    /// Returns the graph density as a fraction.
    #[must_use]
    #[rustfmt::skip]
    pub fn density(&self) -> f64 { self.density }

    /// Returns the graph density as a percentage.
    #[must_use]
    pub fn density_percent(&self) -> f64 {
        self.density * 100.0
    }

    /// Returns the number of connected components of the compared graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn components(&self) -> usize { self.components }

    /// Returns Prim's result.
    #[must_use]
    #[rustfmt::skip]
    pub fn prim(&self) -> &MstResult { &self.prim }

    /// Returns Kruskal's result.
    #[must_use]
    #[rustfmt::skip]
    pub fn kruskal(&self) -> &MstResult { &self.kruskal }

    /// Returns the result of `algorithm`.
    #[must_use]
    pub fn result(&self, algorithm: Algorithm) -> &MstResult {
        match algorithm {
            Algorithm::Prim => &self.prim,
            Algorithm::Kruskal => &self.kruskal,
        }
    }

    /// Returns Prim's elapsed time divided by Kruskal's, or `0.0` when
    /// Kruskal took no measurable time.
    #[must_use]
    pub fn time_ratio(&self) -> f64 {
        ratio(
            self.prim.elapsed().as_secs_f64(),
            self.kruskal.elapsed().as_secs_f64(),
        )
    }

    /// Returns Prim's operation count divided by Kruskal's, or `0.0` when
    /// Kruskal counted nothing.
    #[must_use]
    pub fn operations_ratio(&self) -> f64 {
        ratio(
            self.prim.operations() as f64,
            self.kruskal.operations() as f64,
        )
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Runs and cross-checks both engines. Construct with [`ComparisonBuilder`].
///
/// # Examples
/// ```
/// use spanwise_core::{ComparisonBuilder, Graph};
///
/// let graph = Graph::from_parts(1, ["A", "B", "C"], [("A", "B", 1), ("B", "C", 2), ("A", "C", 3)])?;
/// let comparator = ComparisonBuilder::new().build().expect("default configuration is valid");
/// let comparison = comparator.compare(&graph).expect("engines agree");
/// assert_eq!(comparison.prim().total_cost(), 3);
/// assert_eq!(comparison.kruskal().total_cost(), 3);
/// assert_eq!(comparison.components(), 1);
/// # Ok::<(), spanwise_core::GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Comparator {
    strategy: BatchStrategy,
    verify_forests: bool,
}

impl Comparator {
    /// Returns the batch strategy used by [`Self::compare_all`].
    #[must_use]
    #[rustfmt::skip]
    pub fn strategy(&self) -> BatchStrategy { self.strategy }

    /// Returns whether each result is structurally validated.
    #[must_use]
    #[rustfmt::skip]
    pub fn verifies_forests(&self) -> bool { self.verify_forests }

    /// Runs Prim then Kruskal on `graph` and checks that they agree.
    ///
    /// # Errors
    /// Returns [`ComparisonError::CostMismatch`],
    /// [`ComparisonError::EdgeCountMismatch`] or, when forest verification is
    /// enabled, [`ComparisonError::InvalidForest`].
    #[instrument(
        name = "compare.graph",
        err,
        skip(self, graph),
        fields(
            graph_id = graph.id(),
            vertices = graph.vertex_count(),
            edges = graph.edge_count()
        ),
    )]
    pub fn compare(&self, graph: &Graph) -> Result<Comparison, ComparisonError> {
        let prim = Algorithm::Prim.run(graph);
        let kruskal = Algorithm::Kruskal.run(graph);
        record_comparison(&prim, &kruskal);

        self.check(graph, &prim, &kruskal).inspect_err(|err| {
            record_violation();
            error!(code = %err.code(), error = %err, "engines disagree");
        })?;

        let comparison = Comparison {
            graph_id: graph.id(),
            vertex_count: graph.vertex_count(),
            edge_count: graph.edge_count(),
            density: graph.density(),
            components: count_connected_components(graph),
            prim,
            kruskal,
        };
        debug!(
            total_cost = comparison.prim.total_cost(),
            prim_operations = comparison.prim.operations(),
            kruskal_operations = comparison.kruskal.operations(),
            accepted = comparison.prim.edge_count(),
            "engines agree"
        );
        Ok(comparison)
    }

    fn check(
        &self,
        graph: &Graph,
        prim: &MstResult,
        kruskal: &MstResult,
    ) -> Result<(), ComparisonError> {
        let graph_id = graph.id();
        if prim.total_cost() != kruskal.total_cost() {
            return Err(ComparisonError::CostMismatch {
                graph_id,
                prim_cost: prim.total_cost(),
                kruskal_cost: kruskal.total_cost(),
            });
        }
        if prim.edge_count() != kruskal.edge_count() {
            return Err(ComparisonError::EdgeCountMismatch {
                graph_id,
                prim_edges: prim.edge_count(),
                kruskal_edges: kruskal.edge_count(),
            });
        }
        if self.verify_forests {
            for result in [prim, kruskal] {
                check_forest(graph, result).map_err(|violation| {
                    ComparisonError::InvalidForest {
                        graph_id,
                        algorithm: result.algorithm(),
                        violation,
                    }
                })?;
            }
        }
        Ok(())
    }

    /// Compares every graph in `graphs`, returning results in input order.
    ///
    /// # Errors
    /// Returns a [`ComparisonError`] when any graph fails its checks. The
    /// sequential strategy reports the first failure in input order; the
    /// parallel strategy reports whichever failure it observes first.
    #[instrument(
        name = "compare.batch",
        err,
        skip(self, graphs),
        fields(graphs = graphs.len(), strategy = ?self.strategy),
    )]
    pub fn compare_all(&self, graphs: &[Graph]) -> Result<Vec<Comparison>, ComparisonError> {
        match self.strategy {
            BatchStrategy::Sequential => graphs.iter().map(|graph| self.compare(graph)).collect(),
            #[cfg(feature = "parallel")]
            BatchStrategy::Parallel => graphs
                .par_iter()
                .map(|graph| self.compare(graph))
                .collect(),
            #[cfg(not(feature = "parallel"))]
            BatchStrategy::Parallel => Err(ComparisonError::BackendUnavailable {
                requested: BatchStrategy::Parallel,
            }),
        }
    }
}

#[cfg(feature = "metrics")]
fn record_comparison(prim: &MstResult, kruskal: &MstResult) {
    metrics::counter!("mst_comparisons_total").increment(1);
    for result in [prim, kruskal] {
        metrics::histogram!("mst_operations", "algorithm" => result.algorithm().as_str())
            .record(result.operations() as f64);
    }
}

#[cfg(not(feature = "metrics"))]
fn record_comparison(_prim: &MstResult, _kruskal: &MstResult) {}

#[cfg(feature = "metrics")]
fn record_violation() {
    metrics::counter!("mst_consistency_violations_total").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_violation() {}

#[cfg(test)]
mod tests;
