//! Minimum spanning forest construction.
//!
//! Two independent engines share one result type: a lazy binary-heap Prim
//! ([`prim`], [`prim_from`]) and a sort-then-union Kruskal ([`kruskal`]).
//! Both treat every edge as undirected, produce one tree per connected
//! component and break weight ties by `(weight, min id, max id, insertion
//! index)`, so they select identical edge sets on any input.
//!
//! Each engine threads an [`OperationCounter`] through its run. The counter
//! is instrumentation only and never steers control flow.

mod kruskal;
mod prim;

use std::fmt;
use std::time::{Duration, Instant};

use crate::graph::{Edge, Graph};

pub use self::{
    kruskal::kruskal,
    prim::{prim, prim_from},
};

/// The two spanning-forest engines.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Algorithm {
    /// Lazy priority-queue Prim.
    Prim,
    /// Global edge sort with union-find.
    Kruskal,
}

impl Algorithm {
    /// Both engines, in report order.
    pub const ALL: [Self; 2] = [Self::Prim, Self::Kruskal];

    /// Returns the lowercase name used in logs and metric labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prim => "prim",
            Self::Kruskal => "kruskal",
        }
    }

    /// Runs this engine over `graph`, seeding Prim from the canonical first
    /// vertex.
    #[must_use]
    pub fn run(self, graph: &Graph) -> MstResult {
        match self {
            Self::Prim => prim(graph),
            Self::Kruskal => kruskal(graph),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monotonic count of algorithmically meaningful steps.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct OperationCounter(u64);

impl OperationCounter {
    /// Counts a single step.
    pub fn tick(&mut self) {
        self.add(1);
    }

    /// Counts `amount` steps at once.
    pub fn add(&mut self, amount: u64) {
        self.0 = self.0.saturating_add(amount);
    }

    /// Returns the number of steps counted so far.
    #[must_use]
    #[rustfmt::skip]
    pub fn get(self) -> u64 { self.0 }
}

/// Output of a single spanning-forest run.
///
/// For a graph with `V` vertices and `k` connected components the forest
/// holds exactly `V - k` edges.
#[derive(Clone, Debug, PartialEq)]
pub struct MstResult {
    algorithm: Algorithm,
    edges: Vec<Edge>,
    total_cost: u64,
    operations: u64,
    elapsed: Duration,
}

impl MstResult {
    /// Returns the engine that produced this result.
    #[must_use]
    #[rustfmt::skip]
    pub fn algorithm(&self) -> Algorithm { self.algorithm }

    /// Returns the accepted edges in acceptance order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Returns the number of accepted edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the sum of the accepted edge weights.
    #[must_use]
    #[rustfmt::skip]
    pub fn total_cost(&self) -> u64 { self.total_cost }

    /// Returns the operation count recorded during the run.
    #[must_use]
    #[rustfmt::skip]
    pub fn operations(&self) -> u64 { self.operations }

    /// Returns the wall-clock time spent inside the engine.
    #[must_use]
    #[rustfmt::skip]
    pub fn elapsed(&self) -> Duration { self.elapsed }

    /// Returns the elapsed time in whole nanoseconds, saturating at
    /// `u64::MAX`.
    #[must_use]
    pub fn elapsed_nanos(&self) -> u64 {
        u64::try_from(self.elapsed.as_nanos()).unwrap_or(u64::MAX)
    }

    /// Returns `true` when both results accepted the same edge multiset,
    /// regardless of acceptance order.
    #[must_use]
    pub fn same_edges(&self, other: &Self) -> bool {
        sorted_keys(&self.edges) == sorted_keys(&other.edges)
    }
}

fn sorted_keys(edges: &[Edge]) -> Vec<(u64, &str, &str)> {
    let mut keys: Vec<_> = edges
        .iter()
        .map(|edge| {
            let (low, high) = edge.endpoints_sorted();
            (edge.weight(), low, high)
        })
        .collect();
    keys.sort_unstable();
    keys
}

/// Accumulates a forest while an engine runs and stamps the elapsed time
/// when finished.
struct ForestBuilder {
    algorithm: Algorithm,
    started: Instant,
    edges: Vec<Edge>,
    total_cost: u64,
    counter: OperationCounter,
}

/// Operations charged for committing an edge to the forest.
const ACCEPT_COST: u64 = 3;

impl ForestBuilder {
    fn start(algorithm: Algorithm, capacity: usize) -> Self {
        Self {
            algorithm,
            started: Instant::now(),
            edges: Vec::with_capacity(capacity),
            total_cost: 0,
            counter: OperationCounter::default(),
        }
    }

    fn accept(&mut self, edge: &Edge) {
        self.total_cost = self.total_cost.saturating_add(edge.weight());
        self.edges.push(edge.clone());
        self.counter.add(ACCEPT_COST);
    }

    fn len(&self) -> usize {
        self.edges.len()
    }

    fn finish(self) -> MstResult {
        let elapsed = self.started.elapsed();
        MstResult {
            algorithm: self.algorithm,
            edges: self.edges,
            total_cost: self.total_cost,
            operations: self.counter.get(),
            elapsed,
        }
    }
}


#[cfg(test)]
mod property;
