//! Graph generators for spanning-forest property tests.
//!
//! Every generator works on dense vertex numbers first and only names the
//! vertices (`v0`, `v1`, ...) when the [`Graph`] is assembled. Insertion
//! order is shuffled so that the canonical first vertex varies.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::graph::Graph;

use super::types::{GraphFixture, GraphShape};

const MIN_VERTICES: usize = 2;
const MAX_VERTICES: usize = 48;
const DENSE_MAX_VERTICES: usize = 20;
const MAX_WEIGHT: i64 = 100;

/// Draws a shape and a seed, then builds the fixture from them.
pub(super) fn fixture_strategy() -> impl Strategy<Value = GraphFixture> {
    (any::<GraphShape>(), any::<u64>()).prop_map(|(shape, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(shape, &mut rng)
    })
}

/// Builds a fixture of the requested shape.
pub(super) fn generate_fixture(shape: GraphShape, rng: &mut SmallRng) -> GraphFixture {
    let mut plan = EdgePlan::default();
    let (vertex_count, components) = match shape {
        GraphShape::Tree => {
            let n = rng.gen_range(MIN_VERTICES..=MAX_VERTICES);
            plan.tree(0, n, rng, uniform);
            (n, 1)
        }
        GraphShape::Sparse => {
            let n = rng.gen_range(MIN_VERTICES..=MAX_VERTICES);
            plan.tree(0, n, rng, uniform);
            let extra = rng.gen_range(n / 2..=n);
            plan.scatter(0, n, extra, rng, uniform);
            (n, 1)
        }
        GraphShape::Dense => {
            let n = rng.gen_range(MIN_VERTICES..=DENSE_MAX_VERTICES);
            plan.tree(0, n, rng, uniform);
            let probability = rng.gen_range(0.6..=0.95);
            plan.pairs(0, n, probability, rng, uniform);
            (n, 1)
        }
        GraphShape::Ties => {
            let pool: Vec<i64> = (0..rng.gen_range(1..=3))
                .map(|_| rng.gen_range(1..=5))
                .collect();
            let pick = move |rng: &mut SmallRng| pool[rng.gen_range(0..pool.len())];
            let n = rng.gen_range(MIN_VERTICES..=MAX_VERTICES);
            plan.tree(0, n, rng, &pick);
            plan.scatter(0, n, n, rng, &pick);
            (n, 1)
        }
        GraphShape::Disconnected => {
            let parts = rng.gen_range(2..=4);
            let mut offset = 0;
            for _ in 0..parts {
                let size = rng.gen_range(1..=10);
                plan.tree(offset, size, rng, uniform);
                plan.scatter(offset, size, size / 2, rng, uniform);
                offset += size;
            }
            (offset, parts)
        }
    };

    GraphFixture {
        graph: plan.assemble(vertex_count, rng),
        shape,
        components,
    }
}

fn uniform(rng: &mut SmallRng) -> i64 {
    rng.gen_range(1..=MAX_WEIGHT)
}

#[derive(Default)]
struct EdgePlan {
    edges: Vec<(usize, usize, i64)>,
}

impl EdgePlan {
    /// Joins each vertex of `offset..offset + size` to a random earlier one.
    fn tree(
        &mut self,
        offset: usize,
        size: usize,
        rng: &mut SmallRng,
        weight: impl Fn(&mut SmallRng) -> i64,
    ) {
        for vertex in 1..size {
            let parent = rng.gen_range(0..vertex);
            let w = weight(rng);
            self.edges.push((offset + parent, offset + vertex, w));
        }
    }

    /// Adds `count` random non-loop edges inside `offset..offset + size`.
    fn scatter(
        &mut self,
        offset: usize,
        size: usize,
        count: usize,
        rng: &mut SmallRng,
        weight: impl Fn(&mut SmallRng) -> i64,
    ) {
        if size < 2 {
            return;
        }
        for _ in 0..count {
            let from = rng.gen_range(0..size);
            let to = rng.gen_range(0..size);
            if from != to {
                let w = weight(rng);
                self.edges.push((offset + from, offset + to, w));
            }
        }
    }

    /// Adds each unordered pair inside `offset..offset + size` with the given
    /// probability.
    fn pairs(
        &mut self,
        offset: usize,
        size: usize,
        probability: f64,
        rng: &mut SmallRng,
        weight: impl Fn(&mut SmallRng) -> i64,
    ) {
        for left in 0..size {
            for right in (left + 1)..size {
                if rng.gen_bool(probability) {
                    let w = weight(rng);
                    self.edges.push((offset + left, offset + right, w));
                }
            }
        }
    }

    fn assemble(self, vertex_count: usize, rng: &mut SmallRng) -> Graph {
        let names: Vec<String> = (0..vertex_count).map(|index| format!("v{index}")).collect();
        let mut order: Vec<usize> = (0..vertex_count).collect();
        order.shuffle(rng);

        let mut graph = Graph::new(rng.r#gen());
        for index in order {
            graph
                .add_vertex(names[index].as_str())
                .expect("generated names are unique");
        }
        for (from, to, weight) in self.edges {
            graph
                .add_edge(&names[from], &names[to], weight)
                .expect("generated edges are valid");
        }
        graph
    }
}
