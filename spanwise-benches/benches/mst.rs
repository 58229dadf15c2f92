//! Prim and Kruskal engine benchmarks.
//!
//! Each engine runs on the same seeded connected graphs at a sparse and a
//! dense target so the two groups can be read side by side.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use spanwise_benches::{error::BenchSetupError, params::MstBenchParams, source::bench_graph};
use spanwise_core::Algorithm;

const SEED: u64 = 42;

const VERTEX_COUNTS: &[usize] = &[100, 500, 1_000];

const DENSITIES: &[f64] = &[0.05, 0.4];

fn engine_impl(c: &mut Criterion, algorithm: Algorithm) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group(algorithm.as_str());
    group.sample_size(20);

    for &vertex_count in VERTEX_COUNTS {
        for &density in DENSITIES {
            let params = MstBenchParams {
                vertex_count,
                density,
            };
            let graph = bench_graph(&params, SEED)?;
            group.bench_with_input(BenchmarkId::from_parameter(&params), &graph, |b, graph| {
                b.iter(|| algorithm.run(graph));
            });
        }
    }

    group.finish();
    Ok(())
}

fn prim(c: &mut Criterion) {
    if let Err(err) = engine_impl(c, Algorithm::Prim) {
        panic!("prim benchmark setup failed: {err}");
    }
}

fn kruskal(c: &mut Criterion) {
    if let Err(err) = engine_impl(c, Algorithm::Kruskal) {
        panic!("kruskal benchmark setup failed: {err}");
    }
}

criterion_group!(benches, prim, kruskal);
criterion_main!(benches);
