//! Seeded benchmark inputs.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use spanwise_core::Graph;
use spanwise_core::synthetic::{SyntheticConfig, connected_graph};

use crate::error::BenchSetupError;
use crate::params::{MstBenchParams, UnionFindBenchParams};

/// Builds the connected graph described by `params`.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] for an empty graph and
/// [`BenchSetupError::Synthetic`] when generation rejects the density.
pub fn bench_graph(params: &MstBenchParams, seed: u64) -> Result<Graph, BenchSetupError> {
    if params.vertex_count == 0 {
        return Err(BenchSetupError::ZeroValue {
            context: "vertex_count",
        });
    }
    let config = SyntheticConfig::new(1, params.vertex_count, params.density);
    Ok(connected_graph(&config, &mut SmallRng::seed_from_u64(seed))?)
}

/// Returns `2 * len` random element pairs to feed to `union`.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] when `len` is zero.
pub fn union_pairs(
    params: &UnionFindBenchParams,
    seed: u64,
) -> Result<Vec<(usize, usize)>, BenchSetupError> {
    if params.len == 0 {
        return Err(BenchSetupError::ZeroValue { context: "len" });
    }
    let mut rng = SmallRng::seed_from_u64(seed);
    Ok((0..params.len.saturating_mul(2))
        .map(|_| (rng.gen_range(0..params.len), rng.gen_range(0..params.len)))
        .collect())
}
