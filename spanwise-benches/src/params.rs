//! Benchmark parameter types.
//!
//! Each implements [`fmt::Display`] so it can serve as a Criterion
//! `BenchmarkId` parameter.

use std::fmt;

/// Shape of the graph fed to an MST engine benchmark.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MstBenchParams {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Target edge density in `[0, 1]`.
    pub density: f64,
}

impl fmt::Display for MstBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},density={:.2}", self.vertex_count, self.density)
    }
}

/// Size of a union-find benchmark run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UnionFindBenchParams {
    /// Number of elements.
    pub len: usize,
}

impl fmt::Display for UnionFindBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.len)
    }
}
