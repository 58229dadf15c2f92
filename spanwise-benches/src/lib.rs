//! Benchmark support crate for spanwise.
//!
//! Supplies seeded input graphs and parameter labels for the Criterion
//! benchmarks of the Prim and Kruskal engines and the union-find structure.

pub mod error;
pub mod params;
pub mod source;
