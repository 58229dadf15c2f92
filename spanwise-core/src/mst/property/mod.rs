//! Property-based tests for the spanning-forest engines.
//!
//! Random graphs of several shapes are run through Prim and Kruskal and the
//! results are checked against a naive relabelling oracle, against the
//! validator and against repeated runs of the same engine.

mod oracle;
mod properties;
mod strategies;
mod types;
