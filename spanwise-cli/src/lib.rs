//! Support library for the `spanwise` binary.
//!
//! Exposes the command pipeline, dataset codecs and report writers so tests
//! and doctests can drive them without spawning a process.

pub mod cli;
pub mod dataset;
pub mod logging;
pub mod report;
