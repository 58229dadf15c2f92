//! Command-line interface orchestration.
//!
//! `run` compares Prim and Kruskal on JSON dataset files and writes per-graph
//! results, a CSV report and summary statistics. `generate` writes synthetic
//! datasets in the same input format.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, GenerateCommand, GeneratedDataset, RunCommand,
    RunSummary, TierArg, render_summary, run_cli,
};
