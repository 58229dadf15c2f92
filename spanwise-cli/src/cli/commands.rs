//! Command implementations and argument parsing for the `spanwise` binary.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use spanwise_core::synthetic::{DEFAULT_SEED, DatasetTier, generate_tier};
use spanwise_core::{BatchStrategy, Comparator, ComparisonBuilder, ComparisonError, SyntheticError};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use crate::dataset::{DatasetError, read_dataset, write_dataset, write_output};
use crate::report::{DatasetReport, render_table, write_csv, write_summary};

const DEFAULT_OUTPUT_DIR: &str = "output";
const DEFAULT_REPORT_PATH: &str = "analysis/performance_comparison.csv";
const DEFAULT_SUMMARY_PATH: &str = "analysis/summary_statistics.txt";
const DEFAULT_DATASET_DIR: &str = "datasets";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "spanwise",
    about = "Compare Prim and Kruskal minimum spanning forests."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Compare both engines on one or more dataset files.
    Run(RunCommand),
    /// Write synthetic benchmark datasets.
    Generate(GenerateCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Dataset files in the `{"graphs": [...]}` format.
    #[arg(required = true)]
    pub datasets: Vec<PathBuf>,

    /// Directory receiving `<dataset>_output.json` files.
    #[arg(long = "output-dir", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Path of the CSV performance report.
    #[arg(long, default_value = DEFAULT_REPORT_PATH)]
    pub report: PathBuf,

    /// Path of the per-dataset summary statistics.
    #[arg(long, default_value = DEFAULT_SUMMARY_PATH)]
    pub summary: PathBuf,

    /// Compare the graphs of each dataset on the rayon pool.
    #[arg(long)]
    pub parallel: bool,
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Directory receiving `<tier>_dataset.json` files.
    #[arg(long = "out-dir", default_value = DEFAULT_DATASET_DIR)]
    pub out_dir: PathBuf,

    /// Seed for the random generator.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Tiers to generate; every tier when omitted.
    #[arg(long = "tier", value_enum)]
    pub tiers: Vec<TierArg>,
}

/// Dataset tiers selectable on the command line.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum TierArg {
    /// Five graphs under 30 vertices.
    Small,
    /// Ten graphs under 300 vertices.
    Medium,
    /// Ten graphs under 1000 vertices.
    Large,
    /// Five graphs under 3000 vertices.
    ExtraLarge,
}

impl From<TierArg> for DatasetTier {
    fn from(value: TierArg) -> Self {
        match value {
            TierArg::Small => Self::Small,
            TierArg::Medium => Self::Medium,
            TierArg::Large => Self::Large,
            TierArg::ExtraLarge => Self::ExtraLarge,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// A file or directory could not be read or written.
    #[error("I/O failure on `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A dataset file was malformed.
    #[error("invalid dataset `{path}`: {source}")]
    Dataset {
        /// Dataset file being decoded.
        path: PathBuf,
        /// Decoding failure.
        #[source]
        source: DatasetError,
    },
    /// Two dataset paths would write the same `<name>_output.json`.
    #[error("datasets `{first}` and `{second}` share the name `{name}`")]
    DuplicateDatasetName {
        /// Name derived from both file stems.
        name: String,
        /// Path listed first.
        first: PathBuf,
        /// Path listed later.
        second: PathBuf,
    },
    /// A JSON document could not be written.
    #[error("failed to encode `{path}`: {source}")]
    Encode {
        /// Destination file.
        path: PathBuf,
        /// Serialisation failure.
        #[source]
        source: serde_json::Error,
    },
    /// The engines disagreed or the comparator could not be configured.
    #[error(transparent)]
    Comparison(#[from] ComparisonError),
    /// Synthetic generation failed.
    #[error(transparent)]
    Synthetic(#[from] SyntheticError),
}

impl CliError {
    /// Returns the stable code of the underlying library error, if any.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Dataset { source, .. } => Some(source.code().as_str()),
            Self::Comparison(err) => Some(err.code().as_str()),
            Self::Synthetic(err) => Some(err.code().as_str()),
            Self::Io { .. } | Self::DuplicateDatasetName { .. } | Self::Encode { .. } => None,
        }
    }
}

/// Outcome of a `run` command.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Per-dataset comparisons in command-line order.
    pub reports: Vec<DatasetReport>,
    /// Output documents written, one per dataset.
    pub outputs: Vec<PathBuf>,
    /// CSV report path.
    pub report: PathBuf,
    /// Summary statistics path.
    pub summary: PathBuf,
}

/// One dataset file written by `generate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDataset {
    /// Tier the file belongs to.
    pub tier: DatasetTier,
    /// Destination path.
    pub path: PathBuf,
    /// Number of graphs written.
    pub graphs: usize,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum ExecutionSummary {
    /// Result of `run`.
    Run(RunSummary),
    /// Files written by `generate`.
    Generate(Vec<GeneratedDataset>),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when reading, comparing or writing fails. A
/// consistency violation between the engines surfaces as
/// [`CliError::Comparison`].
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use spanwise_cli::cli::{Cli, Command, ExecutionSummary, RunCommand, run_cli};
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = tempfile::tempdir()?;
/// let dataset = dir.path().join("pair.json");
/// std::fs::write(
///     &dataset,
///     r#"{"graphs":[{"id":1,"nodes":["A","B"],"edges":[{"from":"A","to":"B","weight":2}]}]}"#,
/// )?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         datasets: vec![dataset],
///         output_dir: dir.path().join("output"),
///         report: dir.path().join("report.csv"),
///         summary: dir.path().join("summary.txt"),
///         parallel: false,
///     }),
/// };
/// let ExecutionSummary::Run(summary) = run_cli(cli)? else {
///     unreachable!("run always yields a run summary");
/// };
/// assert_eq!(summary.reports[0].comparisons()[0].prim().total_cost(), 2);
/// assert!(summary.outputs[0].ends_with("pair_output.json"));
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Run(run) => {
            span.record("command", field::display("run"));
            run_command(run).map(ExecutionSummary::Run)
        }
        Command::Generate(generate) => {
            span.record("command", field::display("generate"));
            generate_command(generate).map(ExecutionSummary::Generate)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(datasets = command.datasets.len(), parallel = command.parallel),
)]
pub(super) fn run_command(command: RunCommand) -> Result<RunSummary, CliError> {
    let strategy = if command.parallel {
        BatchStrategy::Parallel
    } else {
        BatchStrategy::Sequential
    };
    let comparator = ComparisonBuilder::new().with_strategy(strategy).build()?;
    ensure_distinct_names(&command.datasets)?;

    let mut reports = Vec::with_capacity(command.datasets.len());
    let mut outputs = Vec::with_capacity(command.datasets.len());
    for path in &command.datasets {
        let report = compare_dataset(&comparator, path)?;
        let output = command
            .output_dir
            .join(format!("{}_output.json", report.name()));
        write_json(&output, |writer| write_output(report.comparisons(), writer))?;
        outputs.push(output);
        reports.push(report);
    }

    write_text(&command.report, |writer| write_csv(&reports, writer))?;
    write_text(&command.summary, |writer| write_summary(&reports, writer))?;
    info!(
        datasets = reports.len(),
        graphs = reports.iter().map(|r| r.comparisons().len()).sum::<usize>(),
        report = %command.report.display(),
        "comparison run completed"
    );
    Ok(RunSummary {
        reports,
        outputs,
        report: command.report,
        summary: command.summary,
    })
}

fn ensure_distinct_names(datasets: &[PathBuf]) -> Result<(), CliError> {
    let mut seen: HashMap<String, &Path> = HashMap::with_capacity(datasets.len());
    for path in datasets {
        let name = derive_dataset_name(path);
        if let Some(first) = seen.get(&name) {
            return Err(CliError::DuplicateDatasetName {
                first: first.to_path_buf(),
                second: path.clone(),
                name,
            });
        }
        seen.insert(name, path);
    }
    Ok(())
}

#[instrument(
    name = "cli.dataset",
    err,
    skip(comparator, path),
    fields(path = %path.display(), graphs = field::Empty),
)]
pub(super) fn compare_dataset(
    comparator: &Comparator,
    path: &Path,
) -> Result<DatasetReport, CliError> {
    let file = File::open(path).map_err(io_error(path))?;
    let graphs = read_dataset(BufReader::new(file)).map_err(|source| CliError::Dataset {
        path: path.to_path_buf(),
        source,
    })?;
    Span::current().record("graphs", graphs.len());
    let comparisons = comparator.compare_all(&graphs)?;
    Ok(DatasetReport::new(derive_dataset_name(path), comparisons))
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(seed = command.seed, out_dir = %command.out_dir.display()),
)]
pub(super) fn generate_command(
    command: GenerateCommand,
) -> Result<Vec<GeneratedDataset>, CliError> {
    let mut tiers: Vec<DatasetTier> = command.tiers.into_iter().map(DatasetTier::from).collect();
    if tiers.is_empty() {
        tiers = DatasetTier::ALL.to_vec();
    }
    let mut seen = Vec::with_capacity(tiers.len());
    tiers.retain(|tier| {
        let fresh = !seen.contains(tier);
        seen.push(*tier);
        fresh
    });

    let mut written = Vec::with_capacity(tiers.len());
    for tier in tiers {
        let mut rng = SmallRng::seed_from_u64(tier_seed(command.seed, tier));
        let graphs = generate_tier(tier, &mut rng)?;
        let path = command
            .out_dir
            .join(format!("{}_dataset.json", tier.name()));
        write_json(&path, |writer| write_dataset(&graphs, writer))?;
        info!(tier = tier.name(), graphs = graphs.len(), path = %path.display(), "dataset written");
        written.push(GeneratedDataset {
            tier,
            path,
            graphs: graphs.len(),
        });
    }
    Ok(written)
}

/// Each tier draws from its own stream, independent of which other tiers are
/// requested.
pub(super) fn tier_seed(seed: u64, tier: DatasetTier) -> u64 {
    let offset = DatasetTier::ALL
        .iter()
        .position(|candidate| *candidate == tier)
        .unwrap_or_default();
    seed.wrapping_add(offset as u64)
}

pub(super) fn derive_dataset_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .filter(|value| !value.is_empty())
        .map_or_else(|| "dataset".to_owned(), ToOwned::to_owned)
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> CliError + use<> {
    let path = path.to_path_buf();
    move |source| CliError::Io { path, source }
}

fn create_file(path: &Path) -> Result<BufWriter<File>, CliError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    File::create(path)
        .map(BufWriter::new)
        .map_err(io_error(path))
}

fn write_json(
    path: &Path,
    encode: impl FnOnce(&mut BufWriter<File>) -> serde_json::Result<()>,
) -> Result<(), CliError> {
    let mut writer = create_file(path)?;
    encode(&mut writer).map_err(|source| CliError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(io_error(path))
}

fn write_text(
    path: &Path,
    render: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> Result<(), CliError> {
    let mut writer = create_file(path)?;
    render(&mut writer)
        .and_then(|()| writer.flush())
        .map_err(io_error(path))
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Run(run) => {
            render_table(&run.reports, &mut writer)?;
            writeln!(writer)?;
            for output in &run.outputs {
                writeln!(writer, "results: {}", output.display())?;
            }
            writeln!(writer, "report: {}", run.report.display())?;
            writeln!(writer, "summary: {}", run.summary.display())?;
        }
        ExecutionSummary::Generate(datasets) => {
            for dataset in datasets {
                writeln!(
                    writer,
                    "{}: {} graphs -> {}",
                    dataset.tier.name(),
                    dataset.graphs,
                    dataset.path.display()
                )?;
            }
        }
    }
    Ok(())
}
