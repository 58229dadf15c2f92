//! Tabular and textual performance reports.

use std::io::{self, Write};

use spanwise_core::Comparison;

use crate::dataset::millis;

/// Header row of the CSV report.
pub const CSV_HEADER: &str = "Dataset,GraphID,Vertices,Edges,Density%,Prim_Cost,Kruskal_Cost,\
Prim_Time_ms,Kruskal_Time_ms,Prim_Operations,Kruskal_Operations,Time_Ratio,Operations_Ratio";

/// Comparisons for every graph of one dataset file.
#[derive(Clone, Debug)]
pub struct DatasetReport {
    name: String,
    comparisons: Vec<Comparison>,
}

impl DatasetReport {
    /// Wraps the comparisons of the dataset called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, comparisons: Vec<Comparison>) -> Self {
        Self {
            name: name.into(),
            comparisons,
        }
    }

    /// Returns the dataset name.
    #[must_use]
    #[rustfmt::skip]
    pub fn name(&self) -> &str { &self.name }

    /// Returns the per-graph comparisons in input order.
    #[must_use]
    #[rustfmt::skip]
    pub fn comparisons(&self) -> &[Comparison] { &self.comparisons }

    /// Aggregates the dataset's timings and operation counts.
    #[must_use]
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary::from_comparisons(&self.comparisons)
    }
}

/// Per-algorithm averages over one dataset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DatasetSummary {
    /// Number of graphs averaged.
    pub graphs: usize,
    /// Mean Prim time in milliseconds.
    pub prim_avg_ms: f64,
    /// Mean Kruskal time in milliseconds.
    pub kruskal_avg_ms: f64,
    /// Mean Prim operation count.
    pub prim_avg_operations: f64,
    /// Mean Kruskal operation count.
    pub kruskal_avg_operations: f64,
}

impl DatasetSummary {
    /// Averages `comparisons`; every field is zero when the slice is empty.
    #[must_use]
    pub fn from_comparisons(comparisons: &[Comparison]) -> Self {
        if comparisons.is_empty() {
            return Self::default();
        }
        let count = comparisons.len() as f64;
        let mean = |value: fn(&Comparison) -> f64| comparisons.iter().map(value).sum::<f64>() / count;
        Self {
            graphs: comparisons.len(),
            prim_avg_ms: mean(|c| millis(c.prim().elapsed())),
            kruskal_avg_ms: mean(|c| millis(c.kruskal().elapsed())),
            prim_avg_operations: mean(|c| c.prim().operations() as f64),
            kruskal_avg_operations: mean(|c| c.kruskal().operations() as f64),
        }
    }

    /// Mean Prim time over mean Kruskal time, or `0.0` when Kruskal's mean
    /// is zero.
    #[must_use]
    pub fn time_ratio(&self) -> f64 {
        ratio(self.prim_avg_ms, self.kruskal_avg_ms)
    }

    /// Mean Prim operations over mean Kruskal operations, or `0.0` when
    /// Kruskal's mean is zero.
    #[must_use]
    pub fn operations_ratio(&self) -> f64 {
        ratio(self.prim_avg_operations, self.kruskal_avg_operations)
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Writes one CSV row per compared graph, datasets in the order given.
///
/// # Errors
/// Returns any error raised by `writer`.
///
/// # Examples
/// ```
/// use spanwise_cli::report::{CSV_HEADER, DatasetReport, write_csv};
///
/// let mut buffer = Vec::new();
/// write_csv(&[DatasetReport::new("empty", Vec::new())], &mut buffer)?;
/// assert_eq!(String::from_utf8_lossy(&buffer).trim_end(), CSV_HEADER);
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn write_csv(reports: &[DatasetReport], mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for report in reports {
        for comparison in report.comparisons() {
            writeln!(
                writer,
                "{},{},{},{},{:.1},{},{},{:.3},{:.3},{},{},{:.3},{:.3}",
                report.name(),
                comparison.graph_id(),
                comparison.vertex_count(),
                comparison.edge_count(),
                comparison.density_percent(),
                comparison.prim().total_cost(),
                comparison.kruskal().total_cost(),
                millis(comparison.prim().elapsed()),
                millis(comparison.kruskal().elapsed()),
                comparison.prim().operations(),
                comparison.kruskal().operations(),
                comparison.time_ratio(),
                comparison.operations_ratio(),
            )?;
        }
    }
    Ok(())
}

/// Writes per-dataset averages, datasets sorted by name.
///
/// # Errors
/// Returns any error raised by `writer`.
pub fn write_summary(reports: &[DatasetReport], mut writer: impl Write) -> io::Result<()> {
    let mut ordered: Vec<&DatasetReport> = reports.iter().collect();
    ordered.sort_by(|left, right| left.name().cmp(right.name()));

    writeln!(writer, "MST performance summary")?;
    writeln!(writer, "=======================")?;
    for report in ordered {
        let summary = report.summary();
        writeln!(writer)?;
        writeln!(writer, "{} ({} graphs)", report.name(), summary.graphs)?;
        writeln!(writer, "{}", "-".repeat(48))?;
        writeln!(
            writer,
            "prim     avg time {:.3} ms  avg operations {:.0}",
            summary.prim_avg_ms, summary.prim_avg_operations
        )?;
        writeln!(
            writer,
            "kruskal  avg time {:.3} ms  avg operations {:.0}",
            summary.kruskal_avg_ms, summary.kruskal_avg_operations
        )?;
        writeln!(
            writer,
            "prim/kruskal  time {:.3}  operations {:.3}",
            summary.time_ratio(),
            summary.operations_ratio()
        )?;
    }
    Ok(())
}

/// Renders an aligned per-graph table for terminals.
///
/// # Errors
/// Returns any error raised by `writer`.
pub fn render_table(reports: &[DatasetReport], mut writer: impl Write) -> io::Result<()> {
    writeln!(
        writer,
        "{:<20} {:>6} {:>7} {:>8} {:>8} {:>10} {:>10} {:>10} {:>12} {:>12}",
        "dataset",
        "graph",
        "vertices",
        "edges",
        "density%",
        "cost",
        "prim_ms",
        "kruskal_ms",
        "prim_ops",
        "kruskal_ops",
    )?;
    for report in reports {
        for comparison in report.comparisons() {
            writeln!(
                writer,
                "{:<20} {:>6} {:>7} {:>8} {:>8.1} {:>10} {:>10.3} {:>10.3} {:>12} {:>12}",
                report.name(),
                comparison.graph_id(),
                comparison.vertex_count(),
                comparison.edge_count(),
                comparison.density_percent(),
                comparison.prim().total_cost(),
                millis(comparison.prim().elapsed()),
                millis(comparison.kruskal().elapsed()),
                comparison.prim().operations(),
                comparison.kruskal().operations(),
            )?;
        }
    }
    Ok(())
}
