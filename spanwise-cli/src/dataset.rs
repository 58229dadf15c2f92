//! JSON codecs for graph datasets and comparison output.
//!
//! Input documents look like
//! `{"graphs":[{"id":1,"nodes":["A","B"],"edges":[{"from":"A","to":"B","weight":4}]}]}`.
//! Unknown fields are ignored. Output documents mirror each graph's
//! comparison as `{"results":[...]}`.

use std::collections::HashSet;
use std::io::{Read, Write};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use spanwise_core::{Comparison, Edge, Graph, GraphError, GraphErrorCode, MstResult};
use thiserror::Error;

/// Failures raised while decoding a dataset document.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The document was not valid JSON or did not match the schema.
    #[error("malformed dataset document: {0}")]
    Decode(#[from] serde_json::Error),
    /// Two graphs shared an identifier.
    #[error("graph id {graph_id} appears more than once")]
    DuplicateGraph {
        /// The repeated identifier.
        graph_id: u64,
    },
    /// A node identifier was empty.
    #[error("graph {graph_id} lists an empty node identifier")]
    EmptyVertexId {
        /// Graph containing the empty identifier.
        graph_id: u64,
    },
    /// A graph failed structural validation.
    #[error("graph {graph_id} is invalid: {source}")]
    Graph {
        /// Graph that failed to build.
        graph_id: u64,
        /// The structural error.
        #[source]
        source: GraphError,
    },
}

/// Stable codes describing [`DatasetError`] variants.
///
/// Structural failures keep the code of the underlying [`GraphError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum DatasetErrorCode {
    /// The document was not valid JSON or did not match the schema.
    Decode,
    /// Two graphs shared an identifier.
    DuplicateGraph,
    /// A node identifier was empty.
    EmptyVertexId,
    /// A graph failed structural validation.
    Graph(GraphErrorCode),
}

impl DatasetErrorCode {
    /// Return the stable machine-readable representation of this error code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Decode => "DATASET_DECODE",
            Self::DuplicateGraph => "DATASET_DUPLICATE_GRAPH",
            Self::EmptyVertexId => "DATASET_EMPTY_VERTEX_ID",
            Self::Graph(code) => code.as_str(),
        }
    }
}

impl std::fmt::Display for DatasetErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DatasetError {
    /// Retrieve the stable [`DatasetErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> DatasetErrorCode {
        match self {
            Self::Decode(_) => DatasetErrorCode::Decode,
            Self::DuplicateGraph { .. } => DatasetErrorCode::DuplicateGraph,
            Self::EmptyVertexId { .. } => DatasetErrorCode::EmptyVertexId,
            Self::Graph { source, .. } => DatasetErrorCode::Graph(source.code()),
        }
    }

    /// Returns the identifier of the offending graph, when known.
    #[must_use]
    pub fn graph_id(&self) -> Option<u64> {
        match self {
            Self::Decode(_) => None,
            Self::DuplicateGraph { graph_id }
            | Self::EmptyVertexId { graph_id }
            | Self::Graph { graph_id, .. } => Some(*graph_id),
        }
    }
}

/// Top-level input document.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct DatasetDocument {
    /// Graphs in file order.
    pub graphs: Vec<GraphRecord>,
}

/// One graph as stored on disk.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GraphRecord {
    /// Graph identifier, unique within the document.
    pub id: u64,
    /// Vertex identifiers.
    pub nodes: Vec<String>,
    /// Weighted undirected edges.
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

/// One edge as stored on disk.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EdgeRecord {
    /// First endpoint.
    pub from: String,
    /// Second endpoint.
    pub to: String,
    /// Edge weight; must be positive.
    pub weight: i64,
}

impl GraphRecord {
    /// Builds a validated [`Graph`] from the record.
    ///
    /// # Errors
    /// Returns [`DatasetError::EmptyVertexId`] for blank node names and
    /// [`DatasetError::Graph`] for any structural problem.
    pub fn into_graph(self) -> Result<Graph, DatasetError> {
        let graph_id = self.id;
        if self.nodes.iter().any(String::is_empty) {
            return Err(DatasetError::EmptyVertexId { graph_id });
        }
        let edges = self
            .edges
            .into_iter()
            .map(|edge| (edge.from, edge.to, edge.weight));
        Graph::from_parts(graph_id, self.nodes, edges)
            .map_err(|source| DatasetError::Graph { graph_id, source })
    }
}

impl From<&Graph> for GraphRecord {
    fn from(graph: &Graph) -> Self {
        Self {
            id: graph.id(),
            nodes: graph.vertex_ids().map(str::to_owned).collect(),
            edges: graph.edges().iter().map(EdgeRecord::from).collect(),
        }
    }
}

impl From<&Edge> for EdgeRecord {
    fn from(edge: &Edge) -> Self {
        Self {
            from: edge.from().to_owned(),
            to: edge.to().to_owned(),
            weight: i64::try_from(edge.weight()).unwrap_or(i64::MAX),
        }
    }
}

/// Decodes and validates every graph in a dataset document.
///
/// # Errors
/// Returns the first [`DatasetError`] in document order.
///
/// # Examples
/// ```
/// use spanwise_cli::dataset::read_dataset;
///
/// let json = r#"{"graphs":[{"id":3,"nodes":["A","B"],"edges":[{"from":"A","to":"B","weight":4}]}]}"#;
/// let graphs = read_dataset(json.as_bytes())?;
/// assert_eq!(graphs[0].id(), 3);
/// assert_eq!(graphs[0].edge_count(), 1);
/// # Ok::<(), spanwise_cli::dataset::DatasetError>(())
/// ```
pub fn read_dataset(reader: impl Read) -> Result<Vec<Graph>, DatasetError> {
    let document: DatasetDocument = serde_json::from_reader(reader)?;
    let mut seen = HashSet::with_capacity(document.graphs.len());
    document
        .graphs
        .into_iter()
        .map(|record| {
            if !seen.insert(record.id) {
                return Err(DatasetError::DuplicateGraph {
                    graph_id: record.id,
                });
            }
            record.into_graph()
        })
        .collect()
}

/// Encodes `graphs` in the input document format.
///
/// # Errors
/// Returns any serialisation or I/O failure reported by `serde_json`.
pub fn write_dataset(graphs: &[Graph], writer: impl Write) -> serde_json::Result<()> {
    let document = DatasetDocument {
        graphs: graphs.iter().map(GraphRecord::from).collect(),
    };
    serde_json::to_writer_pretty(writer, &document)
}

/// Top-level output document.
#[derive(Debug, Serialize)]
pub struct OutputDocument<'a> {
    /// One entry per compared graph, in input order.
    pub results: Vec<ComparisonRecord<'a>>,
}

/// Both engines' output for one graph.
#[derive(Debug, Serialize)]
pub struct ComparisonRecord<'a> {
    /// Graph identifier.
    pub graph_id: u64,
    /// Size of the input graph.
    pub input_stats: InputStats,
    /// Prim's forest.
    pub prim: ForestRecord<'a>,
    /// Kruskal's forest.
    pub kruskal: ForestRecord<'a>,
}

/// Vertex and edge counts of an input graph.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct InputStats {
    /// Number of vertices.
    pub vertices: usize,
    /// Number of edges.
    pub edges: usize,
}

/// One engine's forest and measurements.
#[derive(Debug, Serialize)]
pub struct ForestRecord<'a> {
    /// Accepted edges in acceptance order.
    pub mst_edges: Vec<ForestEdge<'a>>,
    /// Sum of accepted weights.
    pub total_cost: u64,
    /// Engine operation count.
    pub operations_count: u64,
    /// Wall-clock time in milliseconds.
    pub execution_time_ms: f64,
}

/// An accepted edge.
#[derive(Debug, Serialize)]
pub struct ForestEdge<'a> {
    /// First endpoint.
    pub from: &'a str,
    /// Second endpoint.
    pub to: &'a str,
    /// Edge weight.
    pub weight: u64,
}

impl<'a> From<&'a MstResult> for ForestRecord<'a> {
    fn from(result: &'a MstResult) -> Self {
        Self {
            mst_edges: result
                .edges()
                .iter()
                .map(|edge| ForestEdge {
                    from: edge.from(),
                    to: edge.to(),
                    weight: edge.weight(),
                })
                .collect(),
            total_cost: result.total_cost(),
            operations_count: result.operations(),
            execution_time_ms: millis(result.elapsed()),
        }
    }
}

impl<'a> From<&'a Comparison> for ComparisonRecord<'a> {
    fn from(comparison: &'a Comparison) -> Self {
        Self {
            graph_id: comparison.graph_id(),
            input_stats: InputStats {
                vertices: comparison.vertex_count(),
                edges: comparison.edge_count(),
            },
            prim: ForestRecord::from(comparison.prim()),
            kruskal: ForestRecord::from(comparison.kruskal()),
        }
    }
}

/// Encodes comparison results as an output document.
///
/// # Errors
/// Returns any serialisation or I/O failure reported by `serde_json`.
pub fn write_output(comparisons: &[Comparison], writer: impl Write) -> serde_json::Result<()> {
    let document = OutputDocument {
        results: comparisons.iter().map(ComparisonRecord::from).collect(),
    };
    serde_json::to_writer_pretty(writer, &document)
}

/// Converts a duration to fractional milliseconds.
#[must_use]
pub fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000.0
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::Value;
    use spanwise_core::ComparisonBuilder;

    use super::*;

    const DISTRICTS: &str = r#"{
        "graphs": [{
            "id": 1,
            "nodes": ["A", "B", "C", "D", "E"],
            "edges": [
                {"from": "A", "to": "B", "weight": 4},
                {"from": "A", "to": "C", "weight": 3},
                {"from": "B", "to": "C", "weight": 2},
                {"from": "B", "to": "D", "weight": 5},
                {"from": "C", "to": "D", "weight": 7},
                {"from": "C", "to": "E", "weight": 8},
                {"from": "D", "to": "E", "weight": 6}
            ],
            "note": "ignored"
        }]
    }"#;

    #[test]
    fn reads_a_dataset_and_ignores_unknown_fields() {
        let graphs = read_dataset(DISTRICTS.as_bytes()).expect("dataset must decode");
        assert_eq!(graphs.len(), 1);
        assert_eq!(graphs[0].vertex_count(), 5);
        assert_eq!(graphs[0].edge_count(), 7);
    }

    #[test]
    fn edges_default_to_empty() {
        let graphs = read_dataset(r#"{"graphs":[{"id":4,"nodes":["A"]}]}"#.as_bytes())
            .expect("dataset must decode");
        assert_eq!(graphs[0].edge_count(), 0);
    }

    #[rstest]
    #[case::not_json("graphs", "DATASET_DECODE", None)]
    #[case::missing_nodes(r#"{"graphs":[{"id":1}]}"#, "DATASET_DECODE", None)]
    #[case::duplicate_graph(
        r#"{"graphs":[{"id":2,"nodes":[]},{"id":2,"nodes":[]}]}"#,
        "DATASET_DUPLICATE_GRAPH",
        Some(2)
    )]
    #[case::empty_node(r#"{"graphs":[{"id":5,"nodes":["A",""]}]}"#, "DATASET_EMPTY_VERTEX_ID", Some(5))]
    #[case::unknown_vertex(
        r#"{"graphs":[{"id":6,"nodes":["A"],"edges":[{"from":"A","to":"Z","weight":1}]}]}"#,
        "GRAPH_UNKNOWN_VERTEX",
        Some(6)
    )]
    #[case::zero_weight(
        r#"{"graphs":[{"id":7,"nodes":["A","B"],"edges":[{"from":"A","to":"B","weight":0}]}]}"#,
        "GRAPH_NON_POSITIVE_WEIGHT",
        Some(7)
    )]
    fn rejects_malformed_documents(
        #[case] json: &str,
        #[case] code: &str,
        #[case] graph_id: Option<u64>,
    ) {
        let err = read_dataset(json.as_bytes()).expect_err("document must be rejected");
        assert_eq!(err.code().as_str(), code);
        assert_eq!(err.graph_id(), graph_id);
    }

    #[test]
    fn structural_failures_keep_the_graph_code() {
        let json = r#"{"graphs":[{"id":3,"nodes":["A"],"edges":[{"from":"A","to":"A","weight":1}]}]}"#;
        let err = read_dataset(json.as_bytes()).expect_err("self loop must be rejected");
        assert_eq!(err.code(), DatasetErrorCode::Graph(GraphErrorCode::SelfLoop));
        assert_eq!(err.code().to_string(), "GRAPH_SELF_LOOP");
        assert_ne!(err.code(), DatasetErrorCode::Decode);
    }

    #[test]
    fn written_datasets_decode_to_the_same_graphs() {
        let graphs = read_dataset(DISTRICTS.as_bytes()).expect("dataset must decode");
        let mut buffer = Vec::new();
        write_dataset(&graphs, &mut buffer).expect("dataset must encode");
        let decoded = read_dataset(buffer.as_slice()).expect("encoded dataset must decode");
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].id(), graphs[0].id());
        assert!(decoded[0].vertex_ids().eq(graphs[0].vertex_ids()));
        assert_eq!(decoded[0].edges(), graphs[0].edges());
    }

    #[test]
    fn output_document_carries_both_forests() {
        let graphs = read_dataset(DISTRICTS.as_bytes()).expect("dataset must decode");
        let comparisons = ComparisonBuilder::new()
            .build()
            .expect("default configuration must build")
            .compare_all(&graphs)
            .expect("engines must agree");
        let mut buffer = Vec::new();
        write_output(&comparisons, &mut buffer).expect("output must encode");

        let value: Value = serde_json::from_slice(&buffer).expect("output must be JSON");
        let result = &value["results"][0];
        assert_eq!(result["graph_id"], 1);
        assert_eq!(result["input_stats"]["vertices"], 5);
        assert_eq!(result["input_stats"]["edges"], 7);
        for engine in ["prim", "kruskal"] {
            assert_eq!(result[engine]["total_cost"], 16);
            assert_eq!(result[engine]["mst_edges"].as_array().map(Vec::len), Some(4));
            assert!(result[engine]["operations_count"].as_u64().is_some_and(|ops| ops > 0));
            assert!(result[engine]["execution_time_ms"].as_f64().is_some());
        }
        assert_eq!(
            result["kruskal"]["mst_edges"][0],
            serde_json::json!({"from": "B", "to": "C", "weight": 2})
        );
    }
}
