//! Unit tests for the comparison engine.

use rstest::rstest;
use spanwise_test_support::capture::CaptureLayer;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

use crate::error::{ComparisonError, ComparisonErrorCode};
use crate::graph::Graph;
use crate::mst::{Algorithm, kruskal, prim};
use crate::test_utils::{district_graph, split_graph};
use crate::validate::ForestViolation;

use super::{BatchStrategy, Comparator, ComparisonBuilder};

fn comparator() -> Comparator {
    ComparisonBuilder::new()
        .build()
        .expect("default configuration must build")
}

#[test]
fn builder_defaults_to_sequential_with_verification() {
    let builder = ComparisonBuilder::new();
    assert_eq!(builder.strategy(), BatchStrategy::Sequential);
    assert!(builder.verifies_forests());
}

#[test]
fn compares_the_district_graph() {
    let comparison = comparator()
        .compare(&district_graph())
        .expect("engines must agree");
    assert_eq!(comparison.graph_id(), 1);
    assert_eq!(comparison.vertex_count(), 5);
    assert_eq!(comparison.edge_count(), 7);
    assert!((comparison.density_percent() - 70.0).abs() < 1e-9);
    assert_eq!(comparison.components(), 1);
    assert_eq!(comparison.prim().total_cost(), 16);
    assert_eq!(comparison.kruskal().total_cost(), 16);
    assert_eq!(comparison.result(Algorithm::Kruskal), comparison.kruskal());
    let expected = comparison.prim().operations() as f64 / comparison.kruskal().operations() as f64;
    assert!((comparison.operations_ratio() - expected).abs() < f64::EPSILON);
}

#[test]
fn split_graph_yields_a_forest_per_component() {
    let comparison = comparator()
        .compare(&split_graph())
        .expect("engines must agree");
    assert_eq!(comparison.components(), 2);
    assert_eq!(comparison.prim().edge_count(), 2);
    assert_eq!(comparison.kruskal().total_cost(), 3);
}

#[test]
fn empty_graph_has_zero_ratios() {
    let comparison = comparator()
        .compare(&Graph::new(9))
        .expect("empty graph must compare");
    assert_eq!(comparison.components(), 0);
    assert_eq!(comparison.operations_ratio(), 0.0);
}

#[test]
fn reports_cost_mismatch() {
    let graph = district_graph();
    let other = split_graph();
    let err = comparator()
        .check(&graph, &prim(&graph), &kruskal(&other))
        .expect_err("costs differ");
    assert_eq!(
        err,
        ComparisonError::CostMismatch {
            graph_id: 1,
            prim_cost: 16,
            kruskal_cost: 3
        }
    );
    assert_eq!(err.code(), ComparisonErrorCode::CostMismatch);
    assert!(err.is_consistency_violation());
}

#[test]
fn reports_edge_count_mismatch() {
    let single = Graph::from_parts(4, ["A", "B"], [("A", "B", 2)]).expect("valid graph");
    let pair = Graph::from_parts(5, ["A", "B", "C"], [("A", "B", 1), ("B", "C", 1)])
        .expect("valid graph");
    let err = comparator()
        .check(&single, &prim(&single), &kruskal(&pair))
        .expect_err("edge counts differ");
    assert_eq!(err.code(), ComparisonErrorCode::EdgeCountMismatch);
}

#[rstest]
#[case(true, false)]
#[case(false, true)]
fn forest_verification_is_optional(#[case] verify: bool, #[case] passes: bool) {
    let target = Graph::from_parts(6, ["X", "Y"], [("X", "Y", 1)]).expect("valid graph");
    let foreign = Graph::from_parts(7, ["A", "B"], [("A", "B", 1)]).expect("valid graph");
    let comparator = ComparisonBuilder::new()
        .with_forest_verification(verify)
        .build()
        .expect("configuration must build");
    let outcome = comparator.check(&target, &prim(&foreign), &kruskal(&foreign));
    assert_eq!(outcome.is_ok(), passes);
    if let Err(err) = outcome {
        assert_eq!(
            err,
            ComparisonError::InvalidForest {
                graph_id: 6,
                algorithm: Algorithm::Prim,
                violation: ForestViolation::UnknownEndpoint { id: "A".into() },
            }
        );
    }
}

fn assert_batch_order(strategy: BatchStrategy) {
    let graphs: Vec<Graph> = (0..16_u64)
        .map(|id| {
            Graph::from_parts(
                id,
                ["A", "B", "C"],
                [("A", "B", 1), ("B", "C", 1 + id as i64)],
            )
            .expect("valid graph")
        })
        .collect();
    let comparator = ComparisonBuilder::new()
        .with_strategy(strategy)
        .build()
        .expect("strategy must be available");
    let comparisons = comparator.compare_all(&graphs).expect("engines must agree");
    let ids: Vec<u64> = comparisons.iter().map(|c| c.graph_id()).collect();
    assert_eq!(ids, (0..16).collect::<Vec<_>>());
    for (id, comparison) in (0_u64..).zip(&comparisons) {
        assert_eq!(comparison.prim().total_cost(), 2 + id);
    }
}

#[test]
fn sequential_batches_preserve_input_order() {
    assert_batch_order(BatchStrategy::Sequential);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_batches_preserve_input_order() {
    assert_batch_order(BatchStrategy::Parallel);
}

#[cfg(not(feature = "parallel"))]
#[test]
fn parallel_strategy_requires_the_feature() {
    let err = ComparisonBuilder::new()
        .with_strategy(BatchStrategy::Parallel)
        .build()
        .expect_err("parallel backend is not compiled in");
    assert_eq!(err.code(), ComparisonErrorCode::BackendUnavailable);
    assert!(!err.is_consistency_violation());
}

#[test]
fn emits_spans_and_summary_events() {
    let capture = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    tracing::subscriber::with_default(subscriber, || {
        comparator()
            .compare(&district_graph())
            .expect("engines must agree");
    });

    let spans = capture.spans();
    let names: Vec<&str> = spans.iter().map(|span| span.name.as_str()).collect();
    assert_eq!(names, ["compare.graph", "mst.prim", "mst.kruskal"]);
    let graph_span = &spans[0];
    assert_eq!(graph_span.fields["graph_id"], "1");
    assert_eq!(graph_span.fields["vertices"], "5");

    let debug = capture.events_at(Level::DEBUG);
    let agree = debug
        .iter()
        .find(|event| event.message() == Some("engines agree"))
        .expect("summary event must be emitted");
    assert_eq!(agree.span.as_deref(), Some("compare.graph"));
    assert_eq!(agree.fields["total_cost"], "16");
    assert!(
        debug
            .iter()
            .any(|event| event.message() == Some("prim finished")
                && event.span.as_deref() == Some("mst.prim"))
    );
    assert!(capture.events_at(Level::ERROR).is_empty());
}
