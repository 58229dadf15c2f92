//! Property bodies shared by the proptest runners and the seeded cases.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::mst::{Algorithm, MstResult};
use crate::validate::{
    check_forest, connects_all_vertices, count_connected_components, is_acyclic,
};

use super::oracle::relabelling_forest;
use super::types::GraphFixture;

fn fail(fixture: &GraphFixture, message: impl std::fmt::Display) -> TestCaseError {
    TestCaseError::fail(format!("{message} ({})", fixture.describe()))
}

/// Prim and Kruskal agree with each other and with the relabelling oracle.
pub(super) fn engines_match_oracle(fixture: &GraphFixture) -> TestCaseResult {
    let oracle = relabelling_forest(&fixture.graph);
    let prim = Algorithm::Prim.run(&fixture.graph);
    let kruskal = Algorithm::Kruskal.run(&fixture.graph);

    for result in [&prim, &kruskal] {
        if result.total_cost() != oracle.total_cost {
            return Err(fail(
                fixture,
                format_args!(
                    "{} cost {} differs from oracle cost {}",
                    result.algorithm(),
                    result.total_cost(),
                    oracle.total_cost
                ),
            ));
        }
        if result.edge_count() != oracle.edge_count {
            return Err(fail(
                fixture,
                format_args!(
                    "{} accepted {} edges, oracle accepted {}",
                    result.algorithm(),
                    result.edge_count(),
                    oracle.edge_count
                ),
            ));
        }
    }
    if !prim.same_edges(&kruskal) {
        return Err(fail(fixture, "prim and kruskal selected different edges"));
    }
    Ok(())
}

/// Both results are forests of the expected size that the validator accepts.
pub(super) fn results_are_spanning_forests(fixture: &GraphFixture) -> TestCaseResult {
    let components = count_connected_components(&fixture.graph);
    if components != fixture.components {
        return Err(fail(
            fixture,
            format_args!("validator counted {components} components"),
        ));
    }
    let expected_edges = fixture.graph.vertex_count() - components;

    for algorithm in Algorithm::ALL {
        let result = algorithm.run(&fixture.graph);
        if !is_acyclic(result.edges()) {
            return Err(fail(fixture, format_args!("{algorithm} produced a cycle")));
        }
        if result.edge_count() != expected_edges {
            return Err(fail(
                fixture,
                format_args!(
                    "{algorithm} accepted {} edges, expected {expected_edges}",
                    result.edge_count()
                ),
            ));
        }
        if components == 1
            && !connects_all_vertices(result.edges(), fixture.graph.vertex_ids())
        {
            return Err(fail(fixture, format_args!("{algorithm} left a vertex out")));
        }
        check_forest(&fixture.graph, &result).map_err(|violation| fail(fixture, violation))?;
    }
    Ok(())
}

/// Re-running an engine reproduces edges, cost and operation count.
pub(super) fn reruns_are_identical(fixture: &GraphFixture) -> TestCaseResult {
    for algorithm in Algorithm::ALL {
        let first = algorithm.run(&fixture.graph);
        let second = algorithm.run(&fixture.graph);
        if !same_run(&first, &second) {
            return Err(fail(fixture, format_args!("{algorithm} is not deterministic")));
        }
    }
    Ok(())
}

fn same_run(first: &MstResult, second: &MstResult) -> bool {
    first.edges() == second.edges()
        && first.total_cost() == second.total_cost()
        && first.operations() == second.operations()
}
