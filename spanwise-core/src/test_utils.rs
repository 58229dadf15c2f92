//! Shared test utilities for `spanwise-core`.

use proptest::test_runner::Config as ProptestConfig;
use spanwise_test_support::profile::PropertyProfile;

use crate::graph::Graph;

/// Proptest configuration honouring `PROGTEST_CASES` and
/// `SPANWISE_PBT_FORK`.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = PropertyProfile::from_env(default_cases);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Five districts joined by seven roads; the cheapest network costs 16.
pub(crate) fn district_graph() -> Graph {
    Graph::from_parts(
        1,
        ["A", "B", "C", "D", "E"],
        [
            ("A", "B", 4),
            ("A", "C", 3),
            ("B", "C", 2),
            ("B", "D", 5),
            ("C", "D", 7),
            ("C", "E", 8),
            ("D", "E", 6),
        ],
    )
    .expect("district graph must build")
}

/// Two separate pairs, `A-B:1` and `C-D:2`.
pub(crate) fn split_graph() -> Graph {
    Graph::from_parts(2, ["A", "B", "C", "D"], [("A", "B", 1), ("C", "D", 2)])
        .expect("split graph must build")
}
