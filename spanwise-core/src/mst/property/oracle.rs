//! Reference minimum spanning forest built without a union-find.
//!
//! Component membership is tracked as an explicit label per vertex and a
//! merge relabels every member of the absorbed component. That is quadratic
//! but simple enough to trust.

use std::collections::HashMap;

use crate::graph::Graph;

/// Cost and size of the reference forest.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct OracleForest {
    pub total_cost: u64,
    pub edge_count: usize,
    pub components: usize,
}

pub(super) fn relabelling_forest(graph: &Graph) -> OracleForest {
    let position: HashMap<&str, usize> = graph
        .vertex_ids()
        .enumerate()
        .map(|(index, id)| (id, index))
        .collect();
    let mut label: Vec<usize> = (0..graph.vertex_count()).collect();

    let mut edges: Vec<_> = graph.edges().iter().collect();
    edges.sort_by_key(|edge| edge.weight());

    let mut forest = OracleForest {
        total_cost: 0,
        edge_count: 0,
        components: graph.vertex_count(),
    };
    for edge in edges {
        let from = label[position[edge.from()]];
        let to = label[position[edge.to()]];
        if from == to {
            continue;
        }
        for slot in &mut label {
            if *slot == to {
                *slot = from;
            }
        }
        forest.total_cost += edge.weight();
        forest.edge_count += 1;
        forest.components -= 1;
    }
    forest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{district_graph, split_graph};

    #[test]
    fn oracle_matches_known_forests() {
        assert_eq!(
            relabelling_forest(&district_graph()),
            OracleForest {
                total_cost: 16,
                edge_count: 4,
                components: 1
            }
        );
        assert_eq!(
            relabelling_forest(&split_graph()),
            OracleForest {
                total_cost: 3,
                edge_count: 2,
                components: 2
            }
        );
    }
}
