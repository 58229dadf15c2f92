//! Spanwise core library.
//!
//! Builds minimum spanning forests of weighted undirected graphs with two
//! independent engines, Prim and Kruskal, counts the work each one does and
//! cross-checks their results.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod compare;
mod error;
mod graph;
mod mst;
#[cfg(feature = "synthetic")]
#[cfg_attr(docsrs, doc(cfg(feature = "synthetic")))]
pub mod synthetic;
#[cfg(test)]
mod test_utils;
mod union_find;
pub mod validate;

#[cfg(feature = "synthetic")]
pub use crate::error::{SyntheticError, SyntheticErrorCode};
pub use crate::{
    compare::{BatchStrategy, Comparator, Comparison, ComparisonBuilder},
    error::{
        ComparisonError, ComparisonErrorCode, GraphError, GraphErrorCode, MstError, MstErrorCode,
    },
    graph::{Edge, Graph, Vertex},
    mst::{Algorithm, MstResult, OperationCounter, kruskal, prim, prim_from},
    union_find::{KeyedUnionFind, UnionFind},
    validate::ForestViolation,
};
