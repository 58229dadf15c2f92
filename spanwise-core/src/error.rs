//! Error types for the spanwise core library.
//!
//! Structural errors are raised while a [`crate::Graph`] is being built,
//! precondition errors while an algorithm is being started and comparison
//! errors when the two engines disagree. Every error exposes a stable
//! machine-readable code for logs and reports.

use thiserror::Error;

use crate::compare::BatchStrategy;
use crate::mst::Algorithm;
use crate::validate::ForestViolation;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl ::std::fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Structural error raised while constructing a [`crate::Graph`].
///
/// These are always fatal to the construction step that produced them; the
/// graph is left exactly as it was before the failing call.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// A vertex with the same identifier already exists.
    #[error("vertex `{id}` already exists")]
    DuplicateVertex {
        /// The repeated identifier.
        id: String,
    },
    /// An edge referenced a vertex that is not part of the graph.
    #[error("vertex `{id}` is not part of the graph")]
    UnknownVertex {
        /// The missing identifier.
        id: String,
    },
    /// An edge connected a vertex to itself.
    #[error("edge would form a self-loop on `{id}`")]
    SelfLoop {
        /// The vertex both endpoints refer to.
        id: String,
    },
    /// An edge weight was zero or negative.
    #[error("edge ({from}, {to}) has non-positive weight {weight}")]
    NonPositiveWeight {
        /// First endpoint as provided.
        from: String,
        /// Second endpoint as provided.
        to: String,
        /// The rejected weight.
        weight: i64,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// A vertex with the same identifier already exists.
        DuplicateVertex => DuplicateVertex { .. } => "GRAPH_DUPLICATE_VERTEX",
        /// An edge referenced a vertex that is not part of the graph.
        UnknownVertex => UnknownVertex { .. } => "GRAPH_UNKNOWN_VERTEX",
        /// An edge connected a vertex to itself.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// An edge weight was zero or negative.
        NonPositiveWeight => NonPositiveWeight { .. } => "GRAPH_NON_POSITIVE_WEIGHT",
    }
}

/// Precondition failure raised when starting a spanning-tree computation.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MstError {
    /// The requested start vertex does not exist in the graph.
    #[error("start vertex `{id}` is not part of the graph")]
    UnknownStartVertex {
        /// The identifier that could not be found.
        id: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`MstError`] variants.
    enum MstErrorCode for MstError {
        /// The requested start vertex does not exist in the graph.
        UnknownStartVertex => UnknownStartVertex { .. } => "MST_UNKNOWN_START_VERTEX",
    }
}

/// Disagreement between the two engines, or a comparator that cannot run.
///
/// Every variant except [`ComparisonError::BackendUnavailable`] is a
/// consistency violation: the input was valid and one of the engines is
/// wrong.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ComparisonError {
    /// Prim and Kruskal produced forests of different cost.
    #[error("graph {graph_id}: prim cost {prim_cost} differs from kruskal cost {kruskal_cost}")]
    CostMismatch {
        /// Graph on which the engines disagreed.
        graph_id: u64,
        /// Total cost reported by Prim.
        prim_cost: u64,
        /// Total cost reported by Kruskal.
        kruskal_cost: u64,
    },
    /// Prim and Kruskal accepted different numbers of edges.
    #[error("graph {graph_id}: prim accepted {prim_edges} edges, kruskal accepted {kruskal_edges}")]
    EdgeCountMismatch {
        /// Graph on which the engines disagreed.
        graph_id: u64,
        /// Edges accepted by Prim.
        prim_edges: usize,
        /// Edges accepted by Kruskal.
        kruskal_edges: usize,
    },
    /// A result failed structural validation.
    #[error("graph {graph_id}: {algorithm} produced an invalid forest: {violation}")]
    InvalidForest {
        /// Graph whose result was rejected.
        graph_id: u64,
        /// Engine that produced the result.
        algorithm: Algorithm,
        /// The defect found.
        #[source]
        violation: ForestViolation,
    },
    /// The requested batch strategy needs a feature this build lacks.
    #[error("batch strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// The strategy that was requested.
        requested: BatchStrategy,
    },
}

impl ComparisonError {
    /// Returns `true` when the error indicates an engine bug rather than a
    /// configuration problem.
    #[must_use]
    pub const fn is_consistency_violation(&self) -> bool {
        !matches!(self, Self::BackendUnavailable { .. })
    }
}

define_error_codes! {
    /// Stable codes describing [`ComparisonError`] variants.
    enum ComparisonErrorCode for ComparisonError {
        /// Prim and Kruskal produced forests of different cost.
        CostMismatch => CostMismatch { .. } => "COMPARE_COST_MISMATCH",
        /// Prim and Kruskal accepted different numbers of edges.
        EdgeCountMismatch => EdgeCountMismatch { .. } => "COMPARE_EDGE_COUNT_MISMATCH",
        /// A result failed structural validation.
        InvalidForest => InvalidForest { .. } => "COMPARE_INVALID_FOREST",
        /// The requested batch strategy is not compiled in.
        BackendUnavailable => BackendUnavailable { .. } => "COMPARE_BACKEND_UNAVAILABLE",
    }
}

/// Failure while generating a synthetic graph.
#[cfg(feature = "synthetic")]
#[cfg_attr(docsrs, doc(cfg(feature = "synthetic")))]
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SyntheticError {
    /// The requested density lies outside `[0, 1]` or is not finite.
    #[error("density {density} must lie within [0, 1]")]
    InvalidDensity {
        /// The rejected density.
        density: f64,
    },
    /// The maximum weight was zero.
    #[error("maximum edge weight must be positive")]
    InvalidMaxWeight,
    /// Building the graph failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

#[cfg(feature = "synthetic")]
define_error_codes! {
    /// Stable codes describing [`SyntheticError`] variants.
    enum SyntheticErrorCode for SyntheticError {
        /// The requested density lies outside `[0, 1]`.
        InvalidDensity => InvalidDensity { .. } => "SYNTHETIC_INVALID_DENSITY",
        /// The maximum weight was zero.
        InvalidMaxWeight => InvalidMaxWeight => "SYNTHETIC_INVALID_MAX_WEIGHT",
        /// Building the graph failed.
        Graph => Graph(..) => "SYNTHETIC_GRAPH",
    }
}
