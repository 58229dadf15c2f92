//! Weighted edges between two named vertices.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::error::GraphError;

/// An immutable weighted edge.
///
/// Undirected edges (the default) compare and hash symmetrically, so
/// `Edge(a, b, w) == Edge(b, a, w)`. Labels never take part in equality.
///
/// # Examples
/// ```
/// use spanwise_core::Edge;
///
/// let forward = Edge::new("A", "B", 4)?;
/// let backward = Edge::new("B", "A", 4)?.with_label("Ring Road");
/// assert_eq!(forward, backward);
/// assert_eq!(backward.label(), Some("Ring Road"));
/// # Ok::<(), spanwise_core::GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Edge {
    from: String,
    to: String,
    weight: u64,
    label: Option<String>,
    directed: bool,
}

impl Edge {
    /// Creates an undirected edge after checking the edge-local invariants.
    ///
    /// Endpoint existence is checked by [`crate::Graph::add_edge`], not here.
    ///
    /// # Errors
    /// Returns [`GraphError::SelfLoop`] when `from == to` and
    /// [`GraphError::NonPositiveWeight`] when `weight <= 0`.
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: i64) -> Result<Self, GraphError> {
        let from = from.into();
        let to = to.into();
        if from == to {
            return Err(GraphError::SelfLoop { id: from });
        }
        let Some(weight) = u64::try_from(weight).ok().filter(|w| *w > 0) else {
            return Err(GraphError::NonPositiveWeight { from, to, weight });
        };
        Ok(Self {
            from,
            to,
            weight,
            label: None,
            directed: false,
        })
    }

    /// Attaches a descriptive label such as a road name.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Marks the edge as directed.
    ///
    /// Directed edges compare by ordered endpoints. Spanning-tree algorithms
    /// still traverse them in both directions.
    #[must_use]
    pub fn directed(mut self) -> Self {
        self.directed = true;
        self
    }

    /// Returns the first endpoint as provided at construction.
    #[must_use]
    #[rustfmt::skip]
    pub fn from(&self) -> &str { &self.from }

    /// Returns the second endpoint as provided at construction.
    #[must_use]
    #[rustfmt::skip]
    pub fn to(&self) -> &str { &self.to }

    /// Returns the positive edge weight.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> u64 { self.weight }

    /// Returns the optional label.
    #[must_use]
    #[rustfmt::skip]
    pub fn label(&self) -> Option<&str> { self.label.as_deref() }

    /// Returns `true` when the edge was marked as directed.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_directed(&self) -> bool { self.directed }

    /// Returns `true` when `id` is one of the endpoints.
    #[must_use]
    pub fn is_incident_to(&self, id: &str) -> bool {
        self.from == id || self.to == id
    }

    /// Returns the endpoint opposite `id`, or `None` when `id` is not an
    /// endpoint.
    #[must_use]
    pub fn other(&self, id: &str) -> Option<&str> {
        if self.from == id {
            Some(&self.to)
        } else if self.to == id {
            Some(&self.from)
        } else {
            None
        }
    }

    /// Returns the endpoints ordered lexicographically.
    #[must_use]
    pub fn endpoints_sorted(&self) -> (&str, &str) {
        if self.from <= self.to {
            (&self.from, &self.to)
        } else {
            (&self.to, &self.from)
        }
    }

    /// Compares two edges by selection priority: weight first, then the
    /// lexicographically smaller endpoint, then the larger one.
    ///
    /// Both algorithms share this ordering so that equal-weight edges are
    /// chosen identically.
    #[must_use]
    pub fn cmp_priority(&self, other: &Self) -> Ordering {
        let (left_low, left_high) = self.endpoints_sorted();
        let (right_low, right_high) = other.endpoints_sorted();
        self.weight
            .cmp(&other.weight)
            .then_with(|| left_low.cmp(right_low))
            .then_with(|| left_high.cmp(right_high))
    }

    fn identity(&self) -> (&str, &str) {
        if self.directed {
            (&self.from, &self.to)
        } else {
            self.endpoints_sorted()
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight
            && self.directed == other.directed
            && self.identity() == other.identity()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
        self.weight.hash(state);
        self.directed.hash(state);
    }
}
