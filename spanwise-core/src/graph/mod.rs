//! Graph model: vertices, weighted edges and the derived adjacency view.
//!
//! Vertices keep their insertion order, which is the canonical order used
//! when an algorithm needs a "first" vertex. Internally every vertex also
//! has a dense index so the algorithms can use plain vectors instead of
//! string-keyed maps on their hot paths.

mod edge;
mod vertex;

use std::collections::{HashMap, VecDeque};

use crate::error::GraphError;

pub use self::{edge::Edge, vertex::Vertex};

/// A weighted graph with string-identified vertices.
///
/// # Examples
/// ```
/// use spanwise_core::Graph;
///
/// let mut graph = Graph::new(1);
/// graph.add_vertex("A")?;
/// graph.add_vertex("B")?;
/// graph.add_edge("A", "B", 4)?;
/// assert_eq!(graph.degree("A"), Some(1));
/// assert!(graph.is_connected());
/// # Ok::<(), spanwise_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Graph {
    id: u64,
    vertices: Vec<Vertex>,
    index: HashMap<String, usize>,
    edges: Vec<Edge>,
    endpoints: Vec<(usize, usize)>,
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    /// Creates an empty graph with the given identifier.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Builds a graph from an ordered vertex list and `(from, to, weight)`
    /// triples.
    ///
    /// # Errors
    /// Returns the first [`GraphError`] raised by [`Self::add_vertex`] or
    /// [`Self::add_edge`].
    ///
    /// # Examples
    /// ```
    /// use spanwise_core::Graph;
    ///
    /// let graph = Graph::from_parts(7, ["A", "B", "C"], [("A", "B", 1), ("B", "C", 2)])?;
    /// assert_eq!(graph.vertex_count(), 3);
    /// assert_eq!(graph.edge_count(), 2);
    /// # Ok::<(), spanwise_core::GraphError>(())
    /// ```
    pub fn from_parts<V, E, S>(id: u64, vertices: V, edges: E) -> Result<Self, GraphError>
    where
        V: IntoIterator,
        V::Item: Into<String>,
        E: IntoIterator<Item = (S, S, i64)>,
        S: AsRef<str>,
    {
        let mut graph = Self::new(id);
        for vertex in vertices {
            graph.add_vertex(vertex)?;
        }
        for (from, to, weight) in edges {
            graph.add_edge(from.as_ref(), to.as_ref(), weight)?;
        }
        Ok(graph)
    }

    /// Returns the graph identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn id(&self) -> u64 { self.id }

    /// Adds an unlabelled vertex.
    ///
    /// # Errors
    /// Returns [`GraphError::DuplicateVertex`] when `id` is already present.
    pub fn add_vertex(&mut self, id: impl Into<String>) -> Result<(), GraphError> {
        self.insert_vertex(id.into(), None)
    }

    /// Adds a vertex carrying a label such as a district name.
    ///
    /// # Errors
    /// Returns [`GraphError::DuplicateVertex`] when `id` is already present.
    pub fn add_labelled_vertex(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<(), GraphError> {
        self.insert_vertex(id.into(), Some(label.into()))
    }

    fn insert_vertex(&mut self, id: String, label: Option<String>) -> Result<(), GraphError> {
        if self.index.contains_key(&id) {
            return Err(GraphError::DuplicateVertex { id });
        }
        self.index.insert(id.clone(), self.vertices.len());
        self.vertices.push(Vertex::new(id, label));
        self.adjacency.push(Vec::new());
        Ok(())
    }

    /// Adds an unlabelled undirected edge between two existing vertices.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownVertex`] when either endpoint is absent,
    /// [`GraphError::SelfLoop`] when `from == to`, and
    /// [`GraphError::NonPositiveWeight`] when `weight <= 0`.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: i64) -> Result<(), GraphError> {
        self.require_vertex(from)?;
        self.require_vertex(to)?;
        self.insert_edge(Edge::new(from, to, weight)?)
    }

    /// Adds an undirected edge carrying a label such as a road name.
    ///
    /// # Errors
    /// Fails under the same conditions as [`Self::add_edge`].
    pub fn add_labelled_edge(
        &mut self,
        from: &str,
        to: &str,
        weight: i64,
        label: impl Into<String>,
    ) -> Result<(), GraphError> {
        self.require_vertex(from)?;
        self.require_vertex(to)?;
        self.insert_edge(Edge::new(from, to, weight)?.with_label(label))
    }

    /// Adds a pre-built edge.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownVertex`] when either endpoint is absent.
    pub fn insert_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        let from = self.require_vertex(edge.from())?;
        let to = self.require_vertex(edge.to())?;
        let edge_index = self.edges.len();
        self.edges.push(edge);
        self.endpoints.push((from, to));
        for vertex in [from, to] {
            if let Some(incident) = self.adjacency.get_mut(vertex) {
                incident.push(edge_index);
            }
        }
        Ok(())
    }

    fn require_vertex(&self, id: &str) -> Result<usize, GraphError> {
        self.index_of(id).ok_or_else(|| GraphError::UnknownVertex { id: id.to_owned() })
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` when the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the vertices in insertion order.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertices(&self) -> &[Vertex] { &self.vertices }

    /// Returns the vertex identifiers in insertion order.
    pub fn vertex_ids(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.vertices.iter().map(Vertex::id)
    }

    /// Returns the edges in insertion order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Looks up a vertex by identifier.
    #[must_use]
    pub fn vertex(&self, id: &str) -> Option<&Vertex> {
        self.index_of(id).and_then(|index| self.vertices.get(index))
    }

    /// Returns `true` when `id` names a vertex of this graph.
    #[must_use]
    pub fn contains_vertex(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Returns the number of edges incident to `id`.
    #[must_use]
    pub fn degree(&self, id: &str) -> Option<usize> {
        self.index_of(id).map(|index| self.incident(index).len())
    }

    /// Returns the edges incident to `id`, or `None` for an unknown vertex.
    pub fn incident_edges(&self, id: &str) -> Option<impl Iterator<Item = &Edge> + '_> {
        let index = self.index_of(id)?;
        Some(
            self.incident(index)
                .iter()
                .filter_map(|edge| self.edges.get(*edge)),
        )
    }

    /// Returns, for every vertex in insertion order, the list of incident
    /// edges. An edge between `u` and `v` is listed under both.
    pub fn adjacency(&self) -> impl Iterator<Item = (&Vertex, Vec<&Edge>)> + '_ {
        self.vertices.iter().enumerate().map(|(index, vertex)| {
            let edges = self
                .incident(index)
                .iter()
                .filter_map(|edge| self.edges.get(*edge))
                .collect();
            (vertex, edges)
        })
    }

    /// Returns `true` when a traversal from any vertex reaches every other
    /// vertex. The empty graph is trivially connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        if self.vertices.is_empty() {
            return true;
        }
        let mut visited = vec![false; self.vertices.len()];
        self.flood(0, &mut visited) == self.vertices.len()
    }

    /// Returns `|E| / (|V|(|V|-1)/2)`, or `0.0` when `|V| <= 1`.
    ///
    /// Parallel edges are counted individually, so multigraphs may exceed
    /// `1.0`.
    #[must_use]
    pub fn density(&self) -> f64 {
        let vertices = self.vertices.len();
        if vertices <= 1 {
            return 0.0;
        }
        let max_edges = vertices.saturating_mul(vertices - 1) / 2;
        self.edges.len() as f64 / max_edges as f64
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn incident(&self, vertex: usize) -> &[usize] {
        self.adjacency.get(vertex).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn endpoints(&self, edge: usize) -> Option<(usize, usize)> {
        self.endpoints.get(edge).copied()
    }

    /// Marks every vertex reachable from `start` and returns how many were
    /// newly marked (including `start`).
    pub(crate) fn flood(&self, start: usize, visited: &mut [bool]) -> usize {
        let Some(slot) = visited.get_mut(start) else {
            return 0;
        };
        if *slot {
            return 0;
        }
        *slot = true;
        let mut reached = 1;
        let mut queue = VecDeque::from([start]);
        while let Some(vertex) = queue.pop_front() {
            for &edge in self.incident(vertex) {
                let Some((from, to)) = self.endpoints(edge) else {
                    continue;
                };
                let next = if from == vertex { to } else { from };
                if let Some(seen) = visited.get_mut(next)
                    && !*seen
                {
                    *seen = true;
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }
        reached
    }
}
