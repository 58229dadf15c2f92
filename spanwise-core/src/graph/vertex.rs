//! Named vertices owned by a [`crate::Graph`].

/// A vertex identified by a string unique within its graph.
///
/// The degree is not stored on the vertex; it is derived from the graph's
/// adjacency via [`crate::Graph::degree`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Vertex {
    id: String,
    label: Option<String>,
}

impl Vertex {
    pub(crate) fn new(id: String, label: Option<String>) -> Self {
        Self { id, label }
    }

    /// Returns the unique identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn id(&self) -> &str { &self.id }

    /// Returns the optional label, for example a district name.
    #[must_use]
    #[rustfmt::skip]
    pub fn label(&self) -> Option<&str> { self.label.as_deref() }
}
