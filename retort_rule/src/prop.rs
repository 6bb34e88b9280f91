//! Label storage for the combined graph of a rule.

use retort_graph::{EdgeId, VertexId};

/// The `(left, right)` labels of one rule element.
///
/// The slot for a side the element is not a member of holds the empty string
/// and is never read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelPair {
    /// Label in the left side.
    pub left: String,
    /// Label in the right side.
    pub right: String,
}

impl LabelPair {
    /// A pair from anything string-like.
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

/// String labels for every vertex and edge of a rule's combined graph.
#[derive(Clone, Debug, Default)]
pub struct PropString {
    vertices: Vec<LabelPair>,
    edges: Vec<LabelPair>,
}

impl PropString {
    pub(crate) fn add_vertex(&mut self, pair: LabelPair) {
        self.vertices.push(pair);
    }

    pub(crate) fn add_edge(&mut self, pair: LabelPair) {
        self.edges.push(pair);
    }

    /// Labels of a vertex.
    #[must_use]
    #[contracts::debug_requires(v.index() < self.vertices.len(), "vertex must be labelled")]
    pub fn vertex(&self, v: VertexId) -> &LabelPair {
        &self.vertices[v.index()]
    }

    /// Labels of an edge.
    #[must_use]
    #[contracts::debug_requires(e.index() < self.edges.len(), "edge must be labelled")]
    pub fn edge(&self, e: EdgeId) -> &LabelPair {
        &self.edges[e.index()]
    }

    #[contracts::debug_requires(v.index() < self.vertices.len(), "vertex must be labelled")]
    pub(crate) fn vertex_mut(&mut self, v: VertexId) -> &mut LabelPair {
        &mut self.vertices[v.index()]
    }

    #[contracts::debug_requires(e.index() < self.edges.len(), "edge must be labelled")]
    pub(crate) fn edge_mut(&mut self, e: EdgeId) -> &mut LabelPair {
        &mut self.edges[e.index()]
    }

    /// Whether the storage covers exactly the given element counts.
    #[must_use]
    pub fn verify(&self, num_vertices: usize, num_edges: usize) -> bool {
        self.vertices.len() == num_vertices && self.edges.len() == num_edges
    }
}
