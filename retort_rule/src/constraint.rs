//! Structural side conditions attached to the left side of a rule.

use std::collections::BTreeSet;

use retort_graph::VertexId;

/// Comparison operator used by [`VertexAdjacency`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConstraintOp {
    /// Observed count must equal the bound.
    Eq,
    /// Observed count must be strictly below the bound.
    Lt,
    /// Observed count must be strictly above the bound.
    Gt,
    /// Observed count must be at most the bound.
    Leq,
    /// Observed count must be at least the bound.
    Geq,
}

impl ConstraintOp {
    /// Whether `observed op bound` holds.
    #[must_use]
    pub const fn holds(self, observed: usize, bound: usize) -> bool {
        match self {
            ConstraintOp::Eq => observed == bound,
            ConstraintOp::Lt => observed < bound,
            ConstraintOp::Gt => observed > bound,
            ConstraintOp::Leq => observed <= bound,
            ConstraintOp::Geq => observed >= bound,
        }
    }
}

/// Bounds the number of host edges incident to the image of a pattern vertex.
///
/// Only edges whose label is in `edge_labels` and whose far endpoint carries
/// a label in `vertex_labels` are counted. An empty set acts as a wildcard.
/// A constraint on a vertex the match leaves unmapped holds vacuously.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexAdjacency {
    /// The constrained pattern vertex, in combined graph coordinates.
    pub vertex: VertexId,
    /// Comparison applied to the count.
    pub op: ConstraintOp,
    /// The bound to compare against.
    pub count: usize,
    /// Accepted labels of the far endpoints; empty accepts all.
    pub vertex_labels: BTreeSet<String>,
    /// Accepted labels of the counted edges; empty accepts all.
    pub edge_labels: BTreeSet<String>,
}

impl VertexAdjacency {
    /// A degree bound with label filters; pass empty iterators for wildcards.
    pub fn new<VI, EI>(vertex: VertexId, op: ConstraintOp, count: usize, vertex_labels: VI, edge_labels: EI) -> Self
    where
        VI: IntoIterator<Item = String>,
        EI: IntoIterator<Item = String>,
    {
        Self {
            vertex,
            op,
            count,
            vertex_labels: vertex_labels.into_iter().collect(),
            edge_labels: edge_labels.into_iter().collect(),
        }
    }

    /// The same constraint re-anchored at another vertex.
    pub(crate) fn with_vertex(&self, vertex: VertexId) -> Self {
        Self {
            vertex,
            ..self.clone()
        }
    }
}

// #############################################################
// Tests
// #############################################################
