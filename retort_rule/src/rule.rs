//! Rules stored as a combined graph with side memberships.

use retort_graph::{ComponentLabelling, EdgeId, Graph, VertexId, connected_components};

use crate::constraint::VertexAdjacency;
use crate::error::RuleBuildError;
use crate::membership::{Membership, Side};
use crate::prop::{LabelPair, PropString};

/// A rewrite rule.
///
/// The left side, the context, and the right side share one combined graph;
/// [`Membership`] tags select the elements of each side. Labels live in a
/// [`PropString`] with one `(left, right)` pair per element, and the
/// connected components of both side projections are precomputed for the
/// match makers.
#[derive(Clone, Debug)]
pub struct Rule {
    graph: Graph,
    vertex_membership: Vec<Membership>,
    edge_membership: Vec<Membership>,
    prop: PropString,
    constraints: Vec<VertexAdjacency>,
    left_components: ComponentLabelling,
    right_components: ComponentLabelling,
}

impl Rule {
    #[contracts::debug_requires(
        vertex_membership.len() == graph.num_vertices() && edge_membership.len() == graph.num_edges(),
        "memberships must cover the graph"
    )]
    #[contracts::debug_requires(prop.verify(graph.num_vertices(), graph.num_edges()), "labels must cover the graph")]
    #[contracts::debug_ensures(ret.edges_inside_sides(), "edges must stay inside the sides of their endpoints")]
    pub(crate) fn from_parts(
        graph: Graph,
        vertex_membership: Vec<Membership>,
        edge_membership: Vec<Membership>,
        prop: PropString,
        constraints: Vec<VertexAdjacency>,
    ) -> Self {
        let left_components = side_components_of(&graph, &vertex_membership, &edge_membership, Side::Left);
        let right_components = side_components_of(&graph, &vertex_membership, &edge_membership, Side::Right);
        Self {
            graph,
            vertex_membership,
            edge_membership,
            prop,
            constraints,
            left_components,
            right_components,
        }
    }

    /// The combined graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Number of vertices in the combined graph.
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.graph.num_vertices()
    }

    /// Number of edges in the combined graph.
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.graph.num_edges()
    }

    /// Membership of a vertex.
    #[must_use]
    #[contracts::debug_requires(v.index() < self.num_vertices(), "vertex must be in the rule")]
    pub fn vertex_membership(&self, v: VertexId) -> Membership {
        self.vertex_membership[v.index()]
    }

    /// Membership of an edge.
    #[must_use]
    #[contracts::debug_requires(e.index() < self.num_edges(), "edge must be in the rule")]
    pub fn edge_membership(&self, e: EdgeId) -> Membership {
        self.edge_membership[e.index()]
    }

    /// The label storage.
    #[must_use]
    pub fn prop(&self) -> &PropString {
        &self.prop
    }

    /// Constraints attached to the left side.
    #[must_use]
    pub fn constraints(&self) -> &[VertexAdjacency] {
        &self.constraints
    }

    /// Connected components of a side projection.
    #[must_use]
    pub fn side_components(&self, side: Side) -> &ComponentLabelling {
        match side {
            Side::Left => &self.left_components,
            Side::Right => &self.right_components,
        }
    }

    /// Whether a side has no vertices at all.
    #[must_use]
    pub fn side_is_empty(&self, side: Side) -> bool {
        self.side_components(side).num_components() == 0
    }

    /// The label a vertex carries in the given side.
    #[must_use]
    #[contracts::debug_requires(self.vertex_membership(v).in_side(side), "vertex must be a member of the side")]
    pub fn side_vertex_label(&self, side: Side, v: VertexId) -> &str {
        match side {
            Side::Left => &self.prop.vertex(v).left,
            Side::Right => &self.prop.vertex(v).right,
        }
    }

    /// The label an edge carries in the given side.
    #[must_use]
    #[contracts::debug_requires(self.edge_membership(e).in_side(side), "edge must be a member of the side")]
    pub fn side_edge_label(&self, side: Side, e: EdgeId) -> &str {
        match side {
            Side::Left => &self.prop.edge(e).left,
            Side::Right => &self.prop.edge(e).right,
        }
    }

    /// Every edge is a member only of sides both its endpoints are in.
    pub(crate) fn edges_inside_sides(&self) -> bool {
        self.graph.edges().all(|e| {
            let me = self.edge_membership[e.index()];
            [self.graph.source(e), self.graph.target(e)].into_iter().all(|v| {
                let mv = self.vertex_membership[v.index()];
                (!me.in_left() || mv.in_left()) && (!me.in_right() || mv.in_right())
            })
        })
    }
}

fn side_components_of(
    graph: &Graph,
    vertex_membership: &[Membership],
    edge_membership: &[Membership],
    side: Side,
) -> ComponentLabelling {
    connected_components(
        graph,
        |v| vertex_membership[v.index()].in_side(side),
        |e| edge_membership[e.index()].in_side(side),
    )
}

// #############################################################
// Builder
// #############################################################

/// Incremental construction of a [`Rule`].
///
/// Vertices are added with their membership and label pair; edges are
/// validated against their endpoints as they come in, so an edge can never
/// claim a side an endpoint is missing from.
#[derive(Debug, Default)]
pub struct RuleBuilder {
    graph: Graph,
    vertex_membership: Vec<Membership>,
    edge_membership: Vec<Membership>,
    prop: PropString,
    constraints: Vec<VertexAdjacency>,
}

impl RuleBuilder {
    /// An empty rule under construction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex with an explicit membership and label pair.
    pub fn add_vertex(&mut self, membership: Membership, left: impl Into<String>, right: impl Into<String>) -> VertexId {
        let v = self.graph.add_vertex();
        self.vertex_membership.push(membership);
        self.prop.add_vertex(LabelPair::new(left, right));
        v
    }

    /// Adds a vertex the rule deletes.
    pub fn add_left_vertex(&mut self, label: impl Into<String>) -> VertexId {
        self.add_vertex(Membership::Left, label, "")
    }

    /// Adds a vertex the rule preserves, possibly relabelling it.
    pub fn add_context_vertex(&mut self, left: impl Into<String>, right: impl Into<String>) -> VertexId {
        self.add_vertex(Membership::Context, left, right)
    }

    /// Adds a vertex the rule creates.
    pub fn add_right_vertex(&mut self, label: impl Into<String>) -> VertexId {
        self.add_vertex(Membership::Right, "", label)
    }

    /// Adds an edge, rejecting memberships its endpoints cannot support.
    #[contracts::debug_requires(
        source.index() < self.vertex_membership.len() && target.index() < self.vertex_membership.len(),
        "endpoints must already be added"
    )]
    pub fn add_edge(
        &mut self,
        source: VertexId,
        target: VertexId,
        membership: Membership,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Result<EdgeId, RuleBuildError> {
        for v in [source, target] {
            let mv = self.vertex_membership[v.index()];
            let compatible = (!membership.in_left() || mv.in_left()) && (!membership.in_right() || mv.in_right());
            if !compatible {
                return Err(RuleBuildError::EdgeOutsideSide {
                    source: source.index(),
                    target: target.index(),
                    membership,
                    vertex: v.index(),
                    vertex_membership: mv,
                });
            }
        }
        let e = self.graph.add_edge(source, target);
        self.edge_membership.push(membership);
        self.prop.add_edge(LabelPair::new(left, right));
        Ok(e)
    }

    /// Adds an edge the rule deletes.
    pub fn add_left_edge(&mut self, source: VertexId, target: VertexId, label: impl Into<String>) -> Result<EdgeId, RuleBuildError> {
        self.add_edge(source, target, Membership::Left, label, "")
    }

    /// Adds an edge the rule preserves, possibly relabelling it.
    pub fn add_context_edge(
        &mut self,
        source: VertexId,
        target: VertexId,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Result<EdgeId, RuleBuildError> {
        self.add_edge(source, target, Membership::Context, left, right)
    }

    /// Adds an edge the rule creates.
    pub fn add_right_edge(&mut self, source: VertexId, target: VertexId, label: impl Into<String>) -> Result<EdgeId, RuleBuildError> {
        self.add_edge(source, target, Membership::Right, "", label)
    }

    /// Attaches a left-side constraint; membership is checked by [`RuleBuilder::build`].
    #[contracts::debug_requires(constraint.vertex.index() < self.vertex_membership.len(), "constrained vertex must already be added")]
    pub fn add_constraint(&mut self, constraint: VertexAdjacency) {
        self.constraints.push(constraint);
    }

    /// Finishes the rule, computing the side components.
    pub fn build(self) -> Result<Rule, RuleBuildError> {
        for c in &self.constraints {
            let m = self.vertex_membership[c.vertex.index()];
            if !m.in_left() {
                return Err(RuleBuildError::ConstraintOutsideLeft {
                    vertex: c.vertex.index(),
                    membership: m,
                });
            }
        }
        Ok(Rule::from_parts(
            self.graph,
            self.vertex_membership,
            self.edge_membership,
            self.prop,
            self.constraints,
        ))
    }
}

// #############################################################
// Tests
// #############################################################

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::constraint::ConstraintOp;

    use super::*;

    #[test]
    fn side_components_follow_the_memberships() {
        let mut b = RuleBuilder::new();
        let a = b.add_left_vertex("a");
        let k = b.add_context_vertex("k", "k");
        let r = b.add_right_vertex("r");
        b.add_left_edge(a, k, "-").unwrap();
        b.add_right_edge(k, r, "-").unwrap();
        let rule = b.build().unwrap();

        let left = rule.side_components(Side::Left);
        assert_eq!(left.num_components(), 1);
        assert_eq!(left.members(0), [a, k]);
        assert_eq!(left.component_of(r), None);

        let right = rule.side_components(Side::Right);
        assert_eq!(right.num_components(), 1);
        assert_eq!(right.members(0), [k, r]);
        assert_eq!(right.component_of(a), None);
    }

    #[test]
    fn an_edge_cannot_leave_the_side_of_its_endpoints() {
        let mut b = RuleBuilder::new();
        let a = b.add_left_vertex("a");
        let r = b.add_right_vertex("r");
        let err = b.add_edge(a, r, Membership::Context, "-", "-").unwrap_err();
        assert!(matches!(err, RuleBuildError::EdgeOutsideSide { .. }));
    }

    #[test]
    fn constraints_must_sit_on_the_left_side() {
        let mut b = RuleBuilder::new();
        let r = b.add_right_vertex("r");
        b.add_constraint(VertexAdjacency::new(r, ConstraintOp::Eq, 0, BTreeSet::new(), BTreeSet::new()));
        let err = b.build().unwrap_err();
        assert!(matches!(err, RuleBuildError::ConstraintOutsideLeft { vertex: 0, .. }));
    }

    #[test]
    fn side_labels_project_the_pairs() {
        let mut b = RuleBuilder::new();
        let k = b.add_context_vertex("before", "after");
        let rule = b.build().unwrap();
        assert_eq!(rule.side_vertex_label(Side::Left, k), "before");
        assert_eq!(rule.side_vertex_label(Side::Right, k), "after");
    }
}
