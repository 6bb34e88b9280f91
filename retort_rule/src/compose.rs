//! Pushout composition of two rules along a partial overlap.
//!
//! The overlap maps left-side vertices of the second rule onto right-side
//! vertices of the first. The first rule's elements are copied (or dropped)
//! into the result, then the second rule's elements are composed on top.
//! Any edge that would dangle on a deleted vertex, or duplicate inside one
//! side, aborts the composition.

use retort_graph::{EdgeId, Graph, GraphAccess, VertexId, first_edge_between};
use retort_subgraph::{InvertibleVertexMap, VectorVertexMap};
use tracing::debug;

use crate::membership::Membership;
use crate::prop::{LabelPair, PropString};
use crate::rule::Rule;

/// A composed rule plus the projections of both operands into it.
#[derive(Clone, Debug)]
pub struct Composition {
    /// The composed rule.
    pub rule: Rule,
    /// Where each vertex of the first rule went; `None` when deleted.
    pub first_to_result: VectorVertexMap,
    /// Where each vertex of the second rule went; `None` when deleted.
    pub second_to_result: VectorVertexMap,
}

/// The label pair an element carries in the result, given the membership it
/// gets there and the pair it had where it came from.
fn labels_for(membership: Membership, source: &LabelPair) -> LabelPair {
    match membership {
        Membership::Left => LabelPair::new(source.left.clone(), ""),
        Membership::Right => LabelPair::new("", source.right.clone()),
        Membership::Context => source.clone(),
    }
}

/// Composes `first` and `second` along `map`, which sends left-side
/// vertices of the second rule to right-side vertices of the first.
///
/// Returns `None` when the overlap admits no pushout.
#[contracts::debug_requires(
    map.dom_len() == second.num_vertices() && map.cod_len() == first.num_vertices(),
    "the match must span both combined graphs"
)]
pub(crate) fn compose(first: &Rule, second: &Rule, map: &InvertibleVertexMap) -> Option<Composition> {
    let mut composer = Composer {
        first,
        second,
        map,
        graph: Graph::new(),
        vertex_membership: Vec::new(),
        edge_membership: Vec::new(),
        prop: PropString::default(),
        first_to_result: VectorVertexMap::new(first.num_vertices()),
        second_to_result: VectorVertexMap::new(second.num_vertices()),
    };
    composer.copy_vertices_first();
    composer.compose_vertices_second();
    if !composer.copy_edges_first() {
        return None;
    }
    if !composer.compose_edges_second() {
        return None;
    }
    Some(composer.finish())
}

struct Composer<'a> {
    first: &'a Rule,
    second: &'a Rule,
    map: &'a InvertibleVertexMap,
    graph: Graph,
    vertex_membership: Vec<Membership>,
    edge_membership: Vec<Membership>,
    prop: PropString,
    first_to_result: VectorVertexMap,
    second_to_result: VectorVertexMap,
}

impl Composer<'_> {
    fn add_vertex(&mut self, membership: Membership, labels: LabelPair) -> VertexId {
        let v = self.graph.add_vertex();
        self.vertex_membership.push(membership);
        self.prop.add_vertex(labels);
        v
    }

    fn add_edge(&mut self, source: VertexId, target: VertexId, membership: Membership, labels: LabelPair) {
        self.graph.add_edge(source, target);
        self.edge_membership.push(membership);
        self.prop.add_edge(labels);
    }

    fn result_membership(&self, v: VertexId) -> Membership {
        self.vertex_membership[v.index()]
    }

    /// A vertex of the first rule vanishes from the result exactly when the
    /// first rule creates it and the matched vertex of the second deletes it.
    fn copy_vertices_first(&mut self) {
        for v1 in self.first.graph().vertices() {
            let m1 = self.first.vertex_membership(v1);
            let deleted = m1 == Membership::Right
                && self
                    .map
                    .get_inverse(v1)
                    .is_some_and(|v2| self.second.vertex_membership(v2) == Membership::Left);
            if deleted {
                debug!("vertex {} of the first rule is created and deleted again; dropping it", v1);
                continue;
            }
            let vr = self.add_vertex(m1, labels_for(m1, self.first.prop().vertex(v1)));
            self.first_to_result.put(v1, vr);
        }
    }

    fn compose_vertices_second(&mut self) {
        for v2 in self.second.graph().vertices() {
            let Some(v1) = self.map.get(v2) else {
                let m2 = self.second.vertex_membership(v2);
                let vr = self.add_vertex(m2, labels_for(m2, self.second.prop().vertex(v2)));
                self.second_to_result.put(v2, vr);
                continue;
            };
            let Some(vr) = self.first_to_result.get(v1) else {
                // created by the first rule and deleted by the second
                continue;
            };
            self.second_to_result.put(v2, vr);
            let m1 = self.result_membership(vr);
            let m2 = self.second.vertex_membership(v2);
            match (m1, m2) {
                (Membership::Right, Membership::Context) => {
                    // the vertex still appears; the second rule has the last
                    // word on what it appears as
                    self.prop.vertex_mut(vr).right = self.second.prop().vertex(v2).right.clone();
                }
                (Membership::Context, Membership::Left) => {
                    self.vertex_membership[vr.index()] = Membership::Left;
                }
                (Membership::Context, Membership::Context) => {
                    self.prop.vertex_mut(vr).right = self.second.prop().vertex(v2).right.clone();
                }
                (Membership::Left, _) | (_, Membership::Right) | (Membership::Right, Membership::Left) => {
                    unreachable!("the match joins left-side vertices of the second rule to right-side vertices of the first")
                }
            }
        }
    }

    /// First edge of the second rule between the two vertices that is not
    /// right-only, in incidence order.
    fn second_edge_outside_right(&self, src2: VertexId, tar2: VertexId) -> Option<EdgeId> {
        self.second
            .graph()
            .incident_edges(src2)
            .iter()
            .copied()
            .find(|&e2| {
                self.second.graph().opposite(e2, src2) == tar2 && self.second.edge_membership(e2) != Membership::Right
            })
    }

    fn copy_edge_from_first(&mut self, e1: EdgeId, membership: Membership) {
        let src = self.first.graph().source(e1);
        let tar = self.first.graph().target(e1);
        let sr = self.first_to_result.get(src).expect("endpoints are checked before an edge is copied");
        let tr = self.first_to_result.get(tar).expect("endpoints are checked before an edge is copied");
        let labels = labels_for(membership, self.first.prop().edge(e1));
        self.add_edge(sr, tr, membership, labels);
    }

    fn copy_edges_first(&mut self) -> bool {
        for e1 in self.first.graph().edges() {
            let me1 = self.first.edge_membership(e1);
            if me1 == Membership::Left {
                self.copy_edge_from_first(e1, me1);
                continue;
            }
            let src1 = self.first.graph().source(e1);
            let tar1 = self.first.graph().target(e1);
            let src2 = self.map.get_inverse(src1);
            let tar2 = self.map.get_inverse(tar1);
            match (src2, tar2) {
                (Some(src2), Some(tar2)) => {
                    if let Some(e2) = self.second_edge_outside_right(src2, tar2) {
                        if me1 == Membership::Right {
                            // the second rule's copy of the edge decides
                            continue;
                        }
                        // a preserved edge matched by the second rule takes
                        // that rule's membership and keeps the first's labels
                        let mr = self.second.edge_membership(e2);
                        let sr = self.first_to_result.get(src1).expect("context endpoints survive the first pass");
                        let tr = self.first_to_result.get(tar1).expect("context endpoints survive the first pass");
                        self.add_edge(sr, tr, mr, labels_for(mr, self.first.prop().edge(e1)));
                        debug_assert_ne!(self.result_membership(sr), Membership::Right);
                        debug_assert_ne!(self.result_membership(tr), Membership::Right);
                    } else {
                        for v1 in [src1, tar1] {
                            match self.first_to_result.get(v1) {
                                None => {
                                    debug!("edge {} of the first rule dangles on deleted vertex {}; no composition", e1, v1);
                                    return false;
                                }
                                Some(vr) if self.result_membership(vr) == Membership::Left => {
                                    debug!(
                                        "edge {} of the first rule dangles on vertex {} the composition deletes; no composition",
                                        e1, v1
                                    );
                                    return false;
                                }
                                Some(_) => {}
                            }
                        }
                        self.copy_edge_from_first(e1, me1);
                    }
                }
                (None, None) => self.copy_edge_from_first(e1, me1),
                _ => {
                    let matched = if src2.is_some() { src1 } else { tar1 };
                    match self.first_to_result.get(matched) {
                        None => {
                            debug!("edge {} of the first rule dangles on deleted vertex {}; no composition", e1, matched);
                            return false;
                        }
                        Some(vr) if self.result_membership(vr) == Membership::Left => {
                            debug!(
                                "edge {} of the first rule dangles on vertex {} the composition deletes; no composition",
                                e1, matched
                            );
                            return false;
                        }
                        Some(_) => self.copy_edge_from_first(e1, me1),
                    }
                }
            }
        }
        true
    }

    fn copy_edge_from_second(&mut self, e2: EdgeId, membership: Membership) {
        let src = self.second.graph().source(e2);
        let tar = self.second.graph().target(e2);
        let sr = self.second_to_result.get(src).expect("endpoints are checked before an edge is copied");
        let tr = self.second_to_result.get(tar).expect("endpoints are checked before an edge is copied");
        let labels = labels_for(membership, self.second.prop().edge(e2));
        self.add_edge(sr, tr, membership, labels);
    }

    /// The matched result vertex must exist and support every side the edge
    /// is in; `Context` supports everything.
    fn endpoint_supports(&self, e2: EdgeId, me2: Membership, v2: VertexId) -> bool {
        let Some(vr) = self.second_to_result.get(v2) else {
            debug!("edge {} of the second rule dangles on deleted vertex {}; no composition", e2, v2);
            return false;
        };
        let mr = self.result_membership(vr);
        if mr != Membership::Context && mr != me2 {
            debug!(
                "edge {} of the second rule meets vertex {} with membership {}; no composition",
                e2, v2, mr
            );
            return false;
        }
        true
    }

    fn compose_edges_second(&mut self) -> bool {
        for e2 in self.second.graph().edges() {
            let me2 = self.second.edge_membership(e2);
            let src2 = self.second.graph().source(e2);
            let tar2 = self.second.graph().target(e2);
            let src1 = self.map.get(src2);
            let tar1 = self.map.get(tar2);
            match (src1, tar1) {
                (None, None) => self.copy_edge_from_second(e2, me2),
                (Some(src1), Some(tar1)) => {
                    if !self.compose_edge_both_matched(e2, me2, src1, tar1, src2, tar2) {
                        return false;
                    }
                }
                _ => {
                    let matched2 = if src1.is_some() { src2 } else { tar2 };
                    if !self.endpoint_supports(e2, me2, matched2) {
                        return false;
                    }
                    self.copy_edge_from_second(e2, me2);
                }
            }
        }
        true
    }

    fn compose_edge_both_matched(
        &mut self,
        e2: EdgeId,
        me2: Membership,
        src1: VertexId,
        tar1: VertexId,
        src2: VertexId,
        tar2: VertexId,
    ) -> bool {
        let Some(e1) = first_edge_between(self.first.graph(), src1, tar1) else {
            // no counterpart between the images; plain copy onto endpoints
            // that support the edge's sides
            if !self.endpoint_supports(e2, me2, src2) || !self.endpoint_supports(e2, me2, tar2) {
                return false;
            }
            self.copy_edge_from_second(e2, me2);
            return true;
        };
        let me1 = self.first.edge_membership(e1);
        if me1 == Membership::Left && me2 != Membership::Right {
            debug!("edges {} and {} would duplicate in the left side; no composition", e1, e2);
            return false;
        }
        if me1 != Membership::Left && me2 == Membership::Right {
            debug!("edges {} and {} would duplicate in the right side; no composition", e1, e2);
            return false;
        }
        if me2 == Membership::Left {
            // either cancelled against an edge the first rule created, or
            // already placed as left by the first pass
            return true;
        }
        let sr = self.second_to_result.get(src2).expect("matched context endpoints survive both passes");
        let tr = self.second_to_result.get(tar2).expect("matched context endpoints survive both passes");
        if me1 == Membership::Right {
            // the first rule created the edge and the second keeps it, so
            // the composition creates it
            debug_assert_eq!(me2, Membership::Context);
            self.add_edge(sr, tr, Membership::Right, labels_for(Membership::Right, self.second.prop().edge(e2)));
            return true;
        }
        // the first pass already copied the parallel first edge; it becomes
        // context and takes its right label from the second rule
        let er = first_edge_between(&self.graph, sr, tr).expect("the first pass copied the parallel edge");
        self.edge_membership[er.index()] = Membership::Context;
        self.prop.edge_mut(er).right = self.second.prop().edge(e2).right.clone();
        true
    }

    fn finish(self) -> Composition {
        let mut constraints = Vec::new();
        for c in self.first.constraints() {
            let vr = self
                .first_to_result
                .get(c.vertex)
                .expect("constrained vertices sit in the left side and are never deleted");
            constraints.push(c.with_vertex(vr));
        }
        for c in self.second.constraints() {
            let Some(vr) = self.second_to_result.get(c.vertex) else {
                continue;
            };
            if self.result_membership(vr) == Membership::Right {
                continue;
            }
            if self.map.get(c.vertex).is_some() {
                // the overlap already pins this vertex down
                continue;
            }
            constraints.push(c.with_vertex(vr));
        }
        let Composer {
            graph,
            vertex_membership,
            edge_membership,
            prop,
            first_to_result,
            second_to_result,
            ..
        } = self;
        let rule = Rule::from_parts(graph, vertex_membership, edge_membership, prop, constraints);
        Composition {
            rule,
            first_to_result,
            second_to_result,
        }
    }
}

// #############################################################
// Tests
// #############################################################

#[cfg(test)]
mod tests {
    use crate::membership::Side;
    use crate::rule::RuleBuilder;

    use super::*;

    fn relabel(from: &str, to: &str) -> Rule {
        let mut b = RuleBuilder::new();
        b.add_context_vertex(from, to);
        b.build().unwrap()
    }

    fn identity_overlap(second: &Rule, first: &Rule) -> InvertibleVertexMap {
        let mut map = InvertibleVertexMap::new(second.num_vertices(), first.num_vertices());
        for v in second.graph().vertices() {
            map.put(v, v);
        }
        map
    }

    #[test]
    fn relabelling_chains_through_the_overlap() {
        let first = relabel("a", "b");
        let second = relabel("b", "c");
        let map = identity_overlap(&second, &first);
        let result = compose(&first, &second, &map).unwrap();

        let v = VertexId::new(0);
        assert_eq!(result.rule.num_vertices(), 1);
        assert_eq!(result.rule.vertex_membership(v), Membership::Context);
        assert_eq!(result.rule.side_vertex_label(Side::Left, v), "a");
        assert_eq!(result.rule.side_vertex_label(Side::Right, v), "c");
        assert_eq!(result.first_to_result.get(v), Some(v));
        assert_eq!(result.second_to_result.get(v), Some(v));
    }

    #[test]
    fn a_created_then_deleted_edge_cancels() {
        let mut b = RuleBuilder::new();
        let u = b.add_context_vertex("u", "u");
        let w = b.add_context_vertex("w", "w");
        b.add_right_edge(u, w, "x").unwrap();
        let first = b.build().unwrap();

        let mut b = RuleBuilder::new();
        let u = b.add_context_vertex("u", "u");
        let w = b.add_context_vertex("w", "w");
        b.add_left_edge(u, w, "x").unwrap();
        let second = b.build().unwrap();

        let map = identity_overlap(&second, &first);
        let result = compose(&first, &second, &map).unwrap();
        assert_eq!(result.rule.num_vertices(), 2);
        assert_eq!(result.rule.num_edges(), 0);
    }

    #[test]
    fn a_created_then_deleted_vertex_vanishes() {
        let mut b = RuleBuilder::new();
        b.add_right_vertex("v");
        let first = b.build().unwrap();

        let mut b = RuleBuilder::new();
        b.add_left_vertex("v");
        let second = b.build().unwrap();

        let map = identity_overlap(&second, &first);
        let result = compose(&first, &second, &map).unwrap();
        assert_eq!(result.rule.num_vertices(), 0);
        assert_eq!(result.first_to_result.get(VertexId::new(0)), None);
        assert_eq!(result.second_to_result.get(VertexId::new(0)), None);
    }

    #[test]
    fn a_dangling_created_edge_blocks_the_composition() {
        let mut b = RuleBuilder::new();
        let k = b.add_context_vertex("k", "k");
        let v = b.add_right_vertex("v");
        b.add_right_edge(k, v, "x").unwrap();
        let first = b.build().unwrap();

        let mut b = RuleBuilder::new();
        b.add_left_vertex("v");
        let second = b.build().unwrap();

        let mut map = InvertibleVertexMap::new(second.num_vertices(), first.num_vertices());
        map.put(VertexId::new(0), v);
        assert!(compose(&first, &second, &map).is_none());
    }

    #[test]
    fn deleted_and_recreated_edges_stack_into_context() {
        let mut b = RuleBuilder::new();
        let u = b.add_context_vertex("u", "u");
        let w = b.add_context_vertex("w", "w");
        b.add_left_edge(u, w, "x").unwrap();
        let first = b.build().unwrap();

        let mut b = RuleBuilder::new();
        let u = b.add_context_vertex("u", "u");
        let w = b.add_context_vertex("w", "w");
        b.add_right_edge(u, w, "y").unwrap();
        let second = b.build().unwrap();

        let map = identity_overlap(&second, &first);
        let result = compose(&first, &second, &map).unwrap();
        assert_eq!(result.rule.num_edges(), 1);
        let e = result.rule.graph().edges().next().unwrap();
        assert_eq!(result.rule.edge_membership(e), Membership::Context);
        assert_eq!(result.rule.side_edge_label(Side::Left, e), "x");
        assert_eq!(result.rule.side_edge_label(Side::Right, e), "y");
    }
}
