//! Side components materialized for component-wise match making.

use std::collections::HashMap;

use retort_graph::{Graph, GraphAccess, VertexId};
use retort_subgraph::{Config, SizedMap, common_subgraphs};

use crate::constraint::VertexAdjacency;
use crate::membership::Side;
use crate::rule::Rule;

/// One connected component of a side projection, as its own graph.
///
/// Vertices are renumbered locally; `to_combined` links them back to the
/// combined graph of the rule they came from. Labels are projected to the
/// extracted side.
#[derive(Clone, Debug)]
pub(crate) struct ComponentGraph {
    pub(crate) graph: Graph,
    pub(crate) to_combined: Vec<VertexId>,
    pub(crate) vertex_labels: Vec<String>,
    pub(crate) edge_labels: Vec<String>,
    from_combined: HashMap<VertexId, VertexId>,
}

impl ComponentGraph {
    /// The local id of a combined vertex, if it lies in this component.
    pub(crate) fn local_of(&self, combined: VertexId) -> Option<VertexId> {
        self.from_combined.get(&combined).copied()
    }
}

/// Extracts every connected component of one side of a rule.
///
/// Components come out in the order of the rule's side labelling, vertices
/// in ascending combined id, edges in ascending combined edge id.
pub(crate) fn extract_components(rule: &Rule, side: Side) -> Vec<ComponentGraph> {
    let labelling = rule.side_components(side);
    (0..labelling.num_components())
        .map(|c| {
            let members = labelling.members(c);
            let mut graph = Graph::new();
            let mut to_combined = Vec::with_capacity(members.len());
            let mut from_combined = HashMap::with_capacity(members.len());
            let mut vertex_labels = Vec::with_capacity(members.len());
            for &v in members {
                let local = graph.add_vertex();
                to_combined.push(v);
                from_combined.insert(v, local);
                vertex_labels.push(rule.side_vertex_label(side, v).to_string());
            }
            let mut edge_labels = Vec::new();
            for e in rule.graph().edges() {
                if !rule.edge_membership(e).in_side(side) {
                    continue;
                }
                let src = rule.graph().source(e);
                let tar = rule.graph().target(e);
                let (Some(&ls), Some(&lt)) = (from_combined.get(&src), from_combined.get(&tar)) else {
                    continue;
                };
                graph.add_edge(ls, lt);
                edge_labels.push(rule.side_edge_label(side, e).to_string());
            }
            ComponentGraph {
                graph,
                to_combined,
                vertex_labels,
                edge_labels,
                from_combined,
            }
        })
        .collect()
}

/// One total morphism from a pattern component into a host component,
/// recorded as `(pattern, host)` pairs in combined graph coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ComponentMatch {
    pub(crate) pairs: Vec<(VertexId, VertexId)>,
}

/// Enumerates every label-preserving monomorphism of `pattern` into `host`.
///
/// Only total matches covering the whole pattern component are kept. With
/// `enforce` set, adjacency constraints anchored in the pattern component
/// must hold under the morphism.
pub(crate) fn component_morphisms(
    pattern: &ComponentGraph,
    host: &ComponentGraph,
    constraints: &[VertexAdjacency],
    enforce: bool,
) -> Vec<ComponentMatch> {
    let target = pattern.graph.num_vertices();
    let mut out = Vec::new();
    common_subgraphs(
        &pattern.graph,
        &host.graph,
        |v, w| pattern.vertex_labels[v.index()] == host.vertex_labels[w.index()],
        |e, f| pattern.edge_labels[e.index()] == host.edge_labels[f.index()],
        Config::default(),
        |m| {
            if m.size() == target && (!enforce || constraints_hold(pattern, host, constraints, m)) {
                let pairs = m
                    .iter()
                    .map(|(v, w)| (pattern.to_combined[v.index()], host.to_combined[w.index()]))
                    .collect();
                out.push(ComponentMatch { pairs });
            }
            true
        },
    );
    out
}

fn constraints_hold(
    pattern: &ComponentGraph,
    host: &ComponentGraph,
    constraints: &[VertexAdjacency],
    m: SizedMap<'_>,
) -> bool {
    constraints.iter().all(|c| {
        let Some(local) = pattern.local_of(c.vertex) else {
            return true;
        };
        let Some(image) = m.get(local) else {
            return true;
        };
        let observed = host
            .graph
            .incident_edges(image)
            .iter()
            .filter(|&&e| {
                if !c.edge_labels.is_empty() && !c.edge_labels.contains(&host.edge_labels[e.index()]) {
                    return false;
                }
                let far = host.graph.opposite(e, image);
                c.vertex_labels.is_empty() || c.vertex_labels.contains(&host.vertex_labels[far.index()])
            })
            .count();
        c.op.holds(observed, c.count)
    })
}

// #############################################################
// Tests
// #############################################################
