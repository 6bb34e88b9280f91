use crate::graph::{EdgeId, GraphAccess, VertexId};

/// Connected-component labelling of a (possibly filtered) graph.
///
/// Vertices excluded by the filter carry no label. Component ids are dense
/// and assigned in order of the lowest vertex id they contain.
#[derive(Clone, Debug)]
pub struct ComponentLabelling {
    num_components: usize,
    label: Vec<Option<usize>>,
    members: Vec<Vec<VertexId>>,
}

impl ComponentLabelling {
    /// Number of components found.
    #[must_use]
    pub fn num_components(&self) -> usize {
        self.num_components
    }

    /// Component id of `v`, or `None` if `v` was filtered out.
    #[must_use]
    #[contracts::debug_requires(v.index() < self.label.len())]
    pub fn component_of(&self, v: VertexId) -> Option<usize> {
        self.label[v.index()]
    }

    /// Vertices of component `c`, in increasing id order.
    #[must_use]
    #[contracts::debug_requires(c < self.num_components)]
    pub fn members(&self, c: usize) -> &[VertexId] {
        &self.members[c]
    }
}

/// Labels the connected components of the subgraph induced by the filters.
///
/// An edge is traversed only when `edge_in` accepts it and both endpoints are
/// accepted by `vertex_in`; a filtered vertex never joins any component.
pub fn connected_components<G, VF, EF>(g: &G, vertex_in: VF, edge_in: EF) -> ComponentLabelling
where
    G: GraphAccess,
    VF: Fn(VertexId) -> bool,
    EF: Fn(EdgeId) -> bool,
{
    let n = g.num_vertices();
    let mut label: Vec<Option<usize>> = vec![None; n];
    let mut members: Vec<Vec<VertexId>> = Vec::new();
    let mut stack: Vec<VertexId> = Vec::new();

    for root_index in 0..n {
        let root = VertexId::new(root_index);
        if label[root_index].is_some() || !vertex_in(root) {
            continue;
        }
        let component = members.len();
        members.push(Vec::new());
        label[root_index] = Some(component);
        stack.push(root);
        while let Some(v) = stack.pop() {
            members[component].push(v);
            for &e in g.incident_edges(v) {
                if !edge_in(e) {
                    continue;
                }
                let w = g.opposite(e, v);
                if label[w.index()].is_some() || !vertex_in(w) {
                    continue;
                }
                label[w.index()] = Some(component);
                stack.push(w);
            }
        }
        members[component].sort_unstable();
    }

    ComponentLabelling {
        num_components: members.len(),
        label,
        members,
    }
}
