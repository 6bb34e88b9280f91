//! Common-subgraph enumeration between two graphs.
//!
//! A match is an injective partial vertex map under which corresponding
//! edges agree. The enumeration is depth-first: the callback fires after
//! every accepted pair, before recursing, so a match of size `k` is reported
//! before any of its extensions. Returning `false` from the callback
//! unwinds the whole search, popping every dynamic pair on the way out.

use retort_graph::{EdgeId, GraphAccess, VertexId, first_edge_between};
use tracing::trace;

use crate::collect::{Maximum, Unique};
use crate::config::Config;
use crate::map::SizedMap;
use crate::state::{ExtensionHook, InjectiveEnumerationState, StateView};

/// Edge-consistency acceptance for common-subgraph matches.
///
/// A candidate pair must agree with every matched pair: whenever an edge
/// exists on both sides it must satisfy the edge predicate. An edge on one
/// side only is fine, matches are not induced. With parallel edges the
/// first one found on each side is the one compared.
struct EdgeConsistency<EP> {
    edge_pred: EP,
    only_connected: bool,
}

impl<GDom, GCodom, EP> ExtensionHook<GDom, GCodom> for EdgeConsistency<EP>
where
    GDom: GraphAccess,
    GCodom: GraphAccess,
    EP: FnMut(EdgeId, EdgeId) -> bool,
{
    fn accept(
        &mut self,
        view: StateView<'_, GDom, GCodom>,
        v_dom: VertexId,
        v_cod: VertexId,
    ) -> bool {
        if view.total_len() == 0 {
            return true;
        }
        let directed = view.dom.is_directed() || view.cod.is_directed();
        let mut has_edge = false;
        for (u_dom, u_cod) in view.pairs() {
            let e_dom = first_edge_between(view.dom, u_dom, v_dom);
            let e_cod = first_edge_between(view.cod, u_cod, v_cod);
            if let (Some(e_dom), Some(e_cod)) = (e_dom, e_cod) {
                if !(self.edge_pred)(e_dom, e_cod) {
                    return false;
                }
                has_edge = true;
            }
            if directed {
                let e_dom = first_edge_between(view.dom, v_dom, u_dom);
                let e_cod = first_edge_between(view.cod, v_cod, u_cod);
                if let (Some(e_dom), Some(e_cod)) = (e_dom, e_cod) {
                    if !(self.edge_pred)(e_dom, e_cod) {
                        return false;
                    }
                    has_edge = true;
                }
            }
        }
        !self.only_connected || has_edge
    }
}

/// Depth-first enumerator of common subgraphs.
///
/// Seed pairs may be installed through the `pre_*` operations before
/// [`CommonSubgraphEnumerator::run`]; the enumeration then only grows the
/// dynamic region on top of them and leaves them in place afterwards.
pub struct CommonSubgraphEnumerator<'g, GDom, GCodom, VP, EP> {
    state: InjectiveEnumerationState<'g, GDom, GCodom, VP, EdgeConsistency<EP>>,
    only_connected: bool,
}

impl<'g, GDom, GCodom, VP, EP> CommonSubgraphEnumerator<'g, GDom, GCodom, VP, EP>
where
    GDom: GraphAccess,
    GCodom: GraphAccess,
    VP: FnMut(VertexId, VertexId) -> bool,
    EP: FnMut(EdgeId, EdgeId) -> bool,
{
    /// Fresh enumerator over `dom` and `cod`.
    #[must_use]
    pub fn new(dom: &'g GDom, cod: &'g GCodom, vertex_pred: VP, edge_pred: EP, config: Config) -> Self {
        let hook = EdgeConsistency {
            edge_pred,
            only_connected: config.only_connected,
        };
        let state = InjectiveEnumerationState::new(
            dom,
            cod,
            dom.num_vertices(),
            cod.num_vertices(),
            vertex_pred,
            hook,
        );
        CommonSubgraphEnumerator {
            state,
            only_connected: config.only_connected,
        }
    }

    /// See [`InjectiveEnumerationState::pre_try_push`].
    pub fn pre_try_push(&mut self, v_dom: VertexId, v_cod: VertexId) -> bool {
        self.state.pre_try_push(v_dom, v_cod)
    }

    /// See [`InjectiveEnumerationState::pre_pop`].
    pub fn pre_pop(&mut self) -> (VertexId, VertexId) {
        self.state.pre_pop()
    }

    /// See [`InjectiveEnumerationState::pre_force_push`].
    pub fn pre_force_push(&mut self, v_dom: VertexId, v_cod: VertexId) {
        self.state.pre_force_push(v_dom, v_cod);
    }

    /// See [`InjectiveEnumerationState::pre_force_pop`].
    pub fn pre_force_pop(&mut self) -> (VertexId, VertexId) {
        self.state.pre_force_pop()
    }

    /// Size of the forced seed region.
    #[must_use]
    pub fn pre_forced_len(&self) -> usize {
        self.state.pre_forced_len()
    }

    /// Size of both seed regions together.
    #[must_use]
    pub fn pre_len(&self) -> usize {
        self.state.pre_len()
    }

    /// Total number of matched pairs.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.state.total_len()
    }

    /// Image of domain vertex `v`.
    #[must_use]
    pub fn cod_from_dom(&self, v: VertexId) -> Option<VertexId> {
        self.state.cod_from_dom(v)
    }

    /// Preimage of codomain vertex `w`.
    #[must_use]
    pub fn dom_from_cod(&self, w: VertexId) -> Option<VertexId> {
        self.state.dom_from_cod(w)
    }

    /// The current match as a sized map view.
    #[must_use]
    pub fn match_view(&self) -> SizedMap<'_> {
        self.state.match_view()
    }

    /// Runs the enumeration on top of any seeded pairs.
    ///
    /// Returns `false` when the callback aborted the search. Either way the
    /// dynamic region is empty again afterwards, so the enumerator can be
    /// reseeded and rerun.
    pub fn run<F>(&mut self, mut callback: F) -> bool
    where
        F: FnMut(SizedMap<'_>) -> bool,
    {
        self.extend(0, &mut callback)
    }

    fn extend<F>(&mut self, first_dom: usize, callback: &mut F) -> bool
    where
        F: FnMut(SizedMap<'_>) -> bool,
    {
        let num_dom = self.state.dom().num_vertices();
        let num_cod = self.state.cod().num_vertices();
        for i in first_dom..num_dom {
            let v_dom = VertexId::new(i);
            if self.state.cod_from_dom(v_dom).is_some() {
                continue;
            }
            for j in 0..num_cod {
                let v_cod = VertexId::new(j);
                if self.state.dom_from_cod(v_cod).is_some() {
                    continue;
                }
                if !self.state.try_push(v_dom, v_cod) {
                    continue;
                }
                trace!(
                    "extend {} -> {} (size {})",
                    v_dom,
                    v_cod,
                    self.state.total_len()
                );
                if !callback(self.state.match_view()) {
                    self.state.pop();
                    return false;
                }
                // Connected growth may reach lower-numbered vertices, so the
                // scan restarts; otherwise it resumes past the current one
                // and each match comes out exactly once.
                let next = if self.only_connected { 0 } else { i + 1 };
                if !self.extend(next, callback) {
                    self.state.pop();
                    return false;
                }
                let popped = self.state.pop();
                debug_assert_eq!(popped, (v_dom, v_cod));
            }
        }
        true
    }
}

/// Enumerates every common subgraph of `dom` and `cod`.
///
/// Returns `false` when the callback aborted the enumeration.
pub fn common_subgraphs<GDom, GCodom, VP, EP, F>(
    dom: &GDom,
    cod: &GCodom,
    vertex_pred: VP,
    edge_pred: EP,
    config: Config,
    callback: F,
) -> bool
where
    GDom: GraphAccess,
    GCodom: GraphAccess,
    VP: FnMut(VertexId, VertexId) -> bool,
    EP: FnMut(EdgeId, EdgeId) -> bool,
    F: FnMut(SizedMap<'_>) -> bool,
{
    CommonSubgraphEnumerator::new(dom, cod, vertex_pred, edge_pred, config).run(callback)
}

/// Like [`common_subgraphs`], with duplicate matches suppressed.
pub fn common_subgraphs_unique<GDom, GCodom, VP, EP, F>(
    dom: &GDom,
    cod: &GCodom,
    vertex_pred: VP,
    edge_pred: EP,
    config: Config,
    mut callback: F,
) -> bool
where
    GDom: GraphAccess,
    GCodom: GraphAccess,
    VP: FnMut(VertexId, VertexId) -> bool,
    EP: FnMut(EdgeId, EdgeId) -> bool,
    F: FnMut(SizedMap<'_>) -> bool,
{
    let mut seen = Unique::new();
    CommonSubgraphEnumerator::new(dom, cod, vertex_pred, edge_pred, config).run(|m| {
        if seen.insert(&m) { callback(m) } else { true }
    })
}

/// Reports only the maximum-cardinality common subgraphs.
///
/// Matches are cached during the search and delivered afterwards, so the
/// callback only ever sees matches of the final maximum size. Returns
/// `false` when the callback cut the delivery short.
pub fn common_subgraphs_maximum<GDom, GCodom, VP, EP, F>(
    dom: &GDom,
    cod: &GCodom,
    vertex_pred: VP,
    edge_pred: EP,
    config: Config,
    callback: F,
) -> bool
where
    GDom: GraphAccess,
    GCodom: GraphAccess,
    VP: FnMut(VertexId, VertexId) -> bool,
    EP: FnMut(EdgeId, EdgeId) -> bool,
    F: FnMut(SizedMap<'_>) -> bool,
{
    let mut cache = Maximum::new();
    CommonSubgraphEnumerator::new(dom, cod, vertex_pred, edge_pred, config).run(|m| cache.observe(m));
    cache.flush(callback)
}

/// Like [`common_subgraphs_maximum`], with duplicates suppressed.
pub fn common_subgraphs_maximum_unique<GDom, GCodom, VP, EP, F>(
    dom: &GDom,
    cod: &GCodom,
    vertex_pred: VP,
    edge_pred: EP,
    config: Config,
    callback: F,
) -> bool
where
    GDom: GraphAccess,
    GCodom: GraphAccess,
    VP: FnMut(VertexId, VertexId) -> bool,
    EP: FnMut(EdgeId, EdgeId) -> bool,
    F: FnMut(SizedMap<'_>) -> bool,
{
    let mut cache = Maximum::new_unique();
    CommonSubgraphEnumerator::new(dom, cod, vertex_pred, edge_pred, config).run(|m| cache.observe(m));
    cache.flush(callback)
}
