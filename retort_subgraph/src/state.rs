//! Backtracking state for injective morphism enumeration.
//!
//! The state is a stack of matched `(domain, codomain)` pairs mirrored into
//! an [`InvertibleVertexMap`] for O(1) lookup both ways. The stack is split
//! into three contiguous regions, pushed in this order:
//!
//! 1. unchecked forced pairs, seeded past every predicate,
//! 2. checked pre-matches, seeded through the normal acceptance path,
//! 3. dynamic pairs owned by the enumeration itself.
//!
//! Each region has its own push/pop operations and may only grow or shrink
//! while the regions above it are empty; violations are programming errors
//! and fail fast.

use retort_graph::VertexId;

use crate::map::{InvertibleVertexMap, SizedMap};

/// Read-only view of the state handed to [`ExtensionHook::accept`].
#[derive(Clone, Copy)]
pub struct StateView<'a, GDom, GCodom> {
    /// Domain graph.
    pub dom: &'a GDom,
    /// Codomain graph.
    pub cod: &'a GCodom,
    stack: &'a [(VertexId, VertexId)],
    map: &'a InvertibleVertexMap,
}

impl<'a, GDom, GCodom> StateView<'a, GDom, GCodom> {
    /// Currently matched pairs in push order.
    pub fn pairs(&self) -> impl Iterator<Item = (VertexId, VertexId)> + 'a {
        self.stack.iter().copied()
    }

    /// Number of matched pairs.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.stack.len()
    }

    /// Image of domain vertex `v`.
    #[must_use]
    pub fn cod_from_dom(&self, v: VertexId) -> Option<VertexId> {
        self.map.get(v)
    }

    /// Preimage of codomain vertex `w`.
    #[must_use]
    pub fn dom_from_cod(&self, w: VertexId) -> Option<VertexId> {
        self.map.get_inverse(w)
    }
}

/// Decides whether a candidate pair may extend the current match.
///
/// Consulted by [`InjectiveEnumerationState::try_push`] after the vertex
/// predicate has passed, with both candidate vertices still unmatched. The
/// hook must not retain the view.
pub trait ExtensionHook<GDom, GCodom> {
    /// `true` to accept `(v_dom, v_cod)` on top of the pairs in `view`.
    fn accept(
        &mut self,
        view: StateView<'_, GDom, GCodom>,
        v_dom: VertexId,
        v_cod: VertexId,
    ) -> bool;
}

/// Unconditional acceptance, for plain injective enumeration.
impl<GDom, GCodom> ExtensionHook<GDom, GCodom> for () {
    fn accept(&mut self, _: StateView<'_, GDom, GCodom>, _: VertexId, _: VertexId) -> bool {
        true
    }
}

/// The backtracking engine state.
///
/// Generic over the two graphs, the vertex predicate, and the extension
/// hook supplied at construction. All operations are O(1) apart from
/// whatever the predicate and hook do.
pub struct InjectiveEnumerationState<'g, GDom, GCodom, VP, X> {
    dom: &'g GDom,
    cod: &'g GCodom,
    vertex_pred: VP,
    hook: X,
    map: InvertibleVertexMap,
    stack: Vec<(VertexId, VertexId)>,
    unchecked_end: usize,
    checked_end: usize,
}

impl<'g, GDom, GCodom, VP, X> InjectiveEnumerationState<'g, GDom, GCodom, VP, X>
where
    VP: FnMut(VertexId, VertexId) -> bool,
    X: ExtensionHook<GDom, GCodom>,
{
    /// Fresh state with empty regions over domains of the given sizes.
    #[must_use]
    pub fn new(
        dom: &'g GDom,
        cod: &'g GCodom,
        dom_len: usize,
        cod_len: usize,
        vertex_pred: VP,
        hook: X,
    ) -> Self {
        InjectiveEnumerationState {
            dom,
            cod,
            vertex_pred,
            hook,
            map: InvertibleVertexMap::new(dom_len, cod_len),
            stack: Vec::new(),
            unchecked_end: 0,
            checked_end: 0,
        }
    }

    /// Domain graph.
    #[must_use]
    pub fn dom(&self) -> &'g GDom {
        self.dom
    }

    /// Codomain graph.
    #[must_use]
    pub fn cod(&self) -> &'g GCodom {
        self.cod
    }

    /// Size of the unchecked forced region.
    #[must_use]
    pub fn pre_forced_len(&self) -> usize {
        self.unchecked_end
    }

    /// Size of the forced and checked regions together.
    #[must_use]
    pub fn pre_len(&self) -> usize {
        self.checked_end
    }

    /// Total number of matched pairs across all regions.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.stack.len()
    }

    /// Image of domain vertex `v`.
    #[must_use]
    pub fn cod_from_dom(&self, v: VertexId) -> Option<VertexId> {
        self.map.get(v)
    }

    /// Preimage of codomain vertex `w`.
    #[must_use]
    pub fn dom_from_cod(&self, w: VertexId) -> Option<VertexId> {
        self.map.get_inverse(w)
    }

    /// The current match as a sized map view.
    #[must_use]
    pub fn match_view(&self) -> SizedMap<'_> {
        SizedMap::new(&self.map, self.stack.len())
    }

    /// Tries to extend the dynamic region with `(v_dom, v_cod)`.
    ///
    /// Runs the vertex predicate, then the extension hook; a refusal by
    /// either leaves the state untouched. Both vertices must be unmatched.
    #[contracts::debug_requires(self.cod_from_dom(v_dom).is_none(), "domain vertex is already matched")]
    #[contracts::debug_requires(self.dom_from_cod(v_cod).is_none(), "codomain vertex is already matched")]
    #[contracts::debug_ensures(self.regions_ordered())]
    pub fn try_push(&mut self, v_dom: VertexId, v_cod: VertexId) -> bool {
        if !(self.vertex_pred)(v_dom, v_cod) {
            return false;
        }
        let view = StateView {
            dom: self.dom,
            cod: self.cod,
            stack: &self.stack,
            map: &self.map,
        };
        if !self.hook.accept(view, v_dom, v_cod) {
            return false;
        }
        self.push_pair(v_dom, v_cod);
        true
    }

    /// Pops the top pair of the dynamic region.
    #[contracts::debug_requires(self.total_len() > self.pre_len(), "dynamic region is empty")]
    #[contracts::debug_ensures(self.regions_ordered())]
    pub fn pop(&mut self) -> (VertexId, VertexId) {
        self.pop_pair()
    }

    /// Seeds a checked pre-match through the normal acceptance path.
    ///
    /// Only valid while the dynamic region is empty.
    #[contracts::debug_requires(self.total_len() == self.pre_len(), "dynamic region must be empty")]
    #[contracts::debug_ensures(self.regions_ordered())]
    pub fn pre_try_push(&mut self, v_dom: VertexId, v_cod: VertexId) -> bool {
        let res = self.try_push(v_dom, v_cod);
        if res {
            self.checked_end += 1;
        }
        res
    }

    /// Pops the top pair of the checked region.
    ///
    /// Only valid while the dynamic region is empty.
    #[contracts::debug_requires(self.total_len() == self.pre_len(), "dynamic region must be empty")]
    #[contracts::debug_requires(self.pre_len() > self.pre_forced_len(), "checked region is empty")]
    #[contracts::debug_ensures(self.regions_ordered())]
    pub fn pre_pop(&mut self) -> (VertexId, VertexId) {
        self.checked_end -= 1;
        self.pop_pair()
    }

    /// Seeds a forced pair, bypassing the predicate and the hook.
    ///
    /// Only valid while the checked and dynamic regions are empty. Both
    /// vertices must still be unmatched.
    #[contracts::debug_requires(
        self.pre_forced_len() == self.pre_len() && self.pre_len() == self.total_len(),
        "checked and dynamic regions must be empty"
    )]
    #[contracts::debug_ensures(self.regions_ordered())]
    pub fn pre_force_push(&mut self, v_dom: VertexId, v_cod: VertexId) {
        self.push_pair(v_dom, v_cod);
        self.checked_end += 1;
        self.unchecked_end += 1;
    }

    /// Pops the top forced pair.
    ///
    /// Only valid while the checked and dynamic regions are empty.
    #[contracts::debug_requires(
        self.pre_forced_len() == self.pre_len() && self.pre_len() == self.total_len(),
        "checked and dynamic regions must be empty"
    )]
    #[contracts::debug_requires(self.total_len() > 0, "forced region is empty")]
    #[contracts::debug_ensures(self.regions_ordered())]
    pub fn pre_force_pop(&mut self) -> (VertexId, VertexId) {
        self.checked_end -= 1;
        self.unchecked_end -= 1;
        self.pop_pair()
    }

    #[contracts::debug_requires(
        self.map.get(v_dom).is_none() && self.map.get_inverse(v_cod).is_none(),
        "both vertices must be unmatched"
    )]
    fn push_pair(&mut self, v_dom: VertexId, v_cod: VertexId) {
        self.map.put(v_dom, v_cod);
        self.stack.push((v_dom, v_cod));
    }

    fn pop_pair(&mut self) -> (VertexId, VertexId) {
        let (v_dom, v_cod) = self
            .stack
            .pop()
            .expect("region preconditions keep the stack non-empty under every pop");
        self.map.remove(v_dom, v_cod);
        (v_dom, v_cod)
    }

    fn regions_ordered(&self) -> bool {
        self.unchecked_end <= self.checked_end && self.checked_end <= self.stack.len()
    }
}
