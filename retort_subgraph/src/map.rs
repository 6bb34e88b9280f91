//! Dense partial vertex maps.

use retort_graph::VertexId;

/// Partial map from dense domain indices to codomain vertices.
///
/// Backed by one slot per domain vertex; `None` is the unmapped sentinel.
/// Lookups and updates are O(1).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorVertexMap {
    slots: Vec<Option<VertexId>>,
}

impl VectorVertexMap {
    /// An empty map over a domain of `len` vertices.
    #[must_use]
    pub fn new(len: usize) -> Self {
        VectorVertexMap {
            slots: vec![None; len],
        }
    }

    /// Domain size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the domain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Image of `v`, or `None` when unmapped.
    #[must_use]
    #[contracts::debug_requires(v.index() < self.len())]
    pub fn get(&self, v: VertexId) -> Option<VertexId> {
        self.slots[v.index()]
    }

    /// Maps `v` to `w`. `v` must be unmapped.
    #[contracts::debug_requires(v.index() < self.len())]
    #[contracts::debug_requires(self.get(v).is_none(), "vertex is already mapped")]
    pub fn put(&mut self, v: VertexId, w: VertexId) {
        self.slots[v.index()] = Some(w);
    }

    /// Unmaps `v`. `v` must currently map to `w`.
    #[contracts::debug_requires(v.index() < self.len())]
    #[contracts::debug_requires(self.get(v) == Some(w), "vertex is not mapped to that image")]
    pub fn remove(&mut self, v: VertexId, w: VertexId) {
        let _ = w;
        self.slots[v.index()] = None;
    }

    /// `(domain, image)` pairs for every mapped vertex, in domain order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|w| (VertexId::new(i), w)))
    }

    /// Images in domain order, unmapped slots as `None`.
    pub(crate) fn slots(&self) -> &[Option<VertexId>] {
        &self.slots
    }
}

/// Injective partial vertex map with O(1) lookup in both directions.
///
/// The forward and inverse arrays are kept consistent by construction:
/// every `put` writes both, every `remove` clears both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvertibleVertexMap {
    forward: VectorVertexMap,
    inverse: VectorVertexMap,
}

impl InvertibleVertexMap {
    /// An empty map between a domain of `dom_len` and a codomain of
    /// `cod_len` vertices.
    #[must_use]
    pub fn new(dom_len: usize, cod_len: usize) -> Self {
        InvertibleVertexMap {
            forward: VectorVertexMap::new(dom_len),
            inverse: VectorVertexMap::new(cod_len),
        }
    }

    /// Domain size.
    #[must_use]
    pub fn dom_len(&self) -> usize {
        self.forward.len()
    }

    /// Codomain size.
    #[must_use]
    pub fn cod_len(&self) -> usize {
        self.inverse.len()
    }

    /// Image of domain vertex `v`, or `None` when unmapped.
    #[must_use]
    pub fn get(&self, v: VertexId) -> Option<VertexId> {
        self.forward.get(v)
    }

    /// Preimage of codomain vertex `w`, or `None` when unclaimed.
    #[must_use]
    pub fn get_inverse(&self, w: VertexId) -> Option<VertexId> {
        self.inverse.get(w)
    }

    /// Adds the pair `(v, w)`. Both sides must be free, so the map stays
    /// injective at all times.
    #[contracts::debug_requires(self.get(v).is_none(), "domain vertex is already mapped")]
    #[contracts::debug_requires(self.get_inverse(w).is_none(), "codomain vertex is already claimed")]
    pub fn put(&mut self, v: VertexId, w: VertexId) {
        self.forward.put(v, w);
        self.inverse.put(w, v);
    }

    /// Removes the pair `(v, w)`, which must be present.
    #[contracts::debug_requires(self.get(v) == Some(w), "pair is not in the map")]
    pub fn remove(&mut self, v: VertexId, w: VertexId) {
        self.forward.remove(v, w);
        self.inverse.remove(w, v);
    }

    /// The forward direction as a plain map view.
    #[must_use]
    pub fn forward(&self) -> &VectorVertexMap {
        &self.forward
    }

    /// `(domain, image)` pairs in domain order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.forward.iter()
    }
}

/// Borrowed view of a match: the map plus the number of matched pairs.
///
/// Handed to enumeration callbacks; [`SizedMap::snapshot`] detaches an owned
/// copy when the match must outlive the search.
#[derive(Clone, Copy, Debug)]
pub struct SizedMap<'a> {
    map: &'a InvertibleVertexMap,
    size: usize,
}

impl<'a> SizedMap<'a> {
    pub(crate) fn new(map: &'a InvertibleVertexMap, size: usize) -> Self {
        SizedMap { map, size }
    }

    /// Number of matched pairs.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Image of domain vertex `v`.
    #[must_use]
    pub fn get(&self, v: VertexId) -> Option<VertexId> {
        self.map.get(v)
    }

    /// Preimage of codomain vertex `w`.
    #[must_use]
    pub fn get_inverse(&self, w: VertexId) -> Option<VertexId> {
        self.map.get_inverse(w)
    }

    /// `(domain, image)` pairs in domain order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, VertexId)> + 'a {
        self.map.iter()
    }

    /// Owned copy of the underlying map together with its size.
    #[must_use]
    pub fn snapshot(&self) -> (InvertibleVertexMap, usize) {
        (self.map.clone(), self.size)
    }

    /// Forward images in domain order, usable as a dedup key.
    pub(crate) fn forward_slots(&self) -> &'a [Option<VertexId>] {
        self.map.forward.slots()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    #[test]
    fn put_and_remove_stay_consistent() {
        let mut m = InvertibleVertexMap::new(3, 4);
        m.put(v(0), v(2));
        m.put(v(2), v(0));
        assert_eq!(m.get(v(0)), Some(v(2)));
        assert_eq!(m.get_inverse(v(2)), Some(v(0)));
        assert_eq!(m.get(v(1)), None);
        assert_eq!(m.iter().collect::<Vec<_>>(), vec![(v(0), v(2)), (v(2), v(0))]);
        m.remove(v(0), v(2));
        assert_eq!(m.get(v(0)), None);
        assert_eq!(m.get_inverse(v(2)), None);
        assert_eq!(m.get(v(2)), Some(v(0)));
    }

    #[test]
    #[should_panic(expected = "codomain vertex is already claimed")]
    #[cfg(debug_assertions)]
    fn double_claim_is_rejected() {
        let mut m = InvertibleVertexMap::new(2, 2);
        m.put(v(0), v(1));
        m.put(v(1), v(1));
    }
}
