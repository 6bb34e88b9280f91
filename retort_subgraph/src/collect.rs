//! Callback adaptors for gathering enumeration results.

use indexmap::IndexSet;
use retort_graph::VertexId;

use crate::map::{InvertibleVertexMap, SizedMap};

/// An owned match detached from its enumeration.
#[derive(Clone, Debug)]
pub struct StoredMatch {
    /// The match itself.
    pub map: InvertibleVertexMap,
    /// Number of matched pairs.
    pub size: usize,
}

impl StoredMatch {
    fn from_view(m: &SizedMap<'_>) -> Self {
        let (map, size) = m.snapshot();
        StoredMatch { map, size }
    }

    /// Borrowed view of this match.
    #[must_use]
    pub fn view(&self) -> SizedMap<'_> {
        SizedMap::new(&self.map, self.size)
    }
}

/// Stores every reported match and never aborts.
#[derive(Debug, Default)]
pub struct Store {
    /// Matches in report order.
    pub matches: Vec<StoredMatch>,
}

impl Store {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Store::default()
    }

    /// Callback body: snapshot and continue.
    pub fn observe(&mut self, m: SizedMap<'_>) -> bool {
        self.matches.push(StoredMatch::from_view(&m));
        true
    }
}

/// Stores matches and aborts the search once a fixed number is reached.
#[derive(Debug)]
pub struct Limit {
    /// Matches in report order, at most `limit` of them.
    pub matches: Vec<StoredMatch>,
    limit: usize,
}

impl Limit {
    /// Stops the search after `limit` reported matches.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Limit {
            matches: Vec::new(),
            limit,
        }
    }

    /// Callback body: snapshot, continue while under the limit.
    pub fn observe(&mut self, m: SizedMap<'_>) -> bool {
        self.matches.push(StoredMatch::from_view(&m));
        self.matches.len() < self.limit
    }
}

/// Suppresses matches whose forward map was already seen.
#[derive(Debug, Default)]
pub struct Unique {
    seen: IndexSet<Vec<Option<VertexId>>>,
}

impl Unique {
    /// An empty filter.
    #[must_use]
    pub fn new() -> Self {
        Unique::default()
    }

    /// `true` the first time this exact forward map shows up.
    pub fn insert(&mut self, m: &SizedMap<'_>) -> bool {
        self.seen.insert(m.forward_slots().to_vec())
    }
}

/// Keeps only the maximum-cardinality matches, delivering them after the
/// search through [`Maximum::flush`].
///
/// A strictly larger match clears everything cached so far; smaller ones
/// are dropped on arrival.
#[derive(Debug)]
pub struct Maximum {
    cache: Vec<StoredMatch>,
    seen: Option<IndexSet<Vec<Option<VertexId>>>>,
    best: usize,
}

impl Maximum {
    /// Cache every maximum match, duplicates included.
    #[must_use]
    pub fn new() -> Self {
        Maximum {
            cache: Vec::new(),
            seen: None,
            best: 0,
        }
    }

    /// Cache every distinct maximum match.
    #[must_use]
    pub fn new_unique() -> Self {
        Maximum {
            cache: Vec::new(),
            seen: Some(IndexSet::new()),
            best: 0,
        }
    }

    /// Callback body: cache if at least as large as everything seen so far.
    /// Always continues the search.
    pub fn observe(&mut self, m: SizedMap<'_>) -> bool {
        if m.size() < self.best {
            return true;
        }
        if m.size() > self.best {
            self.best = m.size();
            self.cache.clear();
            if let Some(seen) = &mut self.seen {
                seen.clear();
            }
        }
        if let Some(seen) = &mut self.seen {
            if !seen.insert(m.forward_slots().to_vec()) {
                return true;
            }
        }
        self.cache.push(StoredMatch::from_view(&m));
        true
    }

    /// Number of cached matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether nothing was cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Delivers the cached matches in discovery order; stops at the first
    /// `false` from the callback and reports it.
    pub fn flush<F>(&self, mut callback: F) -> bool
    where
        F: FnMut(SizedMap<'_>) -> bool,
    {
        for stored in &self.cache {
            if !callback(stored.view()) {
                return false;
            }
        }
        true
    }
}

impl Default for Maximum {
    fn default() -> Self {
        Maximum::new()
    }
}
