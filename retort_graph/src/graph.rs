use std::fmt;

/// Dense index of a vertex within its owning graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(usize);

impl VertexId {
    /// Wraps a raw dense index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        VertexId(index)
    }

    /// The raw dense index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dense index of an edge within its owning graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
    /// Wraps a raw dense index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        EdgeId(index)
    }

    /// The raw dense index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, Default)]
struct VertexData {
    incident: Vec<EdgeId>,
}

#[derive(Clone, Copy, Debug)]
struct EdgeData {
    source: VertexId,
    target: VertexId,
}

/// Read-only adjacency contract used by the morphism machinery.
///
/// Ids must be dense and 0-based. `incident_edges` lists every edge touching
/// the vertex; on directed graphs orientation is recovered through
/// [`GraphAccess::source`] / [`GraphAccess::target`].
pub trait GraphAccess {
    /// Number of vertices; valid ids are `0..num_vertices`.
    fn num_vertices(&self) -> usize;

    /// Number of edges; valid ids are `0..num_edges`.
    fn num_edges(&self) -> usize;

    /// Whether edge orientation is significant.
    fn is_directed(&self) -> bool {
        false
    }

    /// First endpoint of `e`.
    fn source(&self, e: EdgeId) -> VertexId;

    /// Second endpoint of `e`.
    fn target(&self, e: EdgeId) -> VertexId;

    /// Every edge incident to `v`, in insertion order.
    fn incident_edges(&self, v: VertexId) -> &[EdgeId];

    /// The endpoint of `e` that is not `v`. `v` must be an endpoint of `e`.
    fn opposite(&self, e: EdgeId, v: VertexId) -> VertexId {
        let source = self.source(e);
        if source == v { self.target(e) } else { source }
    }
}

/// First edge from `u` to `v`, honouring orientation on directed graphs.
///
/// With parallel edges the one inserted first wins.
#[must_use]
pub fn first_edge_between<G: GraphAccess>(g: &G, u: VertexId, v: VertexId) -> Option<EdgeId> {
    g.incident_edges(u).iter().copied().find(|&e| {
        if g.is_directed() {
            g.source(e) == u && g.target(e) == v
        } else {
            g.opposite(e, u) == v
        }
    })
}

/// Owned undirected graph arena.
///
/// Grows append-only; parallel edges and self loops are representable. All
/// searches treat a built graph as immutable.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    vertices: Vec<VertexData>,
    edges: Vec<EdgeData>,
}

impl Graph {
    /// An empty graph.
    #[must_use]
    pub fn new() -> Self {
        Graph::default()
    }

    /// Appends a vertex and returns its id.
    pub fn add_vertex(&mut self) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(VertexData::default());
        id
    }

    /// Appends an edge between two existing vertices and returns its id.
    #[contracts::debug_requires(
        source.index() < self.num_vertices() && target.index() < self.num_vertices(),
        "edge endpoints must be existing vertices"
    )]
    pub fn add_edge(&mut self, source: VertexId, target: VertexId) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(EdgeData { source, target });
        self.vertices[source.index()].incident.push(id);
        if source != target {
            self.vertices[target.index()].incident.push(id);
        }
        id
    }

    /// Number of vertices.
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// All vertex ids in increasing order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + use<> {
        (0..self.vertices.len()).map(VertexId)
    }

    /// All edge ids in increasing order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + use<> {
        (0..self.edges.len()).map(EdgeId)
    }

    /// First endpoint of `e`.
    #[must_use]
    #[contracts::debug_requires(e.index() < self.num_edges())]
    pub fn source(&self, e: EdgeId) -> VertexId {
        self.edges[e.index()].source
    }

    /// Second endpoint of `e`.
    #[must_use]
    #[contracts::debug_requires(e.index() < self.num_edges())]
    pub fn target(&self, e: EdgeId) -> VertexId {
        self.edges[e.index()].target
    }

    /// Every edge incident to `v`, in insertion order.
    #[must_use]
    #[contracts::debug_requires(v.index() < self.num_vertices())]
    pub fn incident_edges(&self, v: VertexId) -> &[EdgeId] {
        &self.vertices[v.index()].incident
    }

    /// Number of incident edges of `v` (self loops count once).
    #[must_use]
    pub fn degree(&self, v: VertexId) -> usize {
        self.incident_edges(v).len()
    }
}

impl GraphAccess for Graph {
    fn num_vertices(&self) -> usize {
        Graph::num_vertices(self)
    }

    fn num_edges(&self) -> usize {
        Graph::num_edges(self)
    }

    fn source(&self, e: EdgeId) -> VertexId {
        Graph::source(self, e)
    }

    fn target(&self, e: EdgeId) -> VertexId {
        Graph::target(self, e)
    }

    fn incident_edges(&self, v: VertexId) -> &[EdgeId] {
        Graph::incident_edges(self, v)
    }
}
