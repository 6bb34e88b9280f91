//! Shared fixtures for the integration tests.

use std::sync::OnceLock;

use lazy_static::lazy_static;
use retort_graph::{EdgeId, Graph, VertexId};

pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Graph plus the labels the match predicates compare.
#[derive(Clone, Debug, Default)]
pub struct LabelledGraph {
    pub graph: Graph,
    pub vertex_labels: Vec<char>,
    pub edge_labels: Vec<i32>,
}

impl LabelledGraph {
    pub fn new() -> Self {
        LabelledGraph::default()
    }

    pub fn add_vertex(&mut self, label: char) -> VertexId {
        self.vertex_labels.push(label);
        self.graph.add_vertex()
    }

    pub fn add_edge(&mut self, u: VertexId, v: VertexId, label: i32) -> EdgeId {
        self.edge_labels.push(label);
        self.graph.add_edge(u, v)
    }

    pub fn vertex_label(&self, v: VertexId) -> char {
        self.vertex_labels[v.index()]
    }

    pub fn edge_label(&self, e: EdgeId) -> i32 {
        self.edge_labels[e.index()]
    }
}

/// Label-equality vertex predicate between two labelled graphs.
pub fn vertex_eq<'a>(
    dom: &'a LabelledGraph,
    cod: &'a LabelledGraph,
) -> impl FnMut(VertexId, VertexId) -> bool + 'a {
    move |v, w| dom.vertex_label(v) == cod.vertex_label(w)
}

/// Label-equality edge predicate between two labelled graphs.
pub fn edge_eq<'a>(
    dom: &'a LabelledGraph,
    cod: &'a LabelledGraph,
) -> impl FnMut(EdgeId, EdgeId) -> bool + 'a {
    move |e, f| dom.edge_label(e) == cod.edge_label(f)
}

/// A path with one vertex per label, edges all carrying `edge_label`.
pub fn path(labels: &[char], edge_label: i32) -> LabelledGraph {
    let mut g = LabelledGraph::new();
    let vs: Vec<_> = labels.iter().map(|&l| g.add_vertex(l)).collect();
    for w in vs.windows(2) {
        g.add_edge(w[0], w[1], edge_label);
    }
    g
}

/// A triangle over three labelled vertices, edges all carrying `edge_label`.
pub fn triangle(labels: [char; 3], edge_label: i32) -> LabelledGraph {
    let mut g = LabelledGraph::new();
    let vs: Vec<_> = labels.iter().map(|&l| g.add_vertex(l)).collect();
    g.add_edge(vs[0], vs[1], edge_label);
    g.add_edge(vs[1], vs[2], edge_label);
    g.add_edge(vs[0], vs[2], edge_label);
    g
}

lazy_static! {
    /// The triangle most tests match against.
    pub static ref ABC_TRIANGLE: LabelledGraph = triangle(['a', 'b', 'c'], 0);
}
