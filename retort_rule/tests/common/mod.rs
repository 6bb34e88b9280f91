//! Shared fixtures for the composition tests.

use std::sync::OnceLock;

use retort_rule::{Rule, RuleBuilder};

pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A single-vertex rule relabelling `from` into `to`.
pub fn relabel(from: &str, to: &str) -> Rule {
    let mut b = RuleBuilder::new();
    b.add_context_vertex(from, to);
    b.build().unwrap()
}

/// A rule preserving two vertices and one edge between them, with the edge
/// labels given per side.
pub fn edge_rule(
    vertices: [&str; 2],
    edge_membership: retort_rule::Membership,
    edge_left: &str,
    edge_right: &str,
) -> Rule {
    let mut b = RuleBuilder::new();
    let u = b.add_context_vertex(vertices[0], vertices[0]);
    let w = b.add_context_vertex(vertices[1], vertices[1]);
    b.add_edge(u, w, edge_membership, edge_left, edge_right).unwrap();
    b.build().unwrap()
}
