mod common;

use common::{ABC_TRIANGLE, LabelledGraph, edge_eq, init_test_logger, path, triangle, vertex_eq};
use retort_graph::{VertexId, first_edge_between};
use retort_subgraph::{
    CommonSubgraphEnumerator, Config, Limit, Store, common_subgraphs, common_subgraphs_maximum,
    common_subgraphs_maximum_unique, common_subgraphs_unique,
};
use rstest::rstest;

fn v(i: usize) -> VertexId {
    VertexId::new(i)
}

/// With distinct labels only the identity pairs are compatible, so the
/// matches are exactly the non-empty subsets of the diagonal. Non-connected
/// enumeration reports each once; connected enumeration revisits them once
/// per growth order.
#[rstest]
#[case(Config::default(), 7)]
#[case(Config::connected(), 15)]
fn triangle_match_counts(#[case] config: Config, #[case] expected: usize) {
    init_test_logger();
    let dom = &*ABC_TRIANGLE;
    let cod = &*ABC_TRIANGLE;
    let mut store = Store::new();
    let completed = common_subgraphs(
        &dom.graph,
        &cod.graph,
        vertex_eq(dom, cod),
        edge_eq(dom, cod),
        config,
        |m| store.observe(m),
    );
    assert!(completed);
    assert_eq!(store.matches.len(), expected);
}

#[test]
fn unique_collapses_connected_growth_orders() {
    init_test_logger();
    let dom = &*ABC_TRIANGLE;
    let cod = &*ABC_TRIANGLE;
    let mut count = 0;
    common_subgraphs_unique(
        &dom.graph,
        &cod.graph,
        vertex_eq(dom, cod),
        edge_eq(dom, cod),
        Config::connected(),
        |_| {
            count += 1;
            true
        },
    );
    assert_eq!(count, 7);
}

#[rstest]
#[case(false)]
#[case(true)]
fn maximum_is_the_full_triangle(#[case] unique: bool) {
    init_test_logger();
    let dom = &*ABC_TRIANGLE;
    let cod = &*ABC_TRIANGLE;
    let mut sizes = Vec::new();
    let run = |cb: &mut dyn FnMut(retort_subgraph::SizedMap<'_>) -> bool| {
        if unique {
            common_subgraphs_maximum_unique(
                &dom.graph,
                &cod.graph,
                vertex_eq(dom, cod),
                edge_eq(dom, cod),
                Config::connected(),
                cb,
            )
        } else {
            common_subgraphs_maximum(
                &dom.graph,
                &cod.graph,
                vertex_eq(dom, cod),
                edge_eq(dom, cod),
                Config::connected(),
                cb,
            )
        }
    };
    run(&mut |m| {
        sizes.push(m.size());
        assert_eq!(m.get(v(0)), Some(v(0)));
        assert_eq!(m.get(v(1)), Some(v(1)));
        assert_eq!(m.get(v(2)), Some(v(2)));
        true
    });
    // There is one maximum match; connected growth finds it through several
    // orders and the unique variant folds those together.
    if unique {
        assert_eq!(sizes, vec![3]);
    } else {
        assert_eq!(sizes, vec![3; 6]);
    }
}

/// Matches are not induced: a codomain edge with no domain counterpart does
/// not block the pair of endpoints from being matched.
#[test]
fn missing_domain_edge_does_not_reject() {
    init_test_logger();
    let dom = path(&['a', 'b', 'c'], 0);
    let cod = triangle(['a', 'b', 'c'], 0);
    let mut full = Vec::new();
    common_subgraphs(
        &dom.graph,
        &cod.graph,
        vertex_eq(&dom, &cod),
        edge_eq(&dom, &cod),
        Config::default(),
        |m| {
            if m.size() == 3 {
                full.push(m.iter().collect::<Vec<_>>());
            }
            true
        },
    );
    assert_eq!(full, vec![vec![(v(0), v(0)), (v(1), v(1)), (v(2), v(2))]]);
}

#[test]
fn edge_label_mismatch_blocks_the_pair() {
    init_test_logger();
    let dom = path(&['x', 'y'], 5);
    let cod = path(&['x', 'y'], 42);
    let mut sizes = Vec::new();
    common_subgraphs(
        &dom.graph,
        &cod.graph,
        vertex_eq(&dom, &cod),
        edge_eq(&dom, &cod),
        Config::default(),
        |m| {
            sizes.push(m.size());
            true
        },
    );
    // Vertex labels agree, so the singletons come out, but the mismatched
    // edge keeps the pair of pairs from ever forming.
    assert_eq!(sizes, vec![1, 1]);
}

#[test]
fn aborted_search_leaves_a_clean_enumerator() {
    init_test_logger();
    let dom = &*ABC_TRIANGLE;
    let cod = &*ABC_TRIANGLE;
    let mut limit = Limit::new(2);
    let mut enumerator = CommonSubgraphEnumerator::new(
        &dom.graph,
        &cod.graph,
        vertex_eq(dom, cod),
        edge_eq(dom, cod),
        Config::default(),
    );
    let completed = enumerator.run(|m| limit.observe(m));
    assert!(!completed);
    assert_eq!(limit.matches.len(), 2);
    // Everything pushed on the aborted branch was popped again.
    assert_eq!(enumerator.total_len(), 0);
    // The enumerator is reusable after an abort.
    let mut store = Store::new();
    assert!(enumerator.run(|m| store.observe(m)));
    assert_eq!(store.matches.len(), 7);
}

#[test]
fn connected_path_lands_on_adjacent_images() {
    init_test_logger();
    let dom = path(&['u', 'u'], 0);
    let cod = triangle(['u', 'u', 'u'], 0);
    let mut size_two = Vec::new();
    common_subgraphs(
        &dom.graph,
        &cod.graph,
        vertex_eq(&dom, &cod),
        edge_eq(&dom, &cod),
        Config::connected(),
        |m| {
            if m.size() == 2 {
                size_two.push((m.get(v(0)), m.get(v(1))));
            }
            true
        },
    );
    assert!(size_two.contains(&(Some(v(0)), Some(v(1)))));
    for (a, b) in size_two {
        let (a, b) = (a.expect("size-2 match maps both"), b.expect("size-2 match maps both"));
        assert!(first_edge_between(&cod.graph, a, b).is_some());
    }
}

#[test]
fn seeded_pairs_constrain_the_enumeration() {
    init_test_logger();
    let dom = path(&['x', 'x'], 0);
    let cod = path(&['x', 'x', 'y'], 0);

    // A label-mismatched seed is refused through the normal checks.
    let mut enumerator = CommonSubgraphEnumerator::new(
        &dom.graph,
        &cod.graph,
        vertex_eq(&dom, &cod),
        edge_eq(&dom, &cod),
        Config::default(),
    );
    assert!(!enumerator.pre_try_push(v(0), v(2)));
    assert_eq!(enumerator.pre_len(), 0);

    // A good seed leaves exactly one completion.
    assert!(enumerator.pre_try_push(v(0), v(0)));
    let mut store = Store::new();
    assert!(enumerator.run(|m| store.observe(m)));
    assert_eq!(store.matches.len(), 1);
    assert_eq!(store.matches[0].size, 2);
    assert_eq!(store.matches[0].map.get(v(1)), Some(v(1)));
    assert_eq!(enumerator.pre_pop(), (v(0), v(0)));
}

#[test]
fn forced_seeds_skip_every_check() {
    init_test_logger();
    let dom = path(&['x', 'x'], 0);
    let cod = path(&['x', 'x', 'y'], 0);
    let mut enumerator = CommonSubgraphEnumerator::new(
        &dom.graph,
        &cod.graph,
        vertex_eq(&dom, &cod),
        edge_eq(&dom, &cod),
        Config::default(),
    );
    // The same pair refused above goes in unchecked when forced.
    enumerator.pre_force_push(v(0), v(2));
    assert_eq!(enumerator.pre_forced_len(), 1);
    let mut store = Store::new();
    assert!(enumerator.run(|m| store.observe(m)));
    // The remaining domain vertex pairs with either remaining codomain
    // vertex; only edges present on both sides are compared.
    assert_eq!(store.matches.len(), 2);
    assert_eq!(enumerator.pre_force_pop(), (v(0), v(2)));
    assert_eq!(enumerator.total_len(), 0);
}

#[test]
fn connected_mode_rejects_disconnected_seeds() {
    init_test_logger();
    let mut dom = LabelledGraph::new();
    dom.add_vertex('x');
    dom.add_vertex('x');
    let cod = path(&['x', 'x'], 0);
    let mut enumerator = CommonSubgraphEnumerator::new(
        &dom.graph,
        &cod.graph,
        vertex_eq(&dom, &cod),
        edge_eq(&dom, &cod),
        Config::connected(),
    );
    assert!(enumerator.pre_try_push(v(0), v(0)));
    // The second seed shares no domain edge with the first, so connected
    // mode refuses it.
    assert!(!enumerator.pre_try_push(v(1), v(1)));
    assert_eq!(enumerator.pre_len(), 1);
}
