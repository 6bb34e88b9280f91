//! Match makers enumerating overlaps between two rules.
//!
//! An overlap assigns whole components of one rule's side to components of
//! the other rule's side. Per-component morphisms are enumerated once into a
//! matrix, a [`MultiDimSelector`] walks every combination, and each
//! combination is merged into one injective vertex map feeding the pushout
//! composer. Positions whose components collide on a host vertex are
//! skipped without aborting the enumeration.

use itertools::Itertools;
use tracing::{debug, trace};

use retort_subgraph::{Cursor, InvertibleVertexMap, MultiDimSelector, SlotView};

use crate::component::{ComponentGraph, ComponentMatch, component_morphisms, extract_components};
use crate::compose::{Composition, compose};
use crate::constraint::VertexAdjacency;
use crate::error::ComposeError;
use crate::label::{LabelSettings, LabelType};
use crate::membership::Side;
use crate::rule::Rule;

fn check_label_settings(settings: LabelSettings) -> Result<(), ComposeError> {
    if settings.label_type != LabelType::String || settings.with_stereo {
        return Err(ComposeError::UnsupportedLabelMode {
            label_type: settings.label_type,
            with_stereo: settings.with_stereo,
        });
    }
    Ok(())
}

fn check_sides(r_first: &Rule, r_second: &Rule) -> Result<(), ComposeError> {
    if r_first.side_is_empty(Side::Right) {
        return Err(ComposeError::EmptySide {
            rule: "first",
            side: Side::Right,
        });
    }
    if r_second.side_is_empty(Side::Left) {
        return Err(ComposeError::EmptySide {
            rule: "second",
            side: Side::Left,
        });
    }
    Ok(())
}

fn build_selector(
    patterns: &[ComponentGraph],
    hosts: &[ComponentGraph],
    allow_partial: bool,
    constraints: &[VertexAdjacency],
    enforce_constraints: bool,
) -> MultiDimSelector<ComponentMatch> {
    let pre_disabled = vec![false; patterns.len()];
    let provider = |p: usize, h: usize| component_morphisms(&patterns[p], &hosts[h], constraints, enforce_constraints);
    #[cfg(feature = "rayon")]
    let selector = MultiDimSelector::new_parallel(patterns.len(), hosts.len(), allow_partial, pre_disabled, provider);
    #[cfg(not(feature = "rayon"))]
    let selector = MultiDimSelector::new(patterns.len(), hosts.len(), allow_partial, pre_disabled, provider);
    selector
}

fn log_match_matrix(driver: &str, selector: &MultiDimSelector<ComponentMatch>) {
    debug!(
        "{} match matrix, {} pattern components x {} host components",
        driver,
        selector.num_patterns(),
        selector.num_hosts()
    );
    for p in 0..selector.num_patterns() {
        let row = (0..selector.num_hosts()).map(|h| selector.morphisms(p, h).len()).join(" ");
        debug!("  [{}] {}", p, row);
    }
}

/// Merges the component morphisms selected by `cursor` into one injective
/// map from the second rule's combined graph into the first's.
///
/// With `invert` set the stored pairs run from the first rule into the
/// second and are flipped while merging. Returns `None` when two components
/// claim the same vertex.
fn merge(
    selector: &MultiDimSelector<ComponentMatch>,
    cursor: &Cursor,
    dom_len: usize,
    cod_len: usize,
    invert: bool,
) -> Option<InvertibleVertexMap> {
    let mut map = InvertibleVertexMap::new(dom_len, cod_len);
    for p in 0..selector.num_patterns() {
        let morphism = match selector.get(cursor, p) {
            SlotView::Match { morphism, .. } => morphism,
            SlotView::Unmatched => {
                debug_assert!(selector.allow_partial(), "only partial overlaps park components");
                continue;
            }
            SlotView::Disabled => continue,
        };
        for &(v_pattern, v_host) in &morphism.pairs {
            let (v_dom, v_cod) = if invert { (v_host, v_pattern) } else { (v_pattern, v_host) };
            if map.get(v_dom).is_some() || map.get_inverse(v_cod).is_some() {
                trace!("component {} would reuse an overlapped vertex; skipping this position", p);
                return None;
            }
            map.put(v_dom, v_cod);
        }
    }
    Some(map)
}

fn enumerate<F>(
    r_first: &Rule,
    r_second: &Rule,
    selector: &MultiDimSelector<ComponentMatch>,
    invert: bool,
    mut callback: F,
) where
    F: FnMut(Composition) -> bool,
{
    let Some(mut cursor) = selector.cursor() else {
        return;
    };
    loop {
        if let Some(map) = merge(selector, &cursor, r_second.num_vertices(), r_first.num_vertices(), invert) {
            if let Some(composition) = compose(r_first, r_second, &map) {
                if !callback(composition) {
                    debug!("callback stopped the overlap enumeration");
                    return;
                }
            }
        }
        if !selector.advance(&mut cursor) {
            return;
        }
    }
}

/// Overlaps embedding the second rule's left side into the first rule's
/// right side, component by component.
#[derive(Clone, Copy, Debug)]
pub struct Super {
    allow_partial: bool,
    enforce_constraints: bool,
}

impl Super {
    /// With `allow_partial`, components of the left side may stay unmatched;
    /// with `enforce_constraints`, the second rule's adjacency constraints
    /// prune the per-component morphisms.
    #[must_use]
    pub const fn new(allow_partial: bool, enforce_constraints: bool) -> Self {
        Self {
            allow_partial,
            enforce_constraints,
        }
    }

    /// Calls `callback` with every composition of `r_first` and `r_second`;
    /// a `false` return stops the enumeration.
    ///
    /// Overlaps that admit no pushout are skipped silently. Errors are
    /// reported only for unusable inputs, before any overlap is tried.
    pub fn make_matches<F>(
        &self,
        r_first: &Rule,
        r_second: &Rule,
        settings: LabelSettings,
        callback: F,
    ) -> Result<(), ComposeError>
    where
        F: FnMut(Composition) -> bool,
    {
        check_label_settings(settings)?;
        check_sides(r_first, r_second)?;
        let patterns = extract_components(r_second, Side::Left);
        let hosts = extract_components(r_first, Side::Right);
        let selector = build_selector(
            &patterns,
            &hosts,
            self.allow_partial,
            r_second.constraints(),
            self.enforce_constraints,
        );
        log_match_matrix("super", &selector);
        enumerate(r_first, r_second, &selector, false, callback);
        Ok(())
    }
}

/// Overlaps embedding the first rule's right side into the second rule's
/// left side, component by component.
///
/// The merged overlap has the same orientation as [`Super`] produces, so
/// both feed the same composer.
#[derive(Clone, Copy, Debug)]
pub struct Sub {
    allow_partial: bool,
}

impl Sub {
    /// With `allow_partial`, components of the right side may stay unmatched.
    #[must_use]
    pub const fn new(allow_partial: bool) -> Self {
        Self { allow_partial }
    }

    /// Calls `callback` with every composition of `r_first` and `r_second`;
    /// a `false` return stops the enumeration.
    pub fn make_matches<F>(
        &self,
        r_first: &Rule,
        r_second: &Rule,
        settings: LabelSettings,
        callback: F,
    ) -> Result<(), ComposeError>
    where
        F: FnMut(Composition) -> bool,
    {
        check_label_settings(settings)?;
        check_sides(r_first, r_second)?;
        let patterns = extract_components(r_first, Side::Right);
        let hosts = extract_components(r_second, Side::Left);
        let selector = build_selector(&patterns, &hosts, self.allow_partial, &[], false);
        log_match_matrix("sub", &selector);
        enumerate(r_first, r_second, &selector, true, callback);
        Ok(())
    }
}

// #############################################################
// Tests
// #############################################################

#[cfg(test)]
mod tests {
    use crate::label::LabelRelation;
    use crate::rule::RuleBuilder;

    use super::*;

    #[test]
    fn an_empty_side_is_reported_before_matching() {
        let mut b = RuleBuilder::new();
        b.add_left_vertex("a");
        let deleting = b.build().unwrap();

        let err = Super::new(false, false)
            .make_matches(&deleting, &deleting, LabelSettings::default(), |_| true)
            .unwrap_err();
        assert_eq!(
            err,
            ComposeError::EmptySide {
                rule: "first",
                side: Side::Right,
            }
        );
    }

    #[test]
    fn term_labels_are_rejected() {
        let mut b = RuleBuilder::new();
        b.add_context_vertex("a", "a");
        let rule = b.build().unwrap();

        let settings = LabelSettings {
            label_type: LabelType::Term,
            relation: LabelRelation::Unification,
            with_stereo: false,
            stereo_relation: LabelRelation::Unification,
        };
        let err = Sub::new(false)
            .make_matches(&rule, &rule, settings, |_| true)
            .unwrap_err();
        assert!(matches!(err, ComposeError::UnsupportedLabelMode { .. }));
    }
}
