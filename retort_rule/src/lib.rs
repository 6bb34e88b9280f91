//! Rewrite rules over labelled graphs and their composition.
//!
//! A [`Rule`] holds one combined graph whose vertices and edges carry a side
//! [`Membership`] and a `(left, right)` label pair. The [`Super`] and
//! [`Sub`] match makers enumerate component-wise overlaps between the right
//! side of one rule and the left side of another, compose the two rules
//! along every overlap, and hand each result to a callback as a
//! [`Composition`].
//!
//! ```ignore
//! use retort_rule::{LabelSettings, RuleBuilder, Super};
//!
//! let mut b = RuleBuilder::new();
//! b.add_context_vertex("a", "b");
//! let first = b.build()?;
//!
//! let mut b = RuleBuilder::new();
//! b.add_context_vertex("b", "c");
//! let second = b.build()?;
//!
//! let mut composed = Vec::new();
//! Super::new(false, true).make_matches(&first, &second, LabelSettings::default(), |c| {
//!     composed.push(c.rule);
//!     true
//! })?;
//! ```

mod component;

pub mod compose;
pub mod constraint;
pub mod error;
pub mod label;
pub mod matchmaker;
pub mod membership;
pub mod prop;
pub mod rule;

pub use compose::Composition;
pub use constraint::{ConstraintOp, VertexAdjacency};
pub use error::{ComposeError, RuleBuildError};
pub use label::{LabelRelation, LabelSettings, LabelType};
pub use matchmaker::{Sub, Super};
pub use membership::{Membership, Side};
pub use prop::{LabelPair, PropString};
pub use rule::{Rule, RuleBuilder};
