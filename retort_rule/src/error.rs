//! Error types for rule construction and composition.

use std::fmt;

use thiserror::Error;

use crate::label::LabelType;
use crate::membership::{Membership, Side};

/// Failures while assembling a rule from its elements.
///
/// `Display` and `Error` are implemented by hand because the `source` field of
/// [`RuleBuildError::EdgeOutsideSide`] is a vertex index, while `thiserror`
/// reserves that field name for an error cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleBuildError {
    /// An edge claims a side one of its endpoints is not a member of.
    EdgeOutsideSide {
        /// Source vertex index of the offending edge.
        source: usize,
        /// Target vertex index of the offending edge.
        target: usize,
        /// Membership requested for the edge.
        membership: Membership,
        /// The incompatible endpoint.
        vertex: usize,
        /// Membership of that endpoint.
        vertex_membership: Membership,
    },
    /// A constraint names a vertex that is not part of the left side.
    ConstraintOutsideLeft {
        /// The constrained vertex index.
        vertex: usize,
        /// Membership of that vertex.
        membership: Membership,
    },
}

impl fmt::Display for RuleBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EdgeOutsideSide {
                source,
                target,
                membership,
                vertex,
                vertex_membership,
            } => write!(
                f,
                "edge between vertices {source} and {target} has membership {membership} but vertex {vertex} has membership {vertex_membership}"
            ),
            Self::ConstraintOutsideLeft { vertex, membership } => write!(
                f,
                "constraint on vertex {vertex} with membership {membership} is not evaluable in the left side"
            ),
        }
    }
}

impl std::error::Error for RuleBuildError {}

/// Failures reported by the match makers before any match is enumerated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// The side of a rule that should be matched has no vertices.
    #[error("the {side} side of the {rule} rule is empty; composition by overlap is undefined")]
    EmptySide {
        /// Which operand, `"first"` or `"second"`.
        rule: &'static str,
        /// Which side of that operand.
        side: Side,
    },
    /// The requested label mode is not supported by this matcher.
    #[error("unsupported label mode: {label_type} labels with stereo={with_stereo}; only plain string labels are supported")]
    UnsupportedLabelMode {
        /// Requested label kind.
        label_type: LabelType,
        /// Whether stereo comparison was requested.
        with_stereo: bool,
    },
}

// #############################################################
// Tests
// #############################################################
