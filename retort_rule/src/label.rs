//! Label comparison settings threaded through match making.

use std::fmt;

/// The kind of labels a comparison operates on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LabelType {
    /// Plain string labels.
    String,
    /// First-order terms. Declared for interface compatibility; the match
    /// makers reject it.
    Term,
}

impl fmt::Display for LabelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LabelType::String => "string",
            LabelType::Term => "term",
        };
        write!(f, "{s}")
    }
}

/// How pattern labels must relate to host labels.
///
/// For string labels all three relations coincide with equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LabelRelation {
    /// Labels must be equal up to renaming.
    Isomorphism,
    /// The host label may be a specialisation of the pattern label.
    Specialisation,
    /// Labels must unify.
    Unification,
}

/// Settings bundle handed to the match makers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelSettings {
    /// Kind of labels to compare.
    pub label_type: LabelType,
    /// Relation required between pattern and host labels.
    pub relation: LabelRelation,
    /// Whether stereo information takes part in the comparison.
    pub with_stereo: bool,
    /// Relation required between stereo data, when enabled.
    pub stereo_relation: LabelRelation,
}

impl LabelSettings {
    /// String labels under the given relation, without stereo data.
    #[must_use]
    pub const fn string(relation: LabelRelation) -> Self {
        Self {
            label_type: LabelType::String,
            relation,
            with_stereo: false,
            stereo_relation: relation,
        }
    }
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self::string(LabelRelation::Isomorphism)
    }
}
