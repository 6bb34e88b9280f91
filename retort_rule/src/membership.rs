//! Side membership of rule elements.
//!
//! A rule is stored as one combined graph. Every vertex and edge carries a
//! [`Membership`] telling which sides of the rule it belongs to: the left
//! side only, the right side only, or both (the context).

use std::fmt;

/// Which sides of a rule an element belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Membership {
    /// Only in the left side. The rule deletes this element.
    Left,
    /// In both sides. The rule preserves this element.
    Context,
    /// Only in the right side. The rule creates this element.
    Right,
}

impl Membership {
    /// Whether the element is part of the left side.
    #[must_use]
    pub const fn in_left(self) -> bool {
        matches!(self, Membership::Left | Membership::Context)
    }

    /// Whether the element is part of the right side.
    #[must_use]
    pub const fn in_right(self) -> bool {
        matches!(self, Membership::Context | Membership::Right)
    }

    /// Whether the element is part of the given side.
    #[must_use]
    pub const fn in_side(self, side: Side) -> bool {
        match side {
            Side::Left => self.in_left(),
            Side::Right => self.in_right(),
        }
    }
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Membership::Left => "L",
            Membership::Context => "K",
            Membership::Right => "R",
        };
        write!(f, "{s}")
    }
}

/// One of the two sides of a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The pattern side, matched when the rule is applied.
    Left,
    /// The replacement side.
    Right,
}

impl Side {
    /// Lowercase name for log and error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// #############################################################
// Tests
// #############################################################

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_in_both_sides() {
        assert!(Membership::Context.in_left());
        assert!(Membership::Context.in_right());
        assert!(Membership::Left.in_left());
        assert!(!Membership::Left.in_right());
        assert!(!Membership::Right.in_left());
        assert!(Membership::Right.in_right());
    }

    #[test]
    fn side_membership_matches_the_helpers() {
        for m in [Membership::Left, Membership::Context, Membership::Right] {
            assert_eq!(m.in_side(Side::Left), m.in_left());
            assert_eq!(m.in_side(Side::Right), m.in_right());
        }
    }
}
