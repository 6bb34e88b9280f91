//! Enumeration configuration.
//!
//! Quick examples:
//!
//! ```ignore
//! // every common subgraph, connected or not
//! let config = Config::default();
//!
//! // only matches whose domain image is connected
//! let config = Config::connected();
//! ```

/// Knobs for a common-subgraph enumeration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Require every pair after the first to share at least one edge with
    /// the pairs already matched.
    ///
    /// Connected mode restarts the domain scan at every depth, so the same
    /// match can be reported through several push orders; combine with the
    /// unique collector when that matters. Non-connected mode reports each
    /// match exactly once.
    pub only_connected: bool,
}

impl Config {
    /// Configuration with the given connectivity requirement.
    #[must_use]
    pub const fn new(only_connected: bool) -> Self {
        Config { only_connected }
    }

    /// Connected matches only.
    #[must_use]
    pub const fn connected() -> Self {
        Config {
            only_connected: true,
        }
    }
}
