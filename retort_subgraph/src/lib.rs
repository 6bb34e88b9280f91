//! Injective subgraph-morphism search.
//!
//! The crate is layered the way the search itself is: [`map`] holds the
//! dense vertex maps, [`state`] the backtracking engine over them,
//! [`finder`] the common-subgraph enumeration on top of the engine,
//! [`collect`] the callback adaptors for gathering results, and
//! [`selector`] the lazy combinator that walks every globally consistent
//! choice of per-component morphisms.
//!
//! The building blocks are re-exported at the crate root; a plain
//! enumeration over two graphs with label predicates looks like:
//!
//! ```ignore
//! let config = Config::default();
//! common_subgraphs(&dom, &cod, vertex_eq, edge_eq, config, |m| {
//!     println!("match of size {}", m.size());
//!     true
//! });
//! ```

pub mod collect;
pub mod config;
pub mod finder;
pub mod map;
pub mod selector;
pub mod state;

pub use collect::{Limit, Maximum, Store, StoredMatch, Unique};
pub use config::Config;
pub use finder::{
    CommonSubgraphEnumerator, common_subgraphs, common_subgraphs_maximum,
    common_subgraphs_maximum_unique, common_subgraphs_unique,
};
pub use map::{InvertibleVertexMap, SizedMap, VectorVertexMap};
pub use selector::{Cursor, MultiDimSelector, SlotView};
pub use state::{ExtensionHook, InjectiveEnumerationState, StateView};
