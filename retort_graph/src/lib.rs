//! Arena-backed graphs with dense vertex and edge indices.
//!
//! Vertices and edges live in contiguous stores and are addressed by
//! [`VertexId`] / [`EdgeId`] newtypes. The [`GraphAccess`] trait is the
//! read-only contract the morphism machinery works against, so searches can
//! run over the owned [`Graph`] arena or over any other adjacency structure
//! that hands out the same dense ids.

mod component;
mod graph;

pub use component::{ComponentLabelling, connected_components};
pub use graph::{EdgeId, Graph, GraphAccess, VertexId, first_edge_between};
