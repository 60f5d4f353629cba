//! Core types for Palaver: dialogue graphs, nodes, and choices.
//!
//! This crate defines the immutable conversation template that the engine
//! traverses. A graph is authored once — constructed programmatically or
//! deserialized from JSON — and then shared read-only by every concurrent
//! conversation; per-player traversal state lives entirely in the engine
//! crate's sessions, never here.

/// Error types used throughout the crate.
pub mod error;
/// The dialogue graph that owns nodes and resolves ids.
pub mod graph;
/// Node and choice types plus their identifiers.
pub mod node;

/// Re-export error types.
pub use error::{GraphError, GraphResult};
/// Re-export the graph type.
pub use graph::DialogueGraph;
/// Re-export node and choice types.
pub use node::{DialogueChoice, DialogueNode, NodeId, OfferTag};
