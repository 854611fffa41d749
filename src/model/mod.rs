// src/model/mod.rs

//! Identifier and attribute model.
//!
//! - [`id`] holds the stable external node identifier.
//! - [`kind`] defines the closed set of node kinds and edge types.
//! - [`timeline`] is the scheduled-interval value type.
//! - [`node`] is the per-kind node record plus its builder.

pub mod id;
pub mod kind;
pub mod node;
pub mod timeline;

pub use id::NodeId;
pub use kind::{EdgeKind, NodeKind};
pub use node::{Node, NodeDetails, NodeSpec};
pub use timeline::{Duration, Timeline};
