// src/dag/mod.rs

//! The project DAG engine.
//!
//! - [`graph`] owns nodes and typed edges and enforces acyclicity on every
//!   mutation.
//! - [`cycle`] holds the full-graph cycle check and the reachability search
//!   used before committing an edge.
//! - [`order`] computes the deterministic topological order.
//! - [`shared`] wraps a graph for use from several threads.

pub mod cycle;
pub mod graph;
pub mod order;
pub mod shared;

pub use graph::{Edge, ProjectGraph};
pub use shared::SharedGraph;
