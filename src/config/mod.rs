// src/config/mod.rs

//! Configuration loading and validation for projdag.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Locate and load the config file, and resolve the graph file path
//!   (`loader.rs`).
//! - Validate field values (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_effective, load_from_path, resolve_graph_path};
pub use model::{ConfigFile, RawConfigFile, ScheduleSection, StorageSection, ViewSection};
