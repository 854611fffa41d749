// src/schedule/mod.rs

//! Turning a topological order plus node timelines into a schedule.
//!
//! - [`allocate`] checks declared timelines against their dependencies and
//!   assignee workloads, collecting conflicts and warnings as data.
//! - [`critical_path`] derives the longest effort chain over `DependsOn`.

pub mod allocate;
pub mod critical_path;

pub use allocate::{
    AllocateOptions, Conflict, Interval, Schedule, Slot, Warning, allocate, allocate_with,
};
pub use critical_path::{CriticalPath, critical_path};
