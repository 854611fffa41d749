// src/views/mod.rs

//! Display-ready projections of an ordered graph.
//!
//! Both projections are pure: they read the graph and an order, never mutate
//! anything and never fail. Missing data simply yields fewer rows.

pub mod gantt;
pub mod swimlane;

pub use gantt::{GanttRow, gantt};
pub use swimlane::{Lane, LaneKey, SwimlaneRow, swimlane};
