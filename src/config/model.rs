// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [storage]
/// graph_file = "~/.projdag/graph.json"
///
/// [schedule]
/// detect_overbooking = true
///
/// [view]
/// gantt_width = 60
/// date_format = "%Y-%m-%d"
/// ```
///
/// Every section is optional. This is the unvalidated shape; convert it into
/// a [`ConfigFile`] with `TryFrom`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub storage: StorageSection,

    #[serde(default)]
    pub schedule: ScheduleSection,

    #[serde(default)]
    pub view: ViewSection,
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub storage: StorageSection,
    pub schedule: ScheduleSection,
    pub view: ViewSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        storage: StorageSection,
        schedule: ScheduleSection,
        view: ViewSection,
    ) -> Self {
        Self {
            storage,
            schedule,
            view,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(
            StorageSection::default(),
            ScheduleSection::default(),
            ViewSection::default(),
        )
    }
}

/// `[storage]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSection {
    /// Where the graph lives. A leading `~/` is expanded to the home
    /// directory. When unset, `~/.projdag/graph.json` is used.
    #[serde(default)]
    pub graph_file: Option<PathBuf>,
}

/// `[schedule]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleSection {
    /// Report overlapping stories that share an assignee.
    #[serde(default = "default_detect_overbooking")]
    pub detect_overbooking: bool,
}

fn default_detect_overbooking() -> bool {
    true
}

impl Default for ScheduleSection {
    fn default() -> Self {
        Self {
            detect_overbooking: default_detect_overbooking(),
        }
    }
}

/// `[view]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewSection {
    /// Width in characters of the Gantt bar area.
    #[serde(default = "default_gantt_width")]
    pub gantt_width: usize,

    /// `chrono` strftime format for dates in rendered views.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_gantt_width() -> usize {
    60
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for ViewSection {
    fn default() -> Self {
        Self {
            gantt_width: default_gantt_width(),
            date_format: default_date_format(),
        }
    }
}
