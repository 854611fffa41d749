// src/model/timeline.rs

//! Scheduled interval plus effort estimate.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ProjdagError, Result};

type DT = DateTime<Utc>;

const SECS_PER_HOUR: i64 = 3600;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;
const SECS_PER_WEEK: i64 = 7 * SECS_PER_DAY;

/// Coarse calendar duration used when a timeline is entered as
/// "start + length" instead of "start + end".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Duration {
    Hours(u32),
    Days(u32),
    Weeks(u32),
}

impl Duration {
    /// Express the span between two instants in the coarsest unit that fits,
    /// rounding partial units up. A negative span is treated as zero.
    pub fn between(start: &DT, end: &DT) -> Self {
        let secs = (*end - *start).num_seconds().max(0);

        if secs > SECS_PER_WEEK {
            Duration::Weeks(ceil_div(secs, SECS_PER_WEEK))
        } else if secs > SECS_PER_DAY {
            Duration::Days(ceil_div(secs, SECS_PER_DAY))
        } else {
            Duration::Hours(ceil_div(secs, SECS_PER_HOUR))
        }
    }

    pub fn to_time_delta(self) -> TimeDelta {
        match self {
            Duration::Hours(h) => TimeDelta::hours(i64::from(h)),
            Duration::Days(d) => TimeDelta::days(i64::from(d)),
            Duration::Weeks(w) => TimeDelta::weeks(i64::from(w)),
        }
    }
}

fn ceil_div(value: i64, unit: i64) -> u32 {
    let n = value / unit + i64::from(value % unit != 0);
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Duration::Hours(h) => write!(f, "{h}h"),
            Duration::Days(d) => write!(f, "{d}d"),
            Duration::Weeks(w) => write!(f, "{w}w"),
        }
    }
}

/// Parses `"5h"`, `"3d"` or `"2w"`.
impl FromStr for Duration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let Some(unit) = s.chars().last() else {
            return Err("empty duration".to_string());
        };
        let value: u32 = s[..s.len() - unit.len_utf8()]
            .trim()
            .parse()
            .map_err(|_| format!("invalid duration: {s} (expected e.g. 5h, 3d, 2w)"))?;

        match unit.to_ascii_lowercase() {
            'h' => Ok(Duration::Hours(value)),
            'd' => Ok(Duration::Days(value)),
            'w' => Ok(Duration::Weeks(value)),
            _ => Err(format!("invalid duration unit in {s} (expected h, d or w)")),
        }
    }
}

/// On-disk shape of a [`Timeline`]; converted through `TryFrom` so that a
/// hand-edited file cannot smuggle in `start > end`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTimeline {
    start: DT,
    end: DT,
    #[serde(default)]
    estimated_hours: u32,
}

/// A scheduled `[start, end]` interval with an effort estimate in hours.
///
/// Invariant: `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeline", into = "RawTimeline")]
pub struct Timeline {
    start: DT,
    end: DT,
    estimated_hours: u32,
}

impl Timeline {
    pub fn new(start: DT, end: DT, estimated_hours: u32) -> Result<Self> {
        if start > end {
            return Err(ProjdagError::InvalidAttribute {
                id: None,
                reason: format!("timeline start {start} is after end {end}"),
            });
        }
        Ok(Self {
            start,
            end,
            estimated_hours,
        })
    }

    pub fn from_start_duration(start: DT, duration: Duration, estimated_hours: u32) -> Result<Self> {
        let end = start
            .checked_add_signed(duration.to_time_delta())
            .ok_or_else(|| ProjdagError::InvalidAttribute {
                id: None,
                reason: format!("duration {duration} overflows the calendar"),
            })?;
        Self::new(start, end, estimated_hours)
    }

    pub fn start(&self) -> DT {
        self.start
    }

    pub fn end(&self) -> DT {
        self.end
    }

    pub fn estimated_hours(&self) -> u32 {
        self.estimated_hours
    }

    pub fn duration(&self) -> Duration {
        Duration::between(&self.start, &self.end)
    }

    /// Half-open overlap test: touching intervals do not overlap.
    pub fn overlaps(&self, other: &Timeline) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl TryFrom<RawTimeline> for Timeline {
    type Error = ProjdagError;

    fn try_from(raw: RawTimeline) -> std::result::Result<Self, Self::Error> {
        Timeline::new(raw.start, raw.end, raw.estimated_hours)
    }
}

impl From<Timeline> for RawTimeline {
    fn from(tl: Timeline) -> Self {
        RawTimeline {
            start: tl.start,
            end: tl.end,
            estimated_hours: tl.estimated_hours,
        }
    }
}
