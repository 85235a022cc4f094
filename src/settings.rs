use crate::errors::{EngineError, EngineResult};
use chrono::Weekday;
use serde::{Deserialize, Serialize};

pub const MAX_DAY_START_HOUR: u8 = 23;

/// User-level knobs for day-boundary and week-boundary handling.
///
/// `day_start_hour` shifts the logical day boundary: with a value of 6,
/// timestamps between midnight and 06:00 still count toward the previous
/// day. `week_start` anchors the weekly habit period; the tracker has
/// historically used Sunday.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineSettings {
    pub day_start_hour: u8,
    pub week_start: Weekday,
}

impl EngineSettings {
    pub fn new(day_start_hour: u8, week_start: Weekday) -> EngineResult<Self> {
        if day_start_hour > MAX_DAY_START_HOUR {
            return Err(EngineError::InvalidSetting(format!(
                "dayStartHour must be 0-{MAX_DAY_START_HOUR}, got {day_start_hour}"
            )));
        }
        Ok(Self {
            day_start_hour,
            week_start,
        })
    }

    pub fn with_day_start_hour(day_start_hour: u8) -> EngineResult<Self> {
        Self::new(day_start_hour, Weekday::Sun)
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            day_start_hour: 0,
            week_start: Weekday::Sun,
        }
    }
}
