use crate::errors::{EngineError, EngineResult};
use crate::models::HabitEntry;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use tracing::debug;

/// Early snapshots stored habit history as a flat array of date strings,
/// each one an implicit simple completion. The keyed-map form is canonical;
/// this upgrades the legacy form without losing the dates.
pub fn upgrade_legacy_history(
    dates: &[String],
) -> EngineResult<BTreeMap<NaiveDate, HabitEntry>> {
    let mut history = BTreeMap::new();
    for raw in dates {
        let date = parse_day(raw)?;
        // Duplicate days collapse into the single entry the invariant allows.
        history.insert(
            date,
            HabitEntry {
                date,
                value: None,
                completed: true,
            },
        );
    }
    debug!(entries = history.len(), "upgraded legacy habit history");
    Ok(history)
}

fn parse_day(raw: &str) -> EngineResult<NaiveDate> {
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return Ok(date);
    }
    // Some legacy snapshots kept full timestamps.
    if let Ok(at) = raw.parse::<DateTime<Utc>>() {
        return Ok(at.date_naive());
    }
    Err(EngineError::InvalidDate(format!(
        "unparseable history date '{raw}'"
    )))
}

/// Field-level deserializer for `Habit::history`: accepts the canonical
/// keyed map or the legacy flat array.
pub(crate) fn history_from_any<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<NaiveDate, HabitEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum HistoryRepr {
        Keyed(BTreeMap<NaiveDate, HabitEntry>),
        Legacy(Vec<String>),
    }

    match HistoryRepr::deserialize(deserializer)? {
        HistoryRepr::Keyed(history) => Ok(history),
        HistoryRepr::Legacy(dates) => {
            upgrade_legacy_history(&dates).map_err(serde::de::Error::custom)
        }
    }
}
