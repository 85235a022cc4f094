use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommitmentStatus {
    Active,
    Archived,
}

impl CommitmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

impl Default for CommitmentStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// Recurrence granularity shared by habits and recurring events.
///
/// `Unknown` absorbs out-of-vocabulary schedule strings on revive; the
/// resolver treats it as "never due" rather than failing the whole load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Schedule {
    Daily,
    Weekly,
    Monthly,
    #[serde(other)]
    Unknown,
}

impl Schedule {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Unknown => "unknown",
        }
    }

    /// Rank for tie-breaking same-day habits: finer cadence sorts first.
    pub fn granularity(self) -> u8 {
        match self {
            Self::Daily => 0,
            Self::Weekly => 1,
            Self::Monthly => 2,
            Self::Unknown => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ReviewFrequency {
    #[serde(rename_all = "camelCase")]
    Interval { interval_days: Option<u32> },
    /// Raw cron expression, preserved but not evaluated. The review cycle
    /// falls back to weekly until a real cron evaluator lands.
    #[serde(rename_all = "camelCase")]
    Custom { custom_cron: String },
}

impl ReviewFrequency {
    pub fn effective_interval_days(&self) -> i64 {
        match self {
            Self::Interval { interval_days } => i64::from(interval_days.unwrap_or(7)),
            Self::Custom { .. } => 7,
        }
    }
}

impl Default for ReviewFrequency {
    fn default() -> Self {
        Self::Interval {
            interval_days: Some(7),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
}

/// Value recorded against a habit for one day: a count toward a numeric
/// goal, or the checklist items ticked off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryValue {
    Count(f64),
    Items(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub value: Option<EntryValue>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HabitTarget {
    #[default]
    None,
    Numeric(f64),
    Checklist(Vec<String>),
}

impl HabitTarget {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Whether a day's entry satisfies this target.
    pub fn is_met(&self, entry: &HabitEntry) -> bool {
        match self {
            Self::None => entry.completed,
            Self::Numeric(goal) => match entry.value {
                Some(EntryValue::Count(count)) => count >= *goal,
                _ => false,
            },
            Self::Checklist(items) => match &entry.value {
                Some(EntryValue::Items(checked)) => {
                    items.iter().all(|item| checked.contains(item))
                }
                _ => false,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub title: String,
    pub schedule: Schedule,
    /// Keyed by calendar day; at most one entry per day. Legacy snapshots
    /// stored a flat array of dates, accepted on revive (see `migrate`).
    #[serde(default, deserialize_with = "crate::migrate::history_from_any")]
    pub history: BTreeMap<NaiveDate, HabitEntry>,
    #[serde(default, skip_serializing_if = "HabitTarget::is_none")]
    pub target: HabitTarget,
    pub start_on: NaiveDate,
    #[serde(default)]
    pub end_on: Option<NaiveDate>,
}

impl Habit {
    pub fn has_started(&self, today: NaiveDate) -> bool {
        self.start_on <= today
    }

    pub fn has_ended(&self, today: NaiveDate) -> bool {
        self.end_on.is_some_and(|end| end < today)
    }

    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.has_started(today) && !self.has_ended(today)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    pub schedule: Schedule,
    #[serde(default)]
    pub end_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reminder_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub recurrence: Option<Recurrence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubItems {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub habits: Vec<Habit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commitment {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub review_frequency: ReviewFrequency,
    #[serde(default)]
    pub last_reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: CommitmentStatus,
    #[serde(default)]
    pub sub_items: SubItems,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Commitment {
    pub fn tasks(&self) -> &[Task] {
        &self.sub_items.tasks
    }

    pub fn habits(&self) -> &[Habit] {
        &self.sub_items.habits
    }
}

/// Discrete urgency tier. Declared most-urgent-first so the derived `Ord`
/// sorts ascending from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UrgencyLevel {
    Urgent,
    Upcoming,
    Tomorrow,
    Normal,
}

impl UrgencyLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::Upcoming => "upcoming",
            Self::Tomorrow => "tomorrow",
            Self::Normal => "normal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Task,
    Habit,
    Event,
    Review,
}

/// Derived timeline row: one time-relevant sub-entity with its resolved
/// day-granularity date (already day-boundary adjusted). Not persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBasedEntity {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub kind: EntityKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Highlight {
    Urgent,
    Upcoming,
    Normal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightGroup {
    pub entities: Vec<TimeBasedEntity>,
    pub highlight: Highlight,
}
