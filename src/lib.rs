//! Urgency and scheduling engine for a local commitments tracker.
//!
//! Pure date arithmetic over immutable entity snapshots: given a
//! commitment's tasks, habits, events, and review cycle plus one sampled
//! "now", the engine resolves next due dates, classifies urgency, builds a
//! unified timeline, and provides total-order comparators for display. It
//! owns no state and performs no I/O; the surrounding UI persists the
//! snapshots and renders the results.

pub mod aggregate;
pub mod day;
pub mod errors;
pub mod migrate;
pub mod models;
pub mod recurrence;
pub mod review;
pub mod settings;
pub mod sort;
pub mod urgency;

pub use crate::aggregate::{highlighted_groups, most_urgent_date, time_based_entities};
pub use crate::day::{Clock, DayContext, FixedClock, SystemClock};
pub use crate::errors::{EngineError, EngineResult};
pub use crate::migrate::upgrade_legacy_history;
pub use crate::models::{
    Commitment, CommitmentStatus, EntityKind, EntryValue, Event, Habit, HabitEntry,
    HabitTarget, Highlight, HighlightGroup, Note, Recurrence, ReviewFrequency, Schedule,
    SubItems, Task, TimeBasedEntity, UrgencyLevel,
};
pub use crate::recurrence::{next_event_date, next_habit_date};
pub use crate::review::{is_review_due, next_review_date, review_frequency_text};
pub use crate::settings::EngineSettings;
pub use crate::sort::{cmp_commitments, cmp_events, cmp_habits, cmp_tasks};
pub use crate::urgency::{commitment_urgency, event_urgency, habit_urgency, task_urgency};
