use crate::day::DayContext;
use crate::models::{
    Commitment, EntityKind, Highlight, HighlightGroup, TimeBasedEntity,
};
use crate::recurrence::{next_event_date, next_habit_date};
use crate::review::next_review_date;
use chrono::NaiveDate;
use tracing::debug;

/// Unified timeline for one commitment: every time-relevant sub-entity with
/// its resolved next date, earliest first. Recurring entities that resolve
/// to nothing (ended series, unknown schedules) are omitted; completed or
/// undated tasks are omitted; the commitment's own review cycle contributes
/// exactly one entry.
pub fn time_based_entities(commitment: &Commitment, ctx: &DayContext) -> Vec<TimeBasedEntity> {
    let mut entities = Vec::new();

    for event in &commitment.events {
        if let Some(date) = next_event_date(event, ctx) {
            entities.push(TimeBasedEntity {
                id: event.id.clone(),
                title: event.title.clone(),
                date,
                kind: EntityKind::Event,
            });
        }
    }

    for task in commitment.tasks() {
        if task.completed {
            continue;
        }
        if let Some(due_at) = task.due_at {
            entities.push(TimeBasedEntity {
                id: task.id.clone(),
                title: task.title.clone(),
                date: ctx.logical_date(due_at),
                kind: EntityKind::Task,
            });
        }
    }

    for habit in commitment.habits() {
        if let Some(date) = next_habit_date(habit, ctx) {
            entities.push(TimeBasedEntity {
                id: habit.id.clone(),
                title: habit.title.clone(),
                date,
                kind: EntityKind::Habit,
            });
        }
    }

    entities.push(TimeBasedEntity {
        id: commitment.id.clone(),
        title: commitment.title.clone(),
        date: ctx.logical_date(next_review_date(commitment, ctx)),
        kind: EntityKind::Review,
    });

    entities.sort_by_key(|entity| entity.date);
    debug!(
        commitment_id = %commitment.id,
        entities = entities.len(),
        "built commitment timeline"
    );
    entities
}

/// Earliest date on the commitment's timeline. Drives the commitment
/// comparator's tie-break.
pub fn most_urgent_date(commitment: &Commitment, ctx: &DayContext) -> Option<NaiveDate> {
    time_based_entities(commitment, ctx)
        .first()
        .map(|entity| entity.date)
}

/// The most actionable subset of the timeline, grouped for display.
///
/// Events are judged by their reminder: occurring today or tomorrow makes
/// them upcoming, otherwise a fired reminder for a still-pending event makes
/// them urgent (never both; the today/tomorrow check runs first). Tasks,
/// habits, and the review entry are judged by deadline: strictly before
/// today is urgent, exactly today is upcoming. When nothing qualifies, the
/// single most urgent timeline entry is surfaced as a normal group.
pub fn highlighted_groups(commitment: &Commitment, ctx: &DayContext) -> Vec<HighlightGroup> {
    let today = ctx.today();
    let tomorrow = ctx.tomorrow();

    let mut upcoming_events = Vec::new();
    let mut urgent_events = Vec::new();
    for event in &commitment.events {
        let Some(occurrence) = next_event_date(event, ctx) else {
            continue;
        };
        let entity = TimeBasedEntity {
            id: event.id.clone(),
            title: event.title.clone(),
            date: occurrence,
            kind: EntityKind::Event,
        };
        if occurrence == today || occurrence == tomorrow {
            upcoming_events.push(entity);
        } else if event.reminder_time.is_some_and(|reminder| reminder <= ctx.now())
            && occurrence >= today
        {
            urgent_events.push(entity);
        }
    }

    let mut urgent_others = Vec::new();
    let mut upcoming_others = Vec::new();
    for entity in time_based_entities(commitment, ctx) {
        if entity.kind == EntityKind::Event {
            continue;
        }
        if entity.date < today {
            urgent_others.push(entity);
        } else if entity.date == today {
            upcoming_others.push(entity);
        }
    }

    let mut groups = Vec::new();
    if !urgent_events.is_empty() {
        groups.push(HighlightGroup {
            entities: urgent_events,
            highlight: Highlight::Urgent,
        });
    }
    if !upcoming_events.is_empty() {
        groups.push(HighlightGroup {
            entities: upcoming_events,
            highlight: Highlight::Upcoming,
        });
    }
    if !urgent_others.is_empty() {
        groups.push(HighlightGroup {
            entities: urgent_others,
            highlight: Highlight::Urgent,
        });
    }
    if !upcoming_others.is_empty() {
        groups.push(HighlightGroup {
            entities: upcoming_others,
            highlight: Highlight::Upcoming,
        });
    }

    if groups.is_empty() {
        if let Some(first) = time_based_entities(commitment, ctx).into_iter().next() {
            groups.push(HighlightGroup {
                entities: vec![first],
                highlight: Highlight::Normal,
            });
        }
    }

    groups.sort_by_key(|group| group.highlight);
    groups
}
