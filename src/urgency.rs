use crate::day::DayContext;
use crate::models::{Commitment, Event, Habit, Task, UrgencyLevel};
use crate::recurrence::{next_event_date, next_habit_date};
use crate::review::is_review_due;
use chrono::NaiveDate;

fn classify_date(due: NaiveDate, ctx: &DayContext) -> UrgencyLevel {
    if due < ctx.today() {
        UrgencyLevel::Urgent
    } else if due == ctx.today() {
        UrgencyLevel::Upcoming
    } else if due == ctx.tomorrow() {
        UrgencyLevel::Tomorrow
    } else {
        UrgencyLevel::Normal
    }
}

pub fn task_urgency(task: &Task, ctx: &DayContext) -> UrgencyLevel {
    if task.completed {
        return UrgencyLevel::Normal;
    }
    match task.due_at {
        Some(due_at) => classify_date(ctx.logical_date(due_at), ctx),
        None => UrgencyLevel::Normal,
    }
}

pub fn habit_urgency(habit: &Habit, ctx: &DayContext) -> UrgencyLevel {
    if !habit.is_active(ctx.today()) {
        return UrgencyLevel::Normal;
    }
    match next_habit_date(habit, ctx) {
        Some(due) => classify_date(due, ctx),
        None => UrgencyLevel::Normal,
    }
}

/// Events have two rules of their own: a reminder that has already fired
/// for an event that has not happened yet outranks the today/tomorrow
/// checks, and a past occurrence is merely stale, never urgent — deadlines
/// can be missed, events just happen.
pub fn event_urgency(event: &Event, ctx: &DayContext) -> UrgencyLevel {
    let Some(occurrence) = next_event_date(event, ctx) else {
        return UrgencyLevel::Normal;
    };
    if let Some(reminder) = event.reminder_time {
        if reminder <= ctx.now() && occurrence >= ctx.today() {
            return UrgencyLevel::Urgent;
        }
    }
    if occurrence == ctx.today() {
        UrgencyLevel::Upcoming
    } else if occurrence == ctx.tomorrow() {
        UrgencyLevel::Tomorrow
    } else {
        UrgencyLevel::Normal
    }
}

/// Aggregate level: an overdue review wins outright, otherwise the most
/// urgent level found among the commitment's tasks, habits, and events.
pub fn commitment_urgency(commitment: &Commitment, ctx: &DayContext) -> UrgencyLevel {
    if is_review_due(commitment, ctx) {
        return UrgencyLevel::Urgent;
    }
    let tasks = commitment.tasks().iter().map(|t| task_urgency(t, ctx));
    let habits = commitment.habits().iter().map(|h| habit_urgency(h, ctx));
    let events = commitment.events.iter().map(|e| event_urgency(e, ctx));
    tasks
        .chain(habits)
        .chain(events)
        .min()
        .unwrap_or(UrgencyLevel::Normal)
}
