use crate::day::DayContext;
use crate::models::{Event, Habit, Schedule};
use chrono::{Datelike, Days, NaiveDate};

pub(crate) fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub(crate) fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    match first {
        Some(first) => (first_of_next_month(first) - first).num_days() as u32,
        None => 31,
    }
}

/// The anchor day-of-month in the month following `current`, clamped to
/// that month's length. Jan 31 recurring monthly lands on Feb 28/29, and
/// the anchor is preserved so March yields the 31st again.
fn next_month_anchored(current: NaiveDate, anchor_day: u32) -> NaiveDate {
    let first = first_of_next_month(current);
    let day = anchor_day.min(days_in_month(first.year(), first.month()));
    NaiveDate::from_ymd_opt(first.year(), first.month(), day).unwrap_or(first)
}

/// Next date a habit is due on or after the context's today, at day
/// granularity. `None` means nothing is due (ended, or unknown schedule).
pub fn next_habit_date(habit: &Habit, ctx: &DayContext) -> Option<NaiveDate> {
    let today = ctx.today();
    if habit.schedule == Schedule::Unknown {
        return None;
    }
    if !habit.has_started(today) {
        return Some(habit.start_on);
    }
    if habit.has_ended(today) {
        return None;
    }

    let period_start = match habit.schedule {
        Schedule::Daily => today,
        Schedule::Weekly => ctx.week_start_of(today),
        Schedule::Monthly => first_of_month(today),
        Schedule::Unknown => return None,
    };
    let done_this_period = habit
        .history
        .range(period_start..=today)
        .any(|(_, entry)| entry.completed);

    let due = if done_this_period {
        match habit.schedule {
            Schedule::Daily => today.succ_opt()?,
            Schedule::Weekly => ctx.week_start_of(today) + Days::new(7),
            Schedule::Monthly => first_of_next_month(today),
            Schedule::Unknown => return None,
        }
    } else {
        today
    };

    match habit.end_on {
        Some(end) if due > end => None,
        _ => Some(due),
    }
}

/// Next occurrence of an event on or after the context's today.
///
/// One-off events return their own date regardless of past or future; the
/// caller decides relevance. Recurring events return the smallest
/// occurrence on or after today, or `None` once the series has ended.
pub fn next_event_date(event: &Event, ctx: &DayContext) -> Option<NaiveDate> {
    let today = ctx.today();
    let Some(recurrence) = &event.recurrence else {
        return Some(event.date);
    };
    if recurrence.end_on.is_some_and(|end| end < today) {
        return None;
    }
    if event.date >= today {
        return Some(event.date);
    }

    let next = match recurrence.schedule {
        Schedule::Daily => today,
        Schedule::Weekly => {
            let gap = (today - event.date).num_days();
            let weeks = (gap + 6) / 7;
            event.date + Days::new((weeks * 7) as u64)
        }
        Schedule::Monthly => {
            let anchor = event.date.day();
            let mut occurrence = event.date;
            while occurrence < today {
                occurrence = next_month_anchored(occurrence, anchor);
            }
            occurrence
        }
        Schedule::Unknown => return None,
    };

    match recurrence.end_on {
        Some(end) if next > end => None,
        _ => Some(next),
    }
}
