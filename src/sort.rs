use crate::aggregate::most_urgent_date;
use crate::day::DayContext;
use crate::models::{Commitment, Event, Habit, Task};
use crate::recurrence::{next_event_date, next_habit_date};
use crate::review::is_review_due;
use crate::urgency::{commitment_urgency, event_urgency, habit_urgency, task_urgency};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Incomplete before completed, then by urgency tier, then by earliest due
/// date with dated tasks ahead of undated ones.
pub fn cmp_tasks(a: &Task, b: &Task, ctx: &DayContext) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| task_urgency(a, ctx).cmp(&task_urgency(b, ctx)))
        .then_with(|| cmp_dates_some_first(a.due_at, b.due_at))
}

fn cmp_dates_some_first<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Active habits first. Inactive habits split into not-yet-started (soonest
/// start first) ahead of already-ended (most recent end first). Active
/// habits order by urgency, then next due date, with same-day ties going to
/// the finer schedule; habits with no resolvable next date sort last.
pub fn cmp_habits(a: &Habit, b: &Habit, ctx: &DayContext) -> Ordering {
    let today = ctx.today();
    match (a.is_active(today), b.is_active(today)) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => return cmp_inactive_habits(a, b, today),
        (true, true) => {}
    }

    habit_urgency(a, ctx)
        .cmp(&habit_urgency(b, ctx))
        .then_with(|| {
            match (next_habit_date(a, ctx), next_habit_date(b, ctx)) {
                (Some(da), Some(db)) if da == db => {
                    a.schedule.granularity().cmp(&b.schedule.granularity())
                }
                (da, db) => cmp_dates_some_first(da, db),
            }
        })
}

fn cmp_inactive_habits(a: &Habit, b: &Habit, today: NaiveDate) -> Ordering {
    let a_pending = !a.has_started(today);
    let b_pending = !b.has_started(today);
    match (a_pending, b_pending) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (true, true) => a.start_on.cmp(&b.start_on),
        // Both ended: most recently ended first.
        (false, false) => b.end_on.cmp(&a.end_on),
    }
}

/// Past views show most-recent-first regardless of urgency; live views
/// order by urgency tier then ascending occurrence date.
pub fn cmp_events(a: &Event, b: &Event, ctx: &DayContext, past_view: bool) -> Ordering {
    let da = next_event_date(a, ctx);
    let db = next_event_date(b, ctx);
    if past_view {
        return cmp_dates_some_first(db, da);
    }
    event_urgency(a, ctx)
        .cmp(&event_urgency(b, ctx))
        .then_with(|| cmp_dates_some_first(da, db))
}

/// By aggregate urgency, tie-broken by the earliest date on each
/// commitment's timeline, then by overdue-review flag, then by most
/// recently reviewed.
pub fn cmp_commitments(a: &Commitment, b: &Commitment, ctx: &DayContext) -> Ordering {
    commitment_urgency(a, ctx)
        .cmp(&commitment_urgency(b, ctx))
        .then_with(
            || match (most_urgent_date(a, ctx), most_urgent_date(b, ctx)) {
                (Some(da), Some(db)) if da != db => da.cmp(&db),
                (Some(_), Some(_)) | (None, None) => {
                    let overdue = is_review_due(b, ctx).cmp(&is_review_due(a, ctx));
                    overdue.then_with(|| b.last_reviewed_at.cmp(&a.last_reviewed_at))
                }
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HabitTarget, Schedule, SubItems};
    use crate::settings::EngineSettings;
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::BTreeMap;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single().expect("valid instant")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn ctx() -> DayContext {
        DayContext::new(&EngineSettings::default(), at(2024, 3, 10, 12))
    }

    fn task(id: &str, due_at: Option<DateTime<Utc>>, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {id}"),
            due_at,
            completed,
        }
    }

    fn habit(id: &str, schedule: Schedule, start_on: NaiveDate) -> Habit {
        Habit {
            id: id.to_string(),
            title: format!("Habit {id}"),
            schedule,
            history: BTreeMap::new(),
            target: HabitTarget::None,
            start_on,
            end_on: None,
        }
    }

    fn event(id: &str, on: NaiveDate) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {id}"),
            date: on,
            time: None,
            is_all_day: true,
            location: None,
            description: None,
            reminder_time: None,
            recurrence: None,
        }
    }

    #[test]
    fn incomplete_tasks_sort_before_completed() {
        let context = ctx();
        let done = task("done", Some(at(2024, 3, 1, 9)), true);
        let open = task("open", None, false);
        assert_eq!(cmp_tasks(&open, &done, &context), Ordering::Less);
        assert_eq!(cmp_tasks(&done, &open, &context), Ordering::Greater);
    }

    #[test]
    fn tasks_order_by_urgency_then_due_date() {
        let context = ctx();
        let overdue = task("a", Some(at(2024, 3, 8, 9)), false);
        let today = task("b", Some(at(2024, 3, 10, 18)), false);
        let later = task("c", Some(at(2024, 3, 20, 9)), false);
        let undated = task("d", None, false);

        let mut tasks = vec![undated, later, today, overdue];
        tasks.sort_by(|a, b| cmp_tasks(a, b, &context));
        let ids: Vec<_> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn task_comparator_is_sign_antisymmetric() {
        let context = ctx();
        let pool = vec![
            task("a", Some(at(2024, 3, 8, 9)), false),
            task("b", Some(at(2024, 3, 10, 18)), false),
            task("c", None, false),
            task("d", Some(at(2024, 3, 8, 9)), true),
            task("e", None, true),
        ];
        for a in &pool {
            for b in &pool {
                assert_eq!(
                    cmp_tasks(a, b, &context),
                    cmp_tasks(b, a, &context).reverse(),
                    "{} vs {}",
                    a.id,
                    b.id
                );
            }
        }
    }

    #[test]
    fn active_habits_sort_before_inactive() {
        let context = ctx();
        let active = habit("active", Schedule::Daily, date(2024, 1, 1));
        let pending = habit("pending", Schedule::Daily, date(2024, 4, 1));
        let mut ended = habit("ended", Schedule::Daily, date(2024, 1, 1));
        ended.end_on = Some(date(2024, 2, 1));

        let mut habits = vec![ended, pending, active];
        habits.sort_by(|a, b| cmp_habits(a, b, &context));
        let ids: Vec<_> = habits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["active", "pending", "ended"]);
    }

    #[test]
    fn pending_habits_sort_by_soonest_start() {
        let context = ctx();
        let soon = habit("soon", Schedule::Daily, date(2024, 3, 15));
        let later = habit("later", Schedule::Daily, date(2024, 5, 1));
        assert_eq!(cmp_habits(&soon, &later, &context), Ordering::Less);
    }

    #[test]
    fn ended_habits_sort_most_recent_first() {
        let context = ctx();
        let mut old = habit("old", Schedule::Daily, date(2023, 1, 1));
        old.end_on = Some(date(2023, 6, 1));
        let mut recent = habit("recent", Schedule::Daily, date(2023, 1, 1));
        recent.end_on = Some(date(2024, 2, 1));
        assert_eq!(cmp_habits(&recent, &old, &context), Ordering::Less);
    }

    #[test]
    fn same_day_habits_tie_break_on_granularity() {
        let context = ctx();
        // Both due today with empty histories.
        let daily = habit("daily", Schedule::Daily, date(2024, 1, 1));
        let weekly = habit("weekly", Schedule::Weekly, date(2024, 1, 1));
        let monthly = habit("monthly", Schedule::Monthly, date(2024, 1, 1));

        let mut habits = vec![monthly, daily, weekly];
        habits.sort_by(|a, b| cmp_habits(a, b, &context));
        let ids: Vec<_> = habits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["daily", "weekly", "monthly"]);
    }

    #[test]
    fn unresolvable_habits_sort_last_among_active() {
        let context = ctx();
        let resolvable = habit("ok", Schedule::Daily, date(2024, 1, 1));
        let unknown = habit("unknown", Schedule::Unknown, date(2024, 1, 1));
        assert_eq!(cmp_habits(&resolvable, &unknown, &context), Ordering::Less);
        assert_eq!(cmp_habits(&unknown, &resolvable, &context), Ordering::Greater);
    }

    #[test]
    fn live_events_order_by_urgency_then_date() {
        let context = ctx();
        let today = event("today", date(2024, 3, 10));
        let tomorrow = event("tomorrow", date(2024, 3, 11));
        let later = event("later", date(2024, 3, 25));
        let mut reminded = event("reminded", date(2024, 3, 20));
        reminded.reminder_time = Some(at(2024, 3, 9, 8));

        let mut events = vec![later, tomorrow, today, reminded];
        events.sort_by(|a, b| cmp_events(a, b, &context, false));
        let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["reminded", "today", "tomorrow", "later"]);
    }

    #[test]
    fn stale_past_events_sort_after_live_ones() {
        let context = ctx();
        let past = event("past", date(2024, 3, 1));
        let today = event("today", date(2024, 3, 10));
        // A past occurrence is Normal, so it trails today's event despite
        // having the earlier date.
        assert_eq!(cmp_events(&today, &past, &context, false), Ordering::Less);
        assert_eq!(cmp_events(&past, &today, &context, false), Ordering::Greater);
    }

    #[test]
    fn past_view_is_most_recent_first() {
        let context = ctx();
        let older = event("older", date(2024, 2, 1));
        let newer = event("newer", date(2024, 3, 5));
        assert_eq!(cmp_events(&newer, &older, &context, true), Ordering::Less);
        assert_eq!(cmp_events(&older, &newer, &context, true), Ordering::Greater);
    }

    #[test]
    fn event_comparator_is_sign_antisymmetric() {
        let context = ctx();
        let pool = vec![
            event("a", date(2024, 3, 10)),
            event("b", date(2024, 3, 11)),
            event("c", date(2024, 2, 1)),
        ];
        for past_view in [false, true] {
            for a in &pool {
                for b in &pool {
                    assert_eq!(
                        cmp_events(a, b, &context, past_view),
                        cmp_events(b, a, &context, past_view).reverse()
                    );
                }
            }
        }
    }

    fn commitment(id: &str, last_reviewed_at: Option<DateTime<Utc>>) -> Commitment {
        Commitment {
            id: id.to_string(),
            title: format!("Commitment {id}"),
            description: String::new(),
            created_at: at(2024, 1, 1, 0),
            review_frequency: Default::default(),
            last_reviewed_at,
            status: Default::default(),
            sub_items: SubItems::default(),
            notes: vec![],
            events: vec![],
        }
    }

    #[test]
    fn commitments_order_by_aggregate_urgency() {
        let context = ctx();
        // Overdue review vs recently reviewed.
        let overdue = commitment("overdue", Some(at(2024, 2, 1, 9)));
        let calm = commitment("calm", Some(at(2024, 3, 9, 9)));
        assert_eq!(cmp_commitments(&overdue, &calm, &context), Ordering::Less);
    }

    #[test]
    fn equal_urgency_breaks_tie_on_earliest_timeline_date() {
        let context = ctx();
        let mut near = commitment("near", Some(at(2024, 3, 9, 9)));
        near.sub_items.tasks = vec![task("t1", Some(at(2024, 3, 12, 9)), false)];
        let mut far = commitment("far", Some(at(2024, 3, 9, 9)));
        far.sub_items.tasks = vec![task("t2", Some(at(2024, 3, 14, 9)), false)];
        assert_eq!(cmp_commitments(&near, &far, &context), Ordering::Less);
    }

    #[test]
    fn equal_dates_fall_back_to_most_recently_reviewed() {
        let context = ctx();
        // Reviewed the same day, hours apart: identical timeline dates, so
        // the more recently reviewed commitment sorts first.
        let fresh = commitment("fresh", Some(at(2024, 3, 9, 9)));
        let stale = commitment("stale", Some(at(2024, 3, 9, 7)));
        assert_eq!(cmp_commitments(&fresh, &stale, &context), Ordering::Less);
    }
}
