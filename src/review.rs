use crate::day::DayContext;
use crate::models::{Commitment, ReviewFrequency};
use chrono::{DateTime, Duration, Utc};

/// When the commitment should next be reviewed. A commitment that has never
/// been reviewed is due immediately. Custom cron frequencies are not
/// evaluated yet and fall back to the weekly interval.
pub fn next_review_date(commitment: &Commitment, ctx: &DayContext) -> DateTime<Utc> {
    match commitment.last_reviewed_at {
        Some(last) => {
            last + Duration::days(commitment.review_frequency.effective_interval_days())
        }
        None => ctx.now(),
    }
}

pub fn is_review_due(commitment: &Commitment, ctx: &DayContext) -> bool {
    next_review_date(commitment, ctx) <= ctx.now()
}

pub fn review_frequency_text(commitment: &Commitment) -> String {
    match &commitment.review_frequency {
        ReviewFrequency::Custom { .. } => "Custom schedule".to_string(),
        ReviewFrequency::Interval { interval_days } => match interval_days.unwrap_or(7) {
            1 => "Daily".to_string(),
            7 => "Weekly".to_string(),
            14 => "Every two weeks".to_string(),
            30 => "Monthly".to_string(),
            90 => "Quarterly".to_string(),
            n => format!("Every {n} days"),
        },
    }
}
