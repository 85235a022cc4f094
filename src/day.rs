use crate::settings::EngineSettings;
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Timelike, Utc, Weekday};

/// Injectable time source. Aggregation samples the clock exactly once per
/// pass so every classification within that pass agrees on "now".
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed-instant clock for deterministic tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// One sampled "now" plus the day/week boundary rules derived from settings.
///
/// A timestamp whose wall-clock hour is before `day_start_hour` belongs to
/// the previous logical day. Every "today" in the engine goes through this
/// adjustment; a plain `Utc::now().date_naive()` would misclassify early
/// mornings for anyone with a nonzero day start.
#[derive(Debug, Clone, Copy)]
pub struct DayContext {
    now: DateTime<Utc>,
    day_start_hour: u8,
    week_start: Weekday,
}

impl DayContext {
    pub fn new(settings: &EngineSettings, now: DateTime<Utc>) -> Self {
        Self {
            now,
            day_start_hour: settings.day_start_hour,
            week_start: settings.week_start,
        }
    }

    pub fn from_clock(settings: &EngineSettings, clock: &impl Clock) -> Self {
        Self::new(settings, clock.now())
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Calendar date the timestamp logically belongs to.
    pub fn logical_date(&self, t: DateTime<Utc>) -> NaiveDate {
        let date = t.date_naive();
        if t.hour() < u32::from(self.day_start_hour) {
            date.pred_opt().unwrap_or(date)
        } else {
            date
        }
    }

    /// Instant the timestamp's logical day began.
    pub fn start_of_day(&self, t: DateTime<Utc>) -> DateTime<Utc> {
        let boundary = NaiveTime::from_hms_opt(u32::from(self.day_start_hour), 0, 0)
            .unwrap_or(NaiveTime::MIN);
        self.logical_date(t).and_time(boundary).and_utc()
    }

    pub fn start_of_today(&self) -> DateTime<Utc> {
        self.start_of_day(self.now)
    }

    pub fn today(&self) -> NaiveDate {
        self.logical_date(self.now)
    }

    pub fn tomorrow(&self) -> NaiveDate {
        self.today().succ_opt().unwrap_or_else(|| self.today())
    }

    pub fn is_same_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.logical_date(a) == self.logical_date(b)
    }

    pub fn is_today(&self, t: DateTime<Utc>) -> bool {
        self.logical_date(t) == self.today()
    }

    /// First day of the week containing `date`, per the configured anchor.
    pub fn week_start_of(&self, date: NaiveDate) -> NaiveDate {
        let back = date.weekday().days_since(self.week_start);
        date - Days::new(u64::from(back))
    }
}
