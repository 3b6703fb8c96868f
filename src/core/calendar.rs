use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, Utc};

/// Calendar abstracts the clock and day arithmetic so plan windows remain
/// deterministic in tests and independent of the host time zone.
pub trait Calendar: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Offset used to decide which calendar day an instant falls on.
    fn offset(&self) -> FixedOffset;

    /// Calendar day containing `instant` in this calendar's offset.
    fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset()).date_naive()
    }

    /// Returns the current calendar day. Defaults to `day_of(now())`.
    fn today(&self) -> NaiveDate {
        self.day_of(self.now())
    }

    /// Moves `day` by `days` calendar days; `None` past the supported range.
    fn add_days(&self, day: NaiveDate, days: i64) -> Option<NaiveDate> {
        day.checked_add_signed(Duration::days(days))
    }

    fn is_same_day(&self, a: NaiveDate, b: NaiveDate) -> bool {
        a == b
    }

    /// Every calendar day from `start` to `end` inclusive, ascending.
    fn days_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        let mut cursor = Some(start);
        while let Some(day) = cursor {
            if day > end {
                break;
            }
            days.push(day);
            cursor = self.add_days(day, 1);
        }
        days
    }
}

/// Wall-clock calendar evaluated at a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemCalendar {
    offset: FixedOffset,
}

impl SystemCalendar {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(utc_offset())
    }

    /// Builds a calendar from an offset in minutes east of UTC, falling back
    /// to UTC when the offset is out of range.
    pub fn from_offset_minutes(minutes: i32) -> Self {
        match minutes.checked_mul(60).and_then(FixedOffset::east_opt) {
            Some(offset) => Self::new(offset),
            None => {
                tracing::warn!(minutes, "UTC offset out of range, using UTC");
                Self::utc()
            }
        }
    }
}

impl Default for SystemCalendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl Calendar for SystemCalendar {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Calendar pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedCalendar {
    now: DateTime<Utc>,
    offset: FixedOffset,
}

impl FixedCalendar {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { now, offset }
    }

    /// Calendar whose `today()` is `day` (UTC midnight).
    pub fn on(day: NaiveDate) -> Self {
        let now = day.and_time(NaiveTime::MIN).and_utc();
        Self::new(now, utc_offset())
    }
}

impl Calendar for FixedCalendar {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}
