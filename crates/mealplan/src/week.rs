use mealgrid_shared::mealplan::Day;
use time::{Date, Duration, OffsetDateTime, UtcOffset, Weekday};
use time_tz::{ToTimezone, Tz, timezones};

/// Resolves the canonical `week_start` date of the week containing an instant.
///
/// Weeks begin on `first_day` in `timezone` (UTC when none is given). Every
/// instant of the same calendar week resolves to the same date.
#[derive(Debug, Clone, Copy)]
pub struct WeekResolver {
    first_day: Weekday,
    timezone: Option<&'static Tz>,
}

impl Default for WeekResolver {
    fn default() -> Self {
        Self {
            first_day: Weekday::Monday,
            timezone: None,
        }
    }
}

impl WeekResolver {
    pub fn new(first_day: Day, timezone: Option<&str>) -> mealgrid_shared::Result<Self> {
        let timezone = match timezone {
            Some(name) => match timezones::get_by_name(name) {
                Some(tz) => Some(tz),
                None => mealgrid_shared::invalid!("unknown timezone '{name}'"),
            },
            None => None,
        };

        Ok(Self {
            first_day: first_day.weekday(),
            timezone,
        })
    }

    pub fn resolve(&self, now: OffsetDateTime) -> Date {
        let local = match self.timezone {
            Some(tz) => now.to_timezone(tz),
            None => now.to_offset(UtcOffset::UTC),
        };

        week_start(local.date(), self.first_day)
    }

    /// Reads the wall clock. Only the transport layer should call this.
    pub fn current(&self) -> Date {
        self.resolve(OffsetDateTime::now_utc())
    }
}

/// Walks `date` back to the closest `first_day`, itself included.
pub fn week_start(date: Date, first_day: Weekday) -> Date {
    let days_back = (7 + date.weekday().number_days_from_monday()
        - first_day.number_days_from_monday())
        % 7;

    date - Duration::days(days_back as i64)
}

/// Storage form of a week key: unix timestamp of its midnight UTC.
pub fn to_timestamp(week_start: Date) -> i64 {
    week_start.midnight().assume_utc().unix_timestamp()
}

pub fn from_timestamp(timestamp: i64) -> mealgrid_shared::Result<Date> {
    Ok(OffsetDateTime::from_unix_timestamp(timestamp)?.date())
}
