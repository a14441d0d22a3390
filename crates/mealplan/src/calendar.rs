use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use mealshuffler_shared::mealplan::{Day, Week};

use crate::{Error, Result};

/// Last week number `generate_weeks` produces. ISO years with a week 53 are
/// cut short and nothing spills into the next year.
pub const LAST_GENERATED_WEEK: u32 = 52;

/// Monday 00:00:00 UTC of the given ISO week.
pub fn iso_week_monday(year: i32, week: u32) -> Result<DateTime<Utc>> {
    let monday = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
        .ok_or(Error::InvalidIsoWeek { year, week })?;

    Ok(monday.and_time(NaiveTime::MIN).and_utc())
}

/// Returns the seven empty days (Monday first) of an ISO week.
pub fn generate_days(year: i32, week: u32) -> Result<Vec<Day>> {
    let monday = iso_week_monday(year, week)?;

    Ok((0..7)
        .map(|offset| Day::new(monday + Duration::days(offset)))
        .collect())
}

/// Returns the weeks from the ISO week containing `start_time` up to week 52
/// of the same ISO year.
pub fn generate_weeks(start_time: DateTime<Utc>) -> Result<Vec<Week>> {
    let iso = start_time.iso_week();
    let year = iso.year();

    (iso.week()..=LAST_GENERATED_WEEK)
        .map(|week| Ok(Week::new(year, week as i32, generate_days(year, week)?)))
        .collect()
}
