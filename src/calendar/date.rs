use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DATE_TIME: Regex = Regex::new(r"^(\d{4})(\d{2})(\d{2})T(\d{2})(\d{2})(\d{2})(Z)?$")
        .expect("Failed to create date-time regex");
    static ref DATE_ONLY: Regex =
        Regex::new(r"^(\d{4})(\d{2})(\d{2})$").expect("Failed to create date regex");
}

/// Parses a `DTSTART`/`DTEND` value in the local time zone.
pub fn parse_ics_date(value: &str) -> Option<DateTime<Local>> {
    parse_ics_date_in(value, &Local)
}

/// Parses `YYYYMMDDTHHMMSSZ` (UTC), `YYYYMMDDTHHMMSS` (wall clock in `tz`) and `YYYYMMDD`
/// (midnight in `tz`). Any other shape, or an impossible date, yields `None`.
pub fn parse_ics_date_in<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let value = value.trim();

    if let Some(captures) = DATE_TIME.captures(value) {
        let date = naive_date(&captures[1], &captures[2], &captures[3])?;
        let time = NaiveTime::from_hms_opt(
            captures[4].parse().ok()?,
            captures[5].parse().ok()?,
            captures[6].parse().ok()?,
        )?;
        let date_time = NaiveDateTime::new(date, time);

        return if captures.get(7).is_some() {
            Some(Utc.from_utc_datetime(&date_time).with_timezone(tz))
        } else {
            wall_clock_in(tz, date_time)
        };
    }

    let captures = DATE_ONLY.captures(value)?;
    let date = naive_date(&captures[1], &captures[2], &captures[3])?;

    wall_clock_in(tz, date.and_time(NaiveTime::MIN))
}

/// Resolves a wall-clock time in `tz`, picking the earlier instant when a DST shift makes it
/// ambiguous and the first instant after the gap when it does not exist.
pub fn wall_clock_in<Tz: TimeZone>(tz: &Tz, date_time: NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&date_time).earliest().or_else(|| {
        tz.from_local_datetime(&(date_time + chrono::Duration::hours(1)))
            .earliest()
    })
}

pub fn start_of_day(date: NaiveDate) -> Option<DateTime<Local>> {
    wall_clock_in(&Local, date.and_time(NaiveTime::MIN))
}

/// Last millisecond of `date` in the local zone.
pub fn end_of_day(date: NaiveDate) -> Option<DateTime<Local>> {
    wall_clock_in(&Local, date.and_hms_milli_opt(23, 59, 59, 999)?)
}

pub fn is_local_midnight(date_time: &DateTime<Local>) -> bool {
    date_time.time() == NaiveTime::MIN
}

fn naive_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test_log::test]
    fn should_parse_utc_timestamp() {
        let result = parse_ics_date("20260101T120000Z").unwrap();

        assert_eq!(
            result.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
        );
    }

    #[test_log::test]
    fn should_parse_floating_timestamp_as_wall_clock() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();

        let result = parse_ics_date_in("20260704T213000", &tz).unwrap();

        assert_eq!(result, tz.with_ymd_and_hms(2026, 7, 4, 21, 30, 0).unwrap());
    }

    #[test_log::test]
    fn should_parse_date_only_as_local_midnight() {
        let result = parse_ics_date("20260101").unwrap();

        assert_eq!(result, Local.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    }

    #[test_log::test]
    fn utc_timestamp_should_not_depend_on_the_zone() {
        let tz = FixedOffset::east_opt(9 * 3600).unwrap();

        let result = parse_ics_date_in("20260101T120000Z", &tz).unwrap();

        assert_eq!(result, tz.with_ymd_and_hms(2026, 1, 1, 21, 0, 0).unwrap());
    }

    #[test_log::test]
    fn day_bounds_should_cover_the_whole_day() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();

        let start = start_of_day(date).unwrap();
        let end = end_of_day(date).unwrap();

        assert!(is_local_midnight(&start));
        assert!(!is_local_midnight(&end));
        assert_eq!(start.date_naive(), date);
        assert_eq!(end.date_naive(), date);
        assert_eq!(end.time(), NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap());
    }

    #[test_log::test]
    fn other_shapes_should_not_parse() {
        for value in [
            "not-a-date",
            "",
            "2026-01-01",
            "20260101T1200",
            "20260101T120000+0100",
            "20261301",
            "20260230T100000Z",
            "20260101T250000",
        ] {
            assert_eq!(parse_ics_date(value), None, "{value}");
        }
    }
}
