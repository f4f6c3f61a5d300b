use super::date::{end_of_day, is_local_midnight};
use super::model::EventRecord;
use chrono::{DateTime, Duration, Local};
use tracing::{debug, info};

pub const DEFAULT_GRACE_DAYS: i64 = 3;

pub fn default_grace_period() -> Duration {
    Duration::days(DEFAULT_GRACE_DAYS)
}

/// When the event stops being current.
///
/// Events starting and ending at midnight are all-day events whose end date is exclusive,
/// so they last until the end of the day before `end` (but never before their start day).
pub fn effective_end(event: &EventRecord) -> Option<DateTime<Local>> {
    let start = event.start?;

    match event.end {
        Some(end) if is_local_midnight(&start) && is_local_midnight(&end) => {
            let last_day = end
                .date_naive()
                .pred_opt()
                .unwrap_or(end.date_naive())
                .max(start.date_naive());

            Some(end_of_day(last_day).unwrap_or(end))
        }
        end => Some(end.unwrap_or(start)),
    }
}

/// Undated events are always expired, since they can't be scheduled.
pub fn is_expired(event: &EventRecord, now: DateTime<Local>, grace_period: Duration) -> bool {
    match effective_end(event) {
        None => true,
        Some(end) => end < now - grace_period,
    }
}

pub fn remove_expired(
    events: Vec<EventRecord>,
    now: DateTime<Local>,
    grace_period: Duration,
) -> Vec<EventRecord> {
    let total = events.len();
    let current: Vec<EventRecord> = events
        .into_iter()
        .filter(|event| {
            let expired = is_expired(event, now, grace_period);

            if expired {
                debug!("Hiding expired event '{}'", event.title);
            }

            !expired
        })
        .collect();

    info!(
        "{} of {} events are current (grace period of {} days)",
        current.len(),
        total,
        grace_period.num_days()
    );

    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeSet;

    fn local(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .earliest()
            .unwrap()
    }

    fn event(start: Option<DateTime<Local>>, end: Option<DateTime<Local>>) -> EventRecord {
        EventRecord {
            id: "id".to_string(),
            title: "Beach Cleanup".to_string(),
            description: String::new(),
            location: String::new(),
            town: "Other".to_string(),
            tags: BTreeSet::new(),
            start,
            end,
        }
    }

    #[test_log::test]
    fn all_day_event_should_expire_after_the_grace_period() {
        let new_year = local(2026, 1, 1, 0, 0);
        let all_day = event(Some(new_year), Some(new_year));

        assert!(is_expired(&all_day, local(2026, 1, 5, 0, 0), default_grace_period()));
        assert!(!is_expired(&all_day, local(2026, 1, 4, 0, 0), default_grace_period()));
    }

    #[test_log::test]
    fn all_day_end_date_should_be_exclusive() {
        let multi_day = event(Some(local(2026, 2, 10, 0, 0)), Some(local(2026, 2, 13, 0, 0)));

        let end = effective_end(&multi_day).unwrap();

        assert_eq!(end.date_naive(), local(2026, 2, 12, 0, 0).date_naive());
        assert_eq!(end.format("%H:%M:%S%.3f").to_string(), "23:59:59.999");
    }

    #[test_log::test]
    fn timed_event_should_end_at_its_end() {
        let timed = event(Some(local(2026, 2, 10, 18, 0)), Some(local(2026, 2, 11, 0, 0)));

        assert_eq!(effective_end(&timed), Some(local(2026, 2, 11, 0, 0)));
    }

    #[test_log::test]
    fn event_without_end_should_end_at_its_start() {
        let open_ended = event(Some(local(2026, 2, 10, 18, 0)), None);

        assert_eq!(effective_end(&open_ended), Some(local(2026, 2, 10, 18, 0)));
        assert!(!is_expired(&open_ended, local(2026, 2, 13, 17, 0), default_grace_period()));
        assert!(is_expired(&open_ended, local(2026, 2, 13, 19, 0), default_grace_period()));
    }

    #[test_log::test]
    fn undated_event_should_always_be_expired() {
        assert!(is_expired(&event(None, None), local(2000, 1, 1, 0, 0), default_grace_period()));
    }

    #[test_log::test]
    fn should_only_keep_current_events() {
        let events = vec![
            event(Some(local(2026, 1, 1, 10, 0)), None),
            event(None, None),
            event(Some(local(2026, 3, 1, 10, 0)), Some(local(2026, 3, 1, 12, 0))),
        ];

        let current = remove_expired(events, local(2026, 2, 1, 0, 0), default_grace_period());

        assert_eq!(current.len(), 1);
        assert_eq!(current[0].start, Some(local(2026, 3, 1, 10, 0)));
    }
}
