//! Daily schedule math: when does the next digest fire?

use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;

/// Compute the next UTC instant at which the digest should run, given the
/// configured local wall-clock time in `tz`, strictly after `from`.
///
/// Walks forward day by day so DST gaps (a local time that does not exist
/// on transition day) simply skip to the next day's occurrence; ambiguous
/// local times resolve to the earlier instant.
///
/// Returns `None` only for out-of-range inputs (hour > 23 / minute > 59).
pub fn next_daily_run(hour: u8, minute: u8, tz: Tz, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if hour > 23 || minute > 59 {
        return None;
    }

    let mut day = from.with_timezone(&tz).date_naive();
    for _ in 0..3 {
        let local = day.and_hms_opt(u32::from(hour), u32::from(minute), 0)?;
        if let Some(candidate) = tz.from_local_datetime(&local).earliest() {
            let candidate = candidate.with_timezone(&Utc);
            if candidate > from {
                return Some(candidate);
            }
        }
        day = day.succ_opt()?;
    }
    None
}

/// Duration from `from` until the next run, for feeding a sleep timer.
pub fn until_next_run(hour: u8, minute: u8, tz: Tz, from: DateTime<Utc>) -> Option<Duration> {
    next_daily_run(hour, minute, tz, from).map(|next| next - from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn before_todays_slot_runs_today() {
        let next = next_daily_run(9, 0, chrono_tz::UTC, utc("2026-03-02T05:00:00Z")).unwrap();
        assert_eq!(next, utc("2026-03-02T09:00:00Z"));
    }

    #[test]
    fn after_todays_slot_runs_tomorrow() {
        let next = next_daily_run(9, 0, chrono_tz::UTC, utc("2026-03-02T09:00:00Z")).unwrap();
        assert_eq!(next, utc("2026-03-03T09:00:00Z"));
    }

    #[test]
    fn local_timezone_is_respected() {
        // Melbourne is UTC+11 in January (AEDT): 09:00 local = 22:00 UTC the
        // previous day.
        let next = next_daily_run(
            9,
            0,
            chrono_tz::Australia::Melbourne,
            utc("2026-01-10T12:00:00Z"),
        )
        .unwrap();
        assert_eq!(next, utc("2026-01-10T22:00:00Z"));
    }

    #[test]
    fn kolkata_half_hour_offset() {
        // 09:00 IST (UTC+5:30) = 03:30 UTC.
        let next = next_daily_run(
            9,
            0,
            chrono_tz::Asia::Kolkata,
            utc("2026-03-02T00:00:00Z"),
        )
        .unwrap();
        assert_eq!(next, utc("2026-03-02T03:30:00Z"));
    }

    #[test]
    fn result_is_strictly_after_from() {
        let from = utc("2026-03-02T09:00:00Z");
        let next = next_daily_run(9, 0, chrono_tz::UTC, from).unwrap();
        assert!(next > from);
    }

    #[test]
    fn out_of_range_time_is_rejected() {
        assert!(next_daily_run(24, 0, chrono_tz::UTC, Utc::now()).is_none());
        assert!(next_daily_run(9, 60, chrono_tz::UTC, Utc::now()).is_none());
    }

    #[test]
    fn until_next_run_is_positive() {
        let d = until_next_run(9, 0, chrono_tz::UTC, utc("2026-03-02T08:59:00Z")).unwrap();
        assert_eq!(d, Duration::minutes(1));
    }
}
