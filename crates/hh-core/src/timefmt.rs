//! Display formatting for timestamps. Posts store canonical UTC times;
//! the facade formats them relative to "now" on every read.

use chrono::{DateTime, Datelike, Utc};

/// Formats a timestamp the way the forum displays it: "Just now" under a
/// minute, then "Nm ago" / "Nh ago", then a plain date.
pub fn relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let mins = (now - then).num_minutes();
    if mins < 1 {
        return "Just now".to_string();
    }
    if mins < 60 {
        return format!("{mins}m ago");
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}/{}/{}", then.month(), then.day(), then.year())
}

/// Join-date label shown on profiles, e.g. "May 2024".
pub fn join_label(when: DateTime<Utc>) -> String {
    when.format("%b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn buckets() {
        let now = Utc.with_ymd_and_hms(2024, 5, 21, 12, 0, 0).unwrap();
        assert_eq!(relative(now - Duration::seconds(30), now), "Just now");
        assert_eq!(relative(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(relative(now - Duration::hours(3), now), "3h ago");
        assert_eq!(relative(now - Duration::days(2), now), "5/19/2024");
    }

    #[test]
    fn join_label_is_month_and_year() {
        let when = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(join_label(when), "May 2024");
    }
}
