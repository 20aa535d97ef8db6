//! Display formatting for dates, times and timestamps

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};

use crate::models::Task;

/// "May 5, 2024"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// "3:05 PM"
pub fn format_time(time: NaiveTime) -> String {
    let (pm, hour) = time.hour12();
    format!("{}:{:02} {}", hour, time.minute(), if pm { "PM" } else { "AM" })
}

/// Past its due date (end of day when no time is set) and not done
pub fn is_overdue(task: &Task, now: NaiveDateTime) -> bool {
    let Some(date) = task.due_date else {
        return false;
    };
    let time = task
        .due_time
        .or_else(|| NaiveTime::from_hms_opt(23, 59, 59))
        .unwrap_or_default();
    !task.is_done() && now > date.and_time(time)
}

/// Coarse "5 minutes ago" style distance
pub fn time_ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - at).num_seconds().max(0);
    let (value, unit) = match secs {
        0..=44 => return "less than a minute ago".to_string(),
        45..=3_599 => ((secs + 30) / 60, "minute"),
        3_600..=86_399 => ((secs + 1_800) / 3_600, "hour"),
        86_400..=2_591_999 => ((secs + 43_200) / 86_400, "day"),
        2_592_000..=31_535_999 => ((secs + 1_296_000) / 2_592_000, "month"),
        _ => (secs / 31_536_000, "year"),
    };
    let value = value.max(1);
    if value == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", value, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_date_and_time() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 5).unwrap();
        assert_eq!(format_date(date), "May 5, 2024");
        assert_eq!(format_time(NaiveTime::from_hms_opt(15, 5, 0).unwrap()), "3:05 PM");
        assert_eq!(format_time(NaiveTime::from_hms_opt(0, 30, 0).unwrap()), "12:30 AM");
        assert_eq!(format_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap()), "12:00 PM");
    }

    fn task(status: &str, date: Option<&str>, time: Option<&str>) -> Task {
        serde_json::from_value(json!({
            "id": "30000000-0000-4000-8000-000000000000",
            "title": "t",
            "status": status,
            "due_date": date,
            "due_time": time,
        }))
        .unwrap()
    }

    #[test]
    fn test_overdue() {
        let now = NaiveDate::from_ymd_opt(2024, 5, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert!(is_overdue(&task("To Do", Some("2024-05-14"), None), now));
        assert!(!is_overdue(&task("To Do", Some("2024-05-15"), None), now));
        assert!(is_overdue(&task("To Do", Some("2024-05-15"), Some("09:00:00")), now));
        assert!(!is_overdue(&task("Done", Some("2024-05-01"), None), now));
        assert!(!is_overdue(&task("To Do", None, None), now));
    }

    #[test]
    fn test_time_ago() {
        let now = Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap();
        assert_eq!(time_ago(now, now), "less than a minute ago");
        assert_eq!(time_ago(now - chrono::Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(time_ago(now - chrono::Duration::hours(1), now), "1 hour ago");
        assert_eq!(time_ago(now - chrono::Duration::days(3), now), "3 days ago");
    }
}
