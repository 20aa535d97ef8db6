//! Calendar
//!
//! Sunday-first month grid and due-date buckets.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::models::Task;

pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn next_month(date: NaiveDate) -> NaiveDate {
    month_start(date)
        .checked_add_months(Months::new(1))
        .unwrap_or(date)
}

pub fn previous_month(date: NaiveDate) -> NaiveDate {
    month_start(date)
        .checked_sub_months(Months::new(1))
        .unwrap_or(date)
}

fn month_end(date: NaiveDate) -> NaiveDate {
    next_month(date).pred_opt().unwrap_or(date)
}

/// Sunday on or before the 1st through the Saturday on or after the last day
pub fn month_grid(date: NaiveDate) -> Vec<NaiveDate> {
    let first = month_start(date);
    let last = month_end(date);
    let lead = u64::from(first.weekday().num_days_from_sunday());
    let trail = u64::from(6 - last.weekday().num_days_from_sunday());

    let start = first - Days::new(lead);
    let end = last + Days::new(trail);
    start.iter_days().take_while(|d| *d <= end).collect()
}

pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// `yyyy-mm-dd` -> tasks due that day; undated tasks are skipped
pub fn tasks_by_date(tasks: &[Task]) -> BTreeMap<NaiveDate, Vec<&Task>> {
    let mut map: BTreeMap<NaiveDate, Vec<&Task>> = BTreeMap::new();
    for task in tasks {
        if let Some(due) = task.due_date {
            map.entry(due).or_default().push(task);
        }
    }
    map
}

/// Header label, e.g. "May 2024"
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use serde_json::json;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_grid_bounds() {
        // May 2024: Wed 1st .. Fri 31st
        let grid = month_grid(ymd(2024, 5, 17));
        assert_eq!(grid.first(), Some(&ymd(2024, 4, 28)));
        assert_eq!(grid.last(), Some(&ymd(2024, 6, 1)));
        assert_eq!(grid.len(), 35);
        assert_eq!(grid[0].weekday(), Weekday::Sun);
        assert_eq!(grid[grid.len() - 1].weekday(), Weekday::Sat);
    }

    #[test]
    fn test_grid_month_starting_sunday() {
        // September 2024 starts on a Sunday and ends on a Monday
        let grid = month_grid(ymd(2024, 9, 1));
        assert_eq!(grid.first(), Some(&ymd(2024, 9, 1)));
        assert_eq!(grid.last(), Some(&ymd(2024, 10, 5)));
    }

    #[test]
    fn test_february_leap_year() {
        let grid = month_grid(ymd(2024, 2, 10));
        assert!(grid.contains(&ymd(2024, 2, 29)));
        assert_eq!(grid.len() % 7, 0);
    }

    #[test]
    fn test_month_navigation() {
        assert_eq!(next_month(ymd(2024, 1, 31)), ymd(2024, 2, 1));
        assert_eq!(previous_month(ymd(2024, 1, 15)), ymd(2023, 12, 1));
        assert_eq!(month_label(ymd(2024, 5, 3)), "May 2024");
    }

    #[test]
    fn test_tasks_bucketed_by_due_date() {
        let tasks: Vec<Task> = [Some("2024-05-02"), Some("2024-05-02"), None, Some("2024-05-09")]
            .iter()
            .map(|due| {
                serde_json::from_value(json!({
                    "id": uuid::Uuid::new_v4(),
                    "title": "t",
                    "due_date": due,
                }))
                .unwrap()
            })
            .collect();
        let buckets = tasks_by_date(&tasks);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[&ymd(2024, 5, 2)].len(), 2);
        assert_eq!(buckets[&ymd(2024, 5, 9)].len(), 1);
    }
}
