//! Dashboard
//!
//! Stat cards, today's list and the upcoming list, all derived from
//! `/api/user-tasks/` against a caller-supplied "today".

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::models::Task;

pub const UPCOMING_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
}

pub fn task_stats(tasks: &[Task], today: NaiveDate) -> TaskStats {
    tasks.iter().fold(TaskStats::default(), |mut acc, task| {
        if task.is_done() {
            acc.completed += 1;
        } else {
            acc.pending += 1;
            if task.due_date.is_some_and(|due| due < today) {
                acc.overdue += 1;
            }
        }
        acc
    })
}

/// Open tasks due today
pub fn todays_tasks(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| !t.is_done() && t.due_date == Some(today))
        .collect()
}

/// Open tasks not due today, earliest first, undated last
pub fn upcoming_tasks(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    let mut upcoming: Vec<&Task> = tasks
        .iter()
        .filter(|t| !t.is_done() && t.due_date != Some(today))
        .collect();
    upcoming.sort_by(|a, b| match (a.due_date, b.due_date) {
        (Some(a), Some(b)) => a.cmp(&b),
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (None, None) => Ordering::Equal,
    });
    upcoming.truncate(UPCOMING_LIMIT);
    upcoming
}

pub fn greeting(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good Morning",
        12..=17 => "Good Afternoon",
        _ => "Good Evening",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn task(title: &str, status: &str, due: Option<&str>) -> Task {
        serde_json::from_value(json!({
            "id": uuid::Uuid::new_v4(),
            "title": title,
            "status": status,
            "priority": "Medium",
            "due_date": due,
        }))
        .unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    #[test]
    fn test_stats() {
        let tasks = vec![
            task("done", "Done", Some("2024-05-01")),
            task("late", "To Do", Some("2024-05-14")),
            task("today", "In Progress", Some("2024-05-15")),
            task("undated", "To Do", None),
        ];
        assert_eq!(
            task_stats(&tasks, today()),
            TaskStats {
                completed: 1,
                pending: 3,
                overdue: 1
            }
        );
    }

    #[test]
    fn test_today_excludes_done() {
        let tasks = vec![
            task("a", "To Do", Some("2024-05-15")),
            task("b", "Done", Some("2024-05-15")),
            task("c", "To Do", Some("2024-05-16")),
        ];
        let titles: Vec<_> = todays_tasks(&tasks, today()).iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a"]);
    }

    #[test]
    fn test_upcoming_order_and_limit() {
        let tasks = vec![
            task("undated", "To Do", None),
            task("june", "To Do", Some("2024-06-01")),
            task("today", "To Do", Some("2024-05-15")),
            task("past", "To Do", Some("2024-05-01")),
            task("done", "Done", Some("2024-05-02")),
            task("may20", "In Progress", Some("2024-05-20")),
            task("may16", "To Do", Some("2024-05-16")),
            task("july", "To Do", Some("2024-07-01")),
        ];
        let titles: Vec<_> = upcoming_tasks(&tasks, today()).iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["past", "may16", "may20", "june", "july"]);
    }

    #[test]
    fn test_undated_sorted_last() {
        let tasks = vec![task("undated", "To Do", None), task("dated", "To Do", Some("2030-01-01"))];
        let titles: Vec<_> = upcoming_tasks(&tasks, today()).iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["dated", "undated"]);
    }

    #[test]
    fn test_greeting() {
        assert_eq!(greeting(0), "Good Morning");
        assert_eq!(greeting(11), "Good Morning");
        assert_eq!(greeting(12), "Good Afternoon");
        assert_eq!(greeting(17), "Good Afternoon");
        assert_eq!(greeting(18), "Good Evening");
    }
}
