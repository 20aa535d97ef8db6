//! List Filters
//!
//! Task list tabs, filters and ordering (sent to the server as query
//! parameters), plus the client-side filters of the notification inbox and
//! the notes page.

use crate::endpoints::{self, encode_form};
use crate::models::{Note, Notification, TaskPriority, TaskStatus};

// ========================
// Tasks
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskTab {
    #[default]
    All,
    AssignedToMe,
    CreatedByMe,
}

impl TaskTab {
    pub const ALL: [TaskTab; 3] = [TaskTab::All, TaskTab::AssignedToMe, TaskTab::CreatedByMe];

    pub fn label(&self) -> &'static str {
        match self {
            TaskTab::All => "All",
            TaskTab::AssignedToMe => "Assigned to me",
            TaskTab::CreatedByMe => "Created by me",
        }
    }

    fn flag(&self) -> Option<&'static str> {
        match self {
            TaskTab::All => None,
            TaskTab::AssignedToMe => Some("assigned_to_me"),
            TaskTab::CreatedByMe => Some("created_by_me"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    DateCreated,
    #[default]
    DateCreatedDesc,
    DueDate,
    DueDateDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::DateCreated,
        SortOrder::DateCreatedDesc,
        SortOrder::DueDate,
        SortOrder::DueDateDesc,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::DateCreated => "Date Created",
            SortOrder::DateCreatedDesc => "Date Created (Desc)",
            SortOrder::DueDate => "Due Date",
            SortOrder::DueDateDesc => "Due Date (Desc)",
        }
    }

    /// Unknown labels fall back to newest first
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.label() == label)
            .unwrap_or_default()
    }

    /// Value of the `ordering` query parameter
    pub fn ordering(&self) -> &'static str {
        match self {
            SortOrder::DateCreated => "created_at",
            SortOrder::DateCreatedDesc => "-created_at",
            SortOrder::DueDate => "due_date",
            SortOrder::DueDateDesc => "-due_date",
        }
    }
}

/// Everything the task list sends to `/api/tasks/`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskFilter {
    pub tab: TaskTab,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub due_today: bool,
    pub overdue: bool,
    pub sort: SortOrder,
}

impl TaskFilter {
    pub fn query_string(&self) -> String {
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(priority) = self.priority {
            params.push(("priority", priority.label()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.label()));
        }
        if self.due_today {
            params.push(("due_today", "true"));
        }
        if self.overdue {
            params.push(("overdue", "true"));
        }
        if let Some(flag) = self.tab.flag() {
            params.push((flag, "true"));
        }
        params.push(("ordering", self.sort.ordering()));

        params
            .iter()
            .map(|(k, v)| format!("{}={}", k, encode_form(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// List path; a change here is a dependency change of the list query
    pub fn path(&self) -> String {
        format!("{}?{}", endpoints::TASKS, self.query_string())
    }

    /// Clear the dropdown filters, keep tab and ordering
    pub fn reset(&mut self) {
        self.priority = None;
        self.status = None;
        self.due_today = false;
        self.overdue = false;
    }

    pub fn active_count(&self) -> usize {
        [
            self.priority.is_some(),
            self.status.is_some(),
            self.due_today,
            self.overdue,
        ]
        .iter()
        .filter(|on| **on)
        .count()
    }
}

// ========================
// Notifications
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationTab {
    #[default]
    All,
    Unread,
}

impl NotificationTab {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationTab::All => "All",
            NotificationTab::Unread => "Unread",
        }
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Inbox view: tab, then case-insensitive search over message and type
pub fn filter_notifications<'a>(
    items: &'a [Notification],
    tab: NotificationTab,
    search: &str,
) -> Vec<&'a Notification> {
    let needle = search.to_lowercase();
    items
        .iter()
        .filter(|n| tab == NotificationTab::All || !n.is_read)
        .filter(|n| contains_ci(&n.message, &needle) || contains_ci(&n.kind, &needle))
        .collect()
}

pub fn unread_count(items: &[Notification]) -> usize {
    items.iter().filter(|n| !n.is_read).count()
}

// ========================
// Notes
// ========================

/// Search result split into the pinned group and the rest
#[derive(Debug, Default)]
pub struct NoteGroups<'a> {
    pub pinned: Vec<&'a Note>,
    pub others: Vec<&'a Note>,
}

impl NoteGroups<'_> {
    pub fn is_empty(&self) -> bool {
        self.pinned.is_empty() && self.others.is_empty()
    }
}

pub fn group_notes<'a>(notes: &'a [Note], search: &str) -> NoteGroups<'a> {
    let needle = search.to_lowercase();
    let (pinned, others) = notes
        .iter()
        .filter(|n| contains_ci(&n.title, &needle) || contains_ci(&n.content, &needle))
        .partition(|n| n.is_pinned);
    NoteGroups { pinned, others }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_filter_only_orders() {
        let filter = TaskFilter::default();
        assert_eq!(filter.query_string(), "ordering=-created_at");
        assert_eq!(filter.path(), "/api/tasks/?ordering=-created_at");
    }

    #[test]
    fn test_parameter_order_and_encoding() {
        let filter = TaskFilter {
            tab: TaskTab::AssignedToMe,
            priority: Some(TaskPriority::High),
            status: Some(TaskStatus::InProgress),
            due_today: true,
            overdue: true,
            sort: SortOrder::DueDate,
        };
        assert_eq!(
            filter.query_string(),
            "priority=High&status=In+Progress&due_today=true&overdue=true&assigned_to_me=true&ordering=due_date"
        );
    }

    #[test]
    fn test_created_by_me_tab() {
        let filter = TaskFilter {
            tab: TaskTab::CreatedByMe,
            sort: SortOrder::DueDateDesc,
            ..Default::default()
        };
        assert_eq!(filter.query_string(), "created_by_me=true&ordering=-due_date");
    }

    #[test]
    fn test_sort_labels() {
        assert_eq!(SortOrder::from_label("Date Created").ordering(), "created_at");
        assert_eq!(SortOrder::from_label("Due Date (Desc)").ordering(), "-due_date");
        assert_eq!(SortOrder::from_label("bogus"), SortOrder::DateCreatedDesc);
    }

    #[test]
    fn test_reset_keeps_tab_and_sort() {
        let mut filter = TaskFilter {
            tab: TaskTab::CreatedByMe,
            overdue: true,
            priority: Some(TaskPriority::Low),
            sort: SortOrder::DueDate,
            ..Default::default()
        };
        assert_eq!(filter.active_count(), 2);
        filter.reset();
        assert_eq!(filter.active_count(), 0);
        assert_eq!(filter.tab, TaskTab::CreatedByMe);
        assert_eq!(filter.sort, SortOrder::DueDate);
    }

    fn notification(kind: &str, message: &str, read: bool) -> Notification {
        serde_json::from_value(json!({
            "id": uuid::Uuid::new_v4(),
            "type": kind,
            "message": message,
            "is_read": read,
        }))
        .unwrap()
    }

    #[test]
    fn test_notification_tabs_and_search() {
        let items = vec![
            notification("task_assigned", "You were assigned to Launch", false),
            notification("project_invite", "Ada added you", true),
            notification("task_assigned", "You were assigned to Docs", true),
        ];
        assert_eq!(unread_count(&items), 1);
        assert_eq!(filter_notifications(&items, NotificationTab::Unread, "").len(), 1);
        assert_eq!(filter_notifications(&items, NotificationTab::All, "ASSIGNED").len(), 2);
        assert_eq!(filter_notifications(&items, NotificationTab::All, "invite").len(), 1);
    }

    fn note(title: &str, content: &str, pinned: bool) -> Note {
        serde_json::from_value(json!({
            "id": uuid::Uuid::new_v4(),
            "title": title,
            "content": content,
            "is_pinned": pinned,
        }))
        .unwrap()
    }

    #[test]
    fn test_note_groups() {
        let notes = vec![
            note("Groceries", "milk", false),
            note("Ideas", "Rust rewrite", true),
            note("Travel", "rust belt trip", false),
        ];
        let groups = group_notes(&notes, "RUST");
        assert_eq!(groups.pinned.len(), 1);
        assert_eq!(groups.others.len(), 1);
        assert_eq!(groups.others[0].title, "Travel");

        assert!(group_notes(&notes, "nothing").is_empty());
        let all = group_notes(&notes, "");
        assert_eq!(all.pinned.len() + all.others.len(), 3);
    }
}
