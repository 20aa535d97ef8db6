//! Frontend Models
//!
//! Data structures matching the REST resources. The client never owns
//! canonical state: these are transient copies refreshed after each mutation.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::transport::{FilePart, MultipartForm};

fn default_true() -> bool {
    true
}

// ========================
// Closed Enumerations
// ========================

/// Badge used when no fixed mapping applies
pub const DEFAULT_BADGE: &str = "badge badge-gray";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::ToDo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "badge badge-blue",
            TaskStatus::InProgress => "badge badge-purple",
            TaskStatus::Done => "badge badge-green",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 4] = [
        TaskPriority::Low,
        TaskPriority::Medium,
        TaskPriority::High,
        TaskPriority::Urgent,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
            TaskPriority::Urgent => "Urgent",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == label)
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            TaskPriority::High => "badge badge-red",
            TaskPriority::Medium => "badge badge-yellow",
            TaskPriority::Low => "badge badge-green",
            TaskPriority::Urgent => "badge badge-gray",
        }
    }

    pub fn dot_class(&self) -> &'static str {
        match self {
            TaskPriority::High => "dot dot-red",
            TaskPriority::Medium => "dot dot-yellow",
            TaskPriority::Low => "dot dot-green",
            TaskPriority::Urgent => "dot dot-gray",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectRole {
    Admin,
    #[default]
    Member,
}

impl ProjectRole {
    pub const ALL: [ProjectRole; 2] = [ProjectRole::Member, ProjectRole::Admin];

    pub fn label(&self) -> &'static str {
        match self {
            ProjectRole::Admin => "Admin",
            ProjectRole::Member => "Member",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.label() == label)
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            ProjectRole::Admin => "badge badge-purple",
            ProjectRole::Member => "badge badge-blue",
        }
    }
}

// ========================
// Resources
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

impl User {
    /// Display name, then "first last", then username
    pub fn name(&self) -> String {
        if !self.display_name.trim().is_empty() {
            return self.display_name.clone();
        }
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Up to two uppercase initials for avatar placeholders
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(|c| c.to_uppercase())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMember {
    pub id: Uuid,
    pub user: User,
    #[serde(default)]
    pub role: ProjectRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creator: Option<User>,
    #[serde(default)]
    pub members: Vec<ProjectMember>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Project {
    pub fn member(&self, user_id: Uuid) -> Option<&ProjectMember> {
        self.members.iter().find(|m| m.user.id == user_id)
    }
}

/// Project as embedded in a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: Uuid,
    pub text: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub assignee: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_time: Option<NaiveTime>,
    #[serde(default)]
    pub creator: Option<User>,
    #[serde(default)]
    pub assignees: Vec<User>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub project: Option<ProjectRef>,
    #[serde(default, alias = "assets_count")]
    pub asset_count: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// (completed, total) subtask counts
    pub fn subtask_progress(&self) -> (usize, usize) {
        let done = self.subtasks.iter().filter(|s| s.is_completed).count();
        (done, self.subtasks.len())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Free-form metadata (task id, project id...)
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: Uuid,
    /// File URL
    pub file: String,
    #[serde(default)]
    pub task: Option<Uuid>,
    #[serde(default)]
    pub project: Option<Uuid>,
    #[serde(default)]
    pub uploaded_by: Option<User>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl Asset {
    /// Last path segment of the file URL
    pub fn file_name(&self) -> &str {
        let path = self.file.split(&['?', '#'][..]).next().unwrap_or(&self.file);
        path.rsplit('/').find(|s| !s.is_empty()).unwrap_or(path)
    }
}

/// Entry of `/api/important-tasks/`: either the join row or the bare task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImportantEntry {
    Marked {
        id: Uuid,
        task: Task,
        #[serde(default)]
        marked_at: Option<DateTime<Utc>>,
    },
    Bare(Task),
}

impl ImportantEntry {
    pub fn task(&self) -> &Task {
        match self {
            ImportantEntry::Marked { task, .. } => task,
            ImportantEntry::Bare(task) => task,
        }
    }

    /// Id to DELETE when unmarking
    pub fn mark_id(&self) -> Uuid {
        match self {
            ImportantEntry::Marked { id, .. } => *id,
            ImportantEntry::Bare(task) => task.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.tasks.is_empty()
    }
}

// ========================
// Request Payloads
// ========================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSubtask {
    pub text: String,
    pub assignee_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub project_id: Option<Uuid>,
    pub assignees_ids: Vec<Uuid>,
    pub subtasks_data: Vec<NewSubtask>,
}

impl NewTask {
    /// Drop blank subtasks before submission
    pub fn without_blank_subtasks(mut self) -> Self {
        self.subtasks_data.retain(|s| !s.text.trim().is_empty());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SubtaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssigneeIds {
    pub assignee_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProjectInput {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMember {
    pub member_id: Uuid,
    pub role: ProjectRole,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RolePatch {
    pub role: ProjectRole,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
}

/// Editable profile fields, sent as multipart so an avatar can ride along
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfilePatch {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

impl ProfilePatch {
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
        }
    }

    /// Anything to save compared to the loaded profile
    pub fn has_changes(&self, user: &User, avatar_picked: bool) -> bool {
        avatar_picked || *self != Self::from_user(user)
    }

    /// Text fields trimmed; `avatar` goes under its own field name
    pub fn into_form(self, avatar: Option<FilePart>) -> MultipartForm {
        let form = MultipartForm::new()
            .text("first_name", self.first_name.trim())
            .text("last_name", self.last_name.trim())
            .text("username", self.username.trim());
        match avatar {
            Some(part) => form.file_named("avatar", part),
            None => form,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkImportant {
    pub task_id: Uuid,
}
