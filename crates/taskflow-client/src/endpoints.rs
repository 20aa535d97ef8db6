//! REST paths, relative to the API base URL

use std::fmt::Display;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters `encodeURIComponent` leaves alone stay unescaped
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const LOGIN: &str = "/user/login/";
pub const REGISTER: &str = "/user/register/";
pub const PASSWORD_RESET: &str = "/user/password-reset/";
pub const PASSWORD_RESET_CONFIRM: &str = "/user/password-reset-confirm/";
pub const GOOGLE_AUTH: &str = "/user/auth/google/";
pub const ME: &str = "/user/me/";

pub const TASKS: &str = "/api/tasks/";
pub const USER_TASKS: &str = "/api/user-tasks/";
pub const PROJECTS: &str = "/api/projects/";
pub const NOTES: &str = "/api/notes/";
pub const NOTIFICATIONS: &str = "/api/notifications/";
pub const IMPORTANT_TASKS: &str = "/api/important-tasks/";
pub const TEAM: &str = "/api/team/";

/// `application/x-www-form-urlencoded` value set
const FORM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

/// Encode a query value the way `URLSearchParams` does (space as `+`)
pub fn encode_form(value: &str) -> String {
    utf8_percent_encode(value, FORM).to_string().replace("%20", "+")
}

/// Percent-encode one query value
pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

pub fn task(id: impl Display) -> String {
    format!("/api/tasks/{}/", id)
}

pub fn subtasks(task_id: impl Display) -> String {
    format!("/api/tasks/{}/subtasks/", task_id)
}

pub fn subtask(task_id: impl Display, subtask_id: impl Display) -> String {
    format!("/api/tasks/{}/subtasks/{}/", task_id, subtask_id)
}

pub fn task_assignees(task_id: impl Display) -> String {
    format!("/api/tasks/{}/assignees/", task_id)
}

pub fn task_assignee(task_id: impl Display, user_id: impl Display) -> String {
    format!("/api/tasks/{}/assignees/{}/", task_id, user_id)
}

pub fn leave_task(task_id: impl Display) -> String {
    format!("/api/tasks/{}/leave/", task_id)
}

pub fn task_assets(task_id: impl Display) -> String {
    format!("/api/tasks/{}/assets/", task_id)
}

pub fn project(id: impl Display) -> String {
    format!("/api/projects/{}/", id)
}

/// Tasks belonging to one project
pub fn project_tasks(project_id: impl Display) -> String {
    format!("/api/tasks/?project_id={}", encode(&project_id.to_string()))
}

pub fn project_members(project_id: impl Display) -> String {
    format!("/api/projects/{}/members/", project_id)
}

pub fn project_member(project_id: impl Display, member_id: impl Display) -> String {
    format!("/api/projects/{}/members/{}/", project_id, member_id)
}

pub fn project_assets(project_id: impl Display) -> String {
    format!("/api/projects/{}/assets/", project_id)
}

pub fn asset(id: impl Display) -> String {
    format!("/api/assets/{}/", id)
}

pub fn note(id: impl Display) -> String {
    format!("/api/notes/{}/", id)
}

pub fn notification_read(id: impl Display) -> String {
    format!("/api/notifications/{}/read/", id)
}

pub fn notification_delete(id: impl Display) -> String {
    format!("/api/notifications/{}/delete/", id)
}

pub fn important_task(id: impl Display) -> String {
    format!("/api/important-tasks/{}/", id)
}

pub fn search(query: &str) -> String {
    format!("/api/search/?q={}", encode(query))
}

pub fn search_users(query: &str) -> String {
    format!("/user/search/?q={}", encode(query))
}

pub fn search_assignees(query: &str) -> String {
    format!("/api/search-assignees/?user={}", encode(query))
}

pub fn search_project_assignees(project_id: impl Display, query: &str) -> String {
    format!("/api/projects/{}/search-assignees/?member={}", project_id, encode(query))
}
