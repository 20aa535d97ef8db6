//! Task Card Component
//!
//! Compact task summary used by the task list, dashboard and calendar.

use chrono::Local;
use leptos::prelude::*;

use taskflow_client::format::{format_date, format_time, is_overdue};
use taskflow_client::models::Task;

use crate::components::Avatar;
use crate::router::{use_router, Route};

/// Assignee avatars before collapsing into "+N"
const AVATAR_LIMIT: usize = 3;

#[component]
pub fn TaskCard(task: Task, #[prop(optional)] compact: bool) -> impl IntoView {
    let router = use_router();
    let id = task.id.to_string();
    let overdue = is_overdue(&task, Local::now().naive_local());
    let (done, total) = task.subtask_progress();
    let priority = task.priority;
    let status = task.status;

    let due = task.due_date.map(|date| {
        let mut text = format_date(date);
        if let Some(time) = task.due_time {
            text.push_str(" · ");
            text.push_str(&format_time(time));
        }
        text
    });

    let extra_assignees = task.assignees.len().saturating_sub(AVATAR_LIMIT);
    let avatars = task
        .assignees
        .iter()
        .take(AVATAR_LIMIT)
        .map(|user| view! { <Avatar name=user.name() url=user.avatar.clone() /> })
        .collect_view();

    let class = match (compact, task.is_done()) {
        (true, _) => "task-card compact",
        (false, true) => "task-card done",
        (false, false) => "task-card",
    };

    view! {
        <div class=class on:click=move |_| router.navigate(Route::TaskDetail(id.clone()))>
            <div class="task-card-header">
                <span class=priority.dot_class()></span>
                <h3 class="task-card-title">{task.title.clone()}</h3>
            </div>
            <Show when=move || !compact>
                <div class="task-card-badges">
                    <span class=priority.badge_class()>{priority.label()}</span>
                    <span class=status.badge_class()>{status.label()}</span>
                </div>
            </Show>
            {task.project.as_ref().map(|p| view! { <div class="task-card-project">{p.name.clone()}</div> })}
            <div class="task-card-footer">
                {due.map(|text| {
                    let class = if overdue { "task-due overdue" } else { "task-due" };
                    view! { <span class=class>{text}</span> }
                })}
                {(total > 0).then(|| view! {
                    <span class="task-subtasks">{format!("{}/{}", done, total)}</span>
                })}
                <div class="avatar-stack">
                    {avatars}
                    {(extra_assignees > 0).then(|| view! {
                        <span class="avatar avatar-more">{format!("+{}", extra_assignees)}</span>
                    })}
                </div>
            </div>
        </div>
    }
}
