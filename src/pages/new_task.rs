//! New Task Page
//!
//! Task form with optional project, assignees and an initial subtask list.

use chrono::{NaiveDate, NaiveTime};
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use taskflow_client::endpoints;
use taskflow_client::models::{NewSubtask, NewTask, Project, TaskPriority, TaskStatus, User};
use taskflow_client::validation::validate_task_title;

use crate::commands::task;
use crate::components::{Avatar, ErrorBanner, UserPicker};
use crate::context::use_app_context;
use crate::hooks::use_get;
use crate::router::{use_router, Route};
use crate::store::{toast_error, toast_success, use_app_store};

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub(crate) fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

#[component]
pub fn NewTaskPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let router = use_router();
    let projects = use_get::<Vec<Project>>(endpoints::PROJECTS);

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (due_date, set_due_date) = signal(String::new());
    let (due_time, set_due_time) = signal(String::new());
    let (priority, set_priority) = signal(TaskPriority::default());
    let (status, set_status) = signal(TaskStatus::default());
    let (project_id, set_project_id) = signal(None::<Uuid>);
    let assignees = RwSignal::new(Vec::<User>::new());
    let subtasks = RwSignal::new(vec![String::new()]);
    let (error, set_error) = signal(None::<String>);
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = title.get_untracked();
        if let Err(e) = validate_task_title(&title) {
            set_error.set(Some(e.to_string()));
            return;
        }
        set_error.set(None);
        let new_task = NewTask {
            title: title.trim().to_string(),
            description: description.get_untracked(),
            due_date: parse_date(&due_date.get_untracked()),
            due_time: parse_time(&due_time.get_untracked()),
            priority: priority.get_untracked(),
            status: status.get_untracked(),
            project_id: project_id.get_untracked(),
            assignees_ids: assignees.with_untracked(|users| users.iter().map(|u| u.id).collect()),
            subtasks_data: subtasks.with_untracked(|texts| {
                texts
                    .iter()
                    .map(|text| NewSubtask {
                        text: text.clone(),
                        assignee_id: None,
                    })
                    .collect()
            }),
        };
        set_submitting.set(true);
        let client = ctx.client();
        spawn_local(async move {
            match task::create_task(&client, new_task).await {
                Ok(created) => {
                    toast_success(&store, "Task created");
                    router.replace(Route::TaskDetail(created.id.to_string()));
                }
                Err(e) => {
                    log::error!("[TASK] create failed: {}", e);
                    toast_error(&store, format!("Failed to create task: {}", e));
                    set_submitting.set(false);
                }
            }
        });
    };

    let project_scope = move || project_id.get().map(|id| id.to_string());

    view! {
        <div class="page narrow">
            <header class="page-header">
                <h1>"New Task"</h1>
            </header>
            {move || error.get().map(|message| view! { <ErrorBanner message=message /> })}
            <form class="task-form" on:submit=on_submit>
                <label>
                    "Title"
                    <input
                        type="text"
                        prop:value=move || title.get()
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Description"
                    <textarea
                        rows="4"
                        prop:value=move || description.get()
                        on:input=move |ev| set_description.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <div class="form-row">
                    <label>
                        "Due date"
                        <input type="date" on:change=move |ev| set_due_date.set(event_target_value(&ev)) />
                    </label>
                    <label>
                        "Due time"
                        <input type="time" on:change=move |ev| set_due_time.set(event_target_value(&ev)) />
                    </label>
                </div>
                <div class="form-row">
                    <label>
                        "Priority"
                        <select
                            prop:value=move || priority.get().label()
                            on:change=move |ev| {
                                if let Some(p) = TaskPriority::from_label(&event_target_value(&ev)) {
                                    set_priority.set(p);
                                }
                            }
                        >
                            {TaskPriority::ALL.iter().map(|p| view! { <option value=p.label()>{p.label()}</option> }).collect_view()}
                        </select>
                    </label>
                    <label>
                        "Status"
                        <select
                            prop:value=move || status.get().label()
                            on:change=move |ev| {
                                if let Some(s) = TaskStatus::from_label(&event_target_value(&ev)) {
                                    set_status.set(s);
                                }
                            }
                        >
                            {TaskStatus::ALL.iter().map(|s| view! { <option value=s.label()>{s.label()}</option> }).collect_view()}
                        </select>
                    </label>
                </div>
                <label>
                    "Project"
                    <select on:change=move |ev| {
                        set_project_id.set(Uuid::parse_str(&event_target_value(&ev)).ok());
                        assignees.set(Vec::new());
                    }>
                        <option value="">"No project"</option>
                        {move || projects.data().unwrap_or_default().into_iter().map(|p| {
                            view! { <option value=p.id.to_string()>{p.name}</option> }
                        }).collect_view()}
                    </select>
                </label>

                <fieldset>
                    <legend>"Assignees"</legend>
                    <div class="chip-list">
                        {move || assignees.get().into_iter().map(|user| {
                            let id = user.id;
                            view! {
                                <span class="chip">
                                    <Avatar name=user.name() url=user.avatar.clone() />
                                    {user.name()}
                                    <button
                                        type="button"
                                        class="icon-btn"
                                        on:click=move |_| assignees.update(|list| list.retain(|u| u.id != id))
                                    >"×"</button>
                                </span>
                            }
                        }).collect_view()}
                    </div>
                    {move || {
                        let scope = project_scope();
                        view! {
                            <UserPicker
                                project_id=scope
                                exclude=Signal::derive(move || assignees.with(|list| list.iter().map(|u| u.id).collect()))
                                on_select=move |user: User| assignees.update(|list| list.push(user))
                            />
                        }
                    }}
                </fieldset>

                <fieldset>
                    <legend>"Subtasks"</legend>
                    {move || (0..subtasks.with(|s| s.len())).map(|i| {
                        view! {
                            <div class="subtask-input">
                                <input
                                    type="text"
                                    placeholder="Subtask"
                                    prop:value=move || subtasks.with(|s| s.get(i).cloned().unwrap_or_default())
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        subtasks.update(|s| if let Some(slot) = s.get_mut(i) { *slot = value });
                                    }
                                />
                                <button
                                    type="button"
                                    class="icon-btn"
                                    on:click=move |_| subtasks.update(|s| { if i < s.len() { s.remove(i); } })
                                >"×"</button>
                            </div>
                        }
                    }).collect_view()}
                    <button type="button" class="btn-link" on:click=move |_| subtasks.update(|s| s.push(String::new()))>
                        "+ Add subtask"
                    </button>
                </fieldset>

                <div class="form-actions">
                    <button type="button" class="btn-secondary" on:click=move |_| router.navigate(Route::Tasks)>"Cancel"</button>
                    <button type="submit" class="btn-primary" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Creating..." } else { "Create Task" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form_inputs() {
        assert_eq!(parse_date("2024-05-05"), NaiveDate::from_ymd_opt(2024, 5, 5));
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_time("15:05"), NaiveTime::from_hms_opt(15, 5, 0));
        assert_eq!(parse_time("3pm"), None);
    }
}
