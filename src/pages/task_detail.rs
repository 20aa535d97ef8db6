//! Task Detail Page
//!
//! Full view of one task. What the viewer may do follows `TaskPermissions`:
//! the creator edits, deletes and manages assignees; assignees toggle
//! subtasks and may leave.

use chrono::Local;
use leptos::prelude::*;
use uuid::Uuid;

use taskflow_client::endpoints;
use taskflow_client::format::{format_date, format_time, is_overdue};
use taskflow_client::models::{
    ImportantEntry, NewSubtask, Subtask, Task, TaskPatch, TaskPriority, TaskStatus, User,
};
use taskflow_client::permissions::TaskPermissions;
use taskflow_client::RequestSpec;

use crate::commands::asset::AssetOwner;
use crate::commands::task as commands;
use crate::components::{
    AssetSection, Avatar, DeleteConfirmButton, ErrorBanner, LoadingScreen, Modal, UserPicker,
};
use crate::context::{use_app_context, use_user};
use crate::hooks::{spawn_mutation, use_api, use_get, UseApi};
use crate::pages::new_task::{parse_date, parse_time};
use crate::router::{use_router, Route};
use crate::store::use_app_store;

#[component]
pub fn TaskDetailPage(id: String) -> impl IntoView {
    let user = use_user();
    let router = use_router();
    let path = endpoints::task(&id);
    let task = use_api::<Task, _>(move || RequestSpec::get(path.clone()));

    let perms = Memo::new(move |_| {
        let viewer = user.user_id();
        task.state.with(|s| {
            s.value
                .as_ref()
                .map(|t| TaskPermissions::for_task(t, viewer))
                .unwrap_or_default()
        })
    });

    view! {
        <div class="page task-detail">
            <button class="btn-link back-link" on:click=move |_| router.navigate(Route::Tasks)>"← Back to tasks"</button>
            {move || {
                if task.data().is_some() {
                    return ().into_any();
                }
                if let Some(err) = task.error() {
                    return view! { <ErrorBanner message=err.message /> }.into_any();
                }
                view! { <LoadingScreen message="Loading task..." /> }.into_any()
            }}
            <Show when=move || task.state.with(|s| s.value.is_some())>
                {move || {
                    let task_id = task.state.with_untracked(|s| s.value.as_ref().map(|t| t.id));
                    task_id.map(|task_id| view! {
                        <TaskHeader task=task perms=perms />
                        <div class="detail-grid">
                            <div class="detail-main">
                                <SubtaskList task=task task_id=task_id perms=perms />
                                <AssetSection
                                    owner=AssetOwner::Task(task_id)
                                    editable=Signal::derive(move || perms.get().can_toggle_subtasks())
                                />
                            </div>
                            <aside class="detail-side">
                                <AssigneeList task=task task_id=task_id perms=perms />
                            </aside>
                        </div>
                    })
                }}
            </Show>
        </div>
    }
}

#[component]
fn TaskHeader(task: UseApi<Task>, perms: Memo<TaskPermissions>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let router = use_router();
    let important = use_get::<Vec<ImportantEntry>>(endpoints::IMPORTANT_TASKS);
    let (editing, set_editing) = signal(false);

    // Mark id of this task in the important list, if starred
    let star = move || {
        let id = task.data()?.id;
        important
            .data()?
            .into_iter()
            .find(|entry| entry.task().id == id)
            .map(|entry| entry.mark_id())
    };

    let toggle_star = move |_| {
        let Some(t) = task.data() else { return };
        let client = ctx.client();
        match star() {
            Some(mark_id) => spawn_mutation(
                store,
                Some("Removed from important"),
                "Failed to update important tasks",
                async move { commands::unmark_important(&client, mark_id).await },
                move |_| important.refetch(),
            ),
            None => spawn_mutation(
                store,
                Some("Marked as important"),
                "Failed to update important tasks",
                async move { commands::mark_important(&client, t.id).await },
                move |_| important.refetch(),
            ),
        }
    };

    let on_status = move |ev| {
        let Some(t) = task.data() else { return };
        let Some(status) = TaskStatus::from_label(&event_target_value(&ev)) else { return };
        let patch = TaskPatch {
            status: Some(status),
            ..Default::default()
        };
        let client = ctx.client();
        spawn_mutation(
            store,
            None,
            "Failed to update status",
            async move { commands::update_task(&client, t.id, &patch).await },
            move |_| task.refetch(),
        );
    };

    let on_delete = move |_: ()| {
        let Some(t) = task.data() else { return };
        let client = ctx.client();
        spawn_mutation(
            store,
            Some("Task deleted"),
            "Failed to delete task",
            async move { commands::delete_task(&client, t.id).await },
            move |_| router.replace(Route::Tasks),
        );
    };

    let on_leave = move |_: ()| {
        let Some(t) = task.data() else { return };
        let client = ctx.client();
        spawn_mutation(
            store,
            Some("You left the task"),
            "Failed to leave task",
            async move { commands::leave_task(&client, t.id).await },
            move |_| router.replace(Route::Tasks),
        );
    };

    view! {
        {move || task.data().map(|t| {
            let overdue = is_overdue(&t, Local::now().naive_local());
            let due = t.due_date.map(|date| {
                let time = t.due_time.map(|time| format!(" at {}", format_time(time))).unwrap_or_default();
                format!("Due {}{}", format_date(date), time)
            });
            let creator = t.creator.as_ref().map(|c| c.name()).unwrap_or_default();
            view! {
                <header class="task-detail-header">
                    <div class="task-title-row">
                        <h1>{t.title.clone()}</h1>
                        <button
                            class=move || if star().is_some() { "icon-btn star active" } else { "icon-btn star" }
                            title="Important"
                            on:click=toggle_star
                        >
                            {move || if star().is_some() { "★" } else { "☆" }}
                        </button>
                    </div>
                    <div class="task-badges">
                        <span class=t.priority.badge_class()>{t.priority.label()}</span>
                        <span class=t.status.badge_class()>{t.status.label()}</span>
                        {due.map(|text| view! {
                            <span class={if overdue { "task-due overdue" } else { "task-due" }}>{text}</span>
                        })}
                        {t.project.as_ref().map(|p| {
                            let pid = p.id.to_string();
                            view! {
                                <button class="btn-link" on:click=move |_| router.navigate(Route::ProjectDetail(pid.clone()))>
                                    {p.name.clone()}
                                </button>
                            }
                        })}
                    </div>
                    <p class="muted">{format!("Created by {}", creator)}</p>
                    {t.description.clone().filter(|d| !d.trim().is_empty()).map(|d| view! { <p class="task-description">{d}</p> })}
                </header>
            }
        })}
        <div class="task-actions">
            <Show when=move || perms.get().can_toggle_subtasks()>
                <select
                    prop:value=move || task.data().map(|t| t.status.label()).unwrap_or_default()
                    on:change=on_status
                >
                    {TaskStatus::ALL.iter().map(|s| view! { <option value=s.label()>{s.label()}</option> }).collect_view()}
                </select>
            </Show>
            <Show when=move || perms.get().can_edit()>
                <button class="btn-secondary" on:click=move |_| set_editing.set(true)>"Edit"</button>
                <DeleteConfirmButton button_class="btn-danger" label="Delete" on_confirm=on_delete />
            </Show>
            <Show when=move || perms.get().can_leave() && !perms.get().can_edit()>
                <DeleteConfirmButton button_class="btn-secondary" label="Leave task" prompt="Leave?" on_confirm=on_leave />
            </Show>
        </div>
        <Show when=move || editing.get()>
            <TaskEditor task=task on_close=move |_: ()| set_editing.set(false) />
        </Show>
    }
}

#[component]
fn TaskEditor(task: UseApi<Task>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let Some(original) = task.data() else {
        return ().into_any();
    };
    let task_id = original.id;

    let title = RwSignal::new(original.title.clone());
    let description = RwSignal::new(original.description.clone().unwrap_or_default());
    let priority = RwSignal::new(original.priority);
    let due_date = RwSignal::new(original.due_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default());
    let due_time = RwSignal::new(original.due_time.map(|t| t.format("%H:%M").to_string()).unwrap_or_default());
    let (error, set_error) = signal(None::<String>);

    let on_save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let new_title = title.get_untracked();
        if let Err(e) = taskflow_client::validation::validate_task_title(&new_title) {
            set_error.set(Some(e.to_string()));
            return;
        }
        let patch = TaskPatch {
            title: Some(new_title.trim().to_string()),
            description: Some(description.get_untracked()),
            priority: Some(priority.get_untracked()),
            due_date: parse_date(&due_date.get_untracked()),
            due_time: parse_time(&due_time.get_untracked()),
            ..Default::default()
        };
        let client = ctx.client();
        spawn_mutation(
            store,
            Some("Task updated"),
            "Failed to update task",
            async move { commands::update_task(&client, task_id, &patch).await },
            move |_| {
                task.refetch();
                on_close.run(());
            },
        );
    };

    view! {
        <Modal title="Edit task" on_close=on_close>
            {move || error.get().map(|message| view! { <ErrorBanner message=message /> })}
            <form class="task-form" on:submit=on_save>
                <label>
                    "Title"
                    <input type="text" prop:value=move || title.get() on:input=move |ev| title.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Description"
                    <textarea rows="4" prop:value=move || description.get() on:input=move |ev| description.set(event_target_value(&ev))></textarea>
                </label>
                <div class="form-row">
                    <label>
                        "Due date"
                        <input type="date" prop:value=move || due_date.get() on:change=move |ev| due_date.set(event_target_value(&ev)) />
                    </label>
                    <label>
                        "Due time"
                        <input type="time" prop:value=move || due_time.get() on:change=move |ev| due_time.set(event_target_value(&ev)) />
                    </label>
                </div>
                <label>
                    "Priority"
                    <select
                        prop:value=move || priority.get().label()
                        on:change=move |ev| {
                            if let Some(p) = TaskPriority::from_label(&event_target_value(&ev)) {
                                priority.set(p);
                            }
                        }
                    >
                        {TaskPriority::ALL.iter().map(|p| view! { <option value=p.label()>{p.label()}</option> }).collect_view()}
                    </select>
                </label>
                <div class="form-actions">
                    <button type="button" class="btn-secondary" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="btn-primary">"Save"</button>
                </div>
            </form>
        </Modal>
    }
    .into_any()
}

#[component]
fn SubtaskList(task: UseApi<Task>, task_id: Uuid, perms: Memo<TaskPermissions>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (draft, set_draft) = signal(String::new());

    let toggle = move |subtask: Subtask| {
        let client = ctx.client();
        spawn_mutation(
            store,
            None,
            "Failed to update subtask",
            async move { commands::toggle_subtask(&client, task_id, &subtask).await },
            move |_| task.refetch(),
        );
    };

    let remove = move |subtask_id: Uuid| {
        let client = ctx.client();
        spawn_mutation(
            store,
            None,
            "Failed to delete subtask",
            async move { commands::delete_subtask(&client, task_id, subtask_id).await },
            move |_| task.refetch(),
        );
    };

    let on_add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = draft.get_untracked();
        if text.trim().is_empty() {
            return;
        }
        let subtask = NewSubtask {
            text: text.trim().to_string(),
            assignee_id: None,
        };
        let client = ctx.client();
        spawn_mutation(
            store,
            None,
            "Failed to add subtask",
            async move { commands::add_subtask(&client, task_id, &subtask).await },
            move |_| {
                set_draft.set(String::new());
                task.refetch();
            },
        );
    };

    view! {
        <section class="subtask-section">
            <h3>
                "Subtasks "
                {move || task.data().map(|t| {
                    let (done, total) = t.subtask_progress();
                    format!("({}/{})", done, total)
                })}
            </h3>
            <ul class="subtask-list">
                {move || {
                    let can_toggle = perms.get().can_toggle_subtasks();
                    let can_edit = perms.get().can_edit();
                    task.data().map(|t| t.subtasks).unwrap_or_default().into_iter().map(|subtask| {
                        let id = subtask.id;
                        let checked = subtask.is_completed;
                        let class = if checked { "subtask done" } else { "subtask" };
                        let text = subtask.text.clone();
                        let assignee = subtask.assignee.as_ref().map(|u| u.name());
                        view! {
                            <li class=class>
                                <input
                                    type="checkbox"
                                    prop:checked=checked
                                    disabled={!can_toggle}
                                    on:change=move |_| toggle(subtask.clone())
                                />
                                <span>{text}</span>
                                {assignee.map(|name| view! { <span class="muted">{name}</span> })}
                                {can_edit.then(|| view! {
                                    <DeleteConfirmButton button_class="icon-btn" on_confirm=move |_: ()| remove(id) />
                                })}
                            </li>
                        }
                    }).collect_view()
                }}
            </ul>
            <Show when=move || perms.get().can_edit()>
                <form class="inline-form" on:submit=on_add>
                    <input
                        type="text"
                        placeholder="Add a subtask"
                        prop:value=move || draft.get()
                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                    />
                    <button type="submit" class="btn-secondary">"Add"</button>
                </form>
            </Show>
        </section>
    }
}

#[component]
fn AssigneeList(task: UseApi<Task>, task_id: Uuid, perms: Memo<TaskPermissions>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let assignee_ids = Signal::derive(move || {
        task.data()
            .map(|t| t.assignees.iter().map(|u| u.id).collect::<Vec<_>>())
            .unwrap_or_default()
    });
    let project_scope = move || task.data().and_then(|t| t.project.map(|p| p.id.to_string()));

    let add = move |user: User| {
        let client = ctx.client();
        spawn_mutation(
            store,
            Some("Assignee added"),
            "Failed to add assignee",
            async move { commands::add_assignees(&client, task_id, vec![user.id]).await },
            move |_| task.refetch(),
        );
    };

    let remove = move |user_id: Uuid| {
        let client = ctx.client();
        spawn_mutation(
            store,
            Some("Assignee removed"),
            "Failed to remove assignee",
            async move { commands::remove_assignee(&client, task_id, user_id).await },
            move |_| task.refetch(),
        );
    };

    view! {
        <section class="assignee-section">
            <h3>"Assignees"</h3>
            <ul class="member-list">
                {move || {
                    let can_edit = perms.get().can_edit();
                    let assignees = task.data().map(|t| t.assignees).unwrap_or_default();
                    if assignees.is_empty() {
                        return view! { <li class="muted">"Nobody assigned"</li> }.into_any();
                    }
                    assignees.into_iter().map(|user| {
                        let id = user.id;
                        view! {
                            <li class="member-row">
                                <Avatar name=user.name() url=user.avatar.clone() />
                                <span>{user.name()}</span>
                                {can_edit.then(|| view! {
                                    <DeleteConfirmButton button_class="icon-btn" prompt="Remove?" on_confirm=move |_: ()| remove(id) />
                                })}
                            </li>
                        }
                    }).collect_view().into_any()
                }}
            </ul>
            <Show when=move || perms.get().can_edit()>
                {move || view! {
                    <UserPicker
                        project_id=project_scope()
                        exclude=assignee_ids
                        placeholder="Add assignee..."
                        on_select=add
                    />
                }}
            </Show>
        </section>
    }
}
