//! Dashboard Page
//!
//! Greeting, task counts, today's and upcoming tasks, running projects.

use chrono::{Local, Timelike};
use leptos::prelude::*;

use taskflow_client::dashboard::{greeting, task_stats, todays_tasks, upcoming_tasks};
use taskflow_client::endpoints;
use taskflow_client::models::{Project, Task};

use crate::components::{ErrorBanner, LoadingScreen, TaskCard};
use crate::context::use_user;
use crate::hooks::use_get;
use crate::router::{use_router, Route};

/// Running projects shown on the dashboard
const PROJECT_PREVIEW: usize = 4;

#[component]
pub fn HomePage() -> impl IntoView {
    let user = use_user();
    let router = use_router();
    let tasks = use_get::<Vec<Task>>(endpoints::USER_TASKS);
    let projects = use_get::<Vec<Project>>(endpoints::PROJECTS);

    let now = Local::now();
    let today = now.date_naive();
    let salutation = greeting(now.hour());

    let task_sections = move || {
        if tasks.loading() && tasks.data().is_none() {
            return view! { <LoadingScreen message="Loading your tasks..." /> }.into_any();
        }
        if let Some(err) = tasks.error() {
            return view! { <ErrorBanner message=err.message /> }.into_any();
        }
        let all = tasks.data().unwrap_or_default();
        let stats = task_stats(&all, today);
        let today_list = todays_tasks(&all, today)
            .into_iter()
            .cloned()
            .map(|task| view! { <TaskCard task=task compact=true /> })
            .collect::<Vec<_>>();
        let upcoming = upcoming_tasks(&all, today)
            .into_iter()
            .cloned()
            .map(|task| view! { <TaskCard task=task /> })
            .collect::<Vec<_>>();
        let no_today = today_list.is_empty();
        let no_upcoming = upcoming.is_empty();

        view! {
            <div class="stats-grid">
                <div class="stat-card">
                    <span class="stat-value">{stats.completed}</span>
                    <span class="stat-label">"Completed"</span>
                </div>
                <div class="stat-card">
                    <span class="stat-value">{stats.pending}</span>
                    <span class="stat-label">"Pending"</span>
                </div>
                <div class="stat-card overdue">
                    <span class="stat-value">{stats.overdue}</span>
                    <span class="stat-label">"Overdue"</span>
                </div>
            </div>
            <section class="dashboard-section">
                <h2>"Today's tasks"</h2>
                {no_today.then(|| view! { <p class="muted">"Nothing due today"</p> })}
                <div class="task-list">{today_list}</div>
            </section>
            <section class="dashboard-section">
                <h2>"Upcoming"</h2>
                {no_upcoming.then(|| view! { <p class="muted">"No upcoming tasks"</p> })}
                <div class="task-list">{upcoming}</div>
            </section>
        }
        .into_any()
    };

    let project_section = move || {
        let items = projects.data().unwrap_or_default();
        if items.is_empty() {
            return view! { <p class="muted">"No running projects"</p> }.into_any();
        }
        items
            .into_iter()
            .take(PROJECT_PREVIEW)
            .map(|project| {
                let id = project.id.to_string();
                let members = project.members.len();
                view! {
                    <div class="project-card" on:click=move |_| router.navigate(Route::ProjectDetail(id.clone()))>
                        <h3>{project.name}</h3>
                        <span class="muted">{format!("{} members", members)}</span>
                    </div>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="page dashboard">
            <header class="page-header">
                <h1>{move || format!("{}, {}!", salutation, user.first_name())}</h1>
                <button class="btn-primary" on:click=move |_| router.navigate(Route::NewTask)>"New Task"</button>
            </header>
            {task_sections}
            <section class="dashboard-section">
                <h2>"Running projects"</h2>
                <div class="project-grid">{project_section}</div>
            </section>
        </div>
    }
}
