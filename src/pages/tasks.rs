//! Task List Page

use leptos::prelude::*;

use taskflow_client::filters::TaskFilter;
use taskflow_client::models::Task;
use taskflow_client::RequestSpec;

use crate::components::{ErrorBanner, FilterBar, LoadingScreen, TaskCard};
use crate::hooks::use_api;
use crate::router::{use_router, Route};

#[component]
pub fn TasksPage() -> impl IntoView {
    let router = use_router();
    let filter = RwSignal::new(TaskFilter::default());
    // Reading `filter` makes every filter change a re-fetch
    let tasks = use_api::<Vec<Task>, _>(move || RequestSpec::get(filter.with(|f| f.path())));

    view! {
        <div class="page">
            <header class="page-header">
                <h1>"Tasks"</h1>
                <button class="btn-primary" on:click=move |_| router.navigate(Route::NewTask)>"New Task"</button>
            </header>
            <FilterBar filter=filter />
            {move || {
                if tasks.loading() && tasks.data().is_none() {
                    return view! { <LoadingScreen message="Loading tasks..." /> }.into_any();
                }
                if let Some(err) = tasks.error() {
                    return view! {
                        <ErrorBanner message=err.message />
                        <button class="btn-link" on:click=move |_| tasks.refetch()>"Retry"</button>
                    }.into_any();
                }
                let items = tasks.data().unwrap_or_default();
                if items.is_empty() {
                    return view! { <p class="empty-state">"No tasks match these filters"</p> }.into_any();
                }
                view! {
                    <div class=move || if tasks.loading() { "task-list reloading" } else { "task-list" }>
                        {items.into_iter().map(|task| view! { <TaskCard task=task /> }).collect_view()}
                    </div>
                }.into_any()
            }}
        </div>
    }
}
