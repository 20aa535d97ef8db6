//! Important Tasks Page

use leptos::prelude::*;

use taskflow_client::endpoints;
use taskflow_client::models::ImportantEntry;

use crate::commands::task as commands;
use crate::components::{ErrorBanner, LoadingScreen, TaskCard};
use crate::context::use_app_context;
use crate::hooks::{spawn_mutation, use_get};
use crate::store::use_app_store;

#[component]
pub fn ImportantPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let entries = use_get::<Vec<ImportantEntry>>(endpoints::IMPORTANT_TASKS);

    let unmark = move |mark_id: uuid::Uuid| {
        let client = ctx.client();
        spawn_mutation(
            store,
            Some("Removed from important"),
            "Failed to update important tasks",
            async move { commands::unmark_important(&client, mark_id).await },
            move |_| entries.refetch(),
        );
    };

    view! {
        <div class="page">
            <header class="page-header">
                <h1>"Important"</h1>
            </header>
            {move || {
                if entries.loading() && entries.data().is_none() {
                    return view! { <LoadingScreen message="Loading important tasks..." /> }.into_any();
                }
                if let Some(err) = entries.error() {
                    return view! { <ErrorBanner message=err.message /> }.into_any();
                }
                let items = entries.data().unwrap_or_default();
                if items.is_empty() {
                    return view! { <p class="empty-state">"Star a task to see it here"</p> }.into_any();
                }
                view! {
                    <div class="task-list">
                        {items.into_iter().map(|entry| {
                            let mark_id = entry.mark_id();
                            view! {
                                <div class="important-row">
                                    <TaskCard task=entry.task().clone() />
                                    <button class="icon-btn star active" title="Remove from important" on:click=move |_| unmark(mark_id)>
                                        "★"
                                    </button>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }.into_any()
            }}
        </div>
    }
}
