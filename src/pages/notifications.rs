//! Notifications Page
//!
//! Inbox over the shared notification feed: all/unread tabs, search,
//! mark read, mark all read, delete.

use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use taskflow_client::filters::{filter_notifications, unread_count, NotificationTab};
use taskflow_client::format::time_ago;

use crate::commands::notification as commands;
use crate::components::{DeleteConfirmButton, ErrorBanner, LoadingScreen};
use crate::context::{use_app_context, use_notifications};
use crate::hooks::spawn_mutation;
use crate::store::{toast_error, toast_success, use_app_store};

#[component]
pub fn NotificationsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let feed = use_notifications();
    let (tab, set_tab) = signal(NotificationTab::All);
    let (search, set_search) = signal(String::new());

    let mark_read = move |id: Uuid| {
        let client = ctx.client();
        spawn_mutation(
            store,
            None,
            "Failed to mark notification as read",
            async move { commands::mark_read(&client, id).await },
            move |_| feed.refetch(),
        );
    };

    let remove = move |id: Uuid| {
        let client = ctx.client();
        spawn_mutation(
            store,
            Some("Notification deleted"),
            "Failed to delete notification",
            async move { commands::delete_notification(&client, id).await },
            move |_| feed.refetch(),
        );
    };

    let mark_all = move |_| {
        let client = ctx.client();
        let items = feed.items();
        spawn_local(async move {
            let failures = commands::mark_all_read(&client, &items).await;
            match failures.first() {
                None => toast_success(&store, "All notifications marked as read"),
                Some(first) => toast_error(
                    &store,
                    format!("Failed to mark {} notification(s) as read: {}", failures.len(), first),
                ),
            }
            feed.refetch();
        });
    };

    let tab_button = move |value: NotificationTab| {
        view! {
            <button
                class=move || if tab.get() == value { "tab active" } else { "tab" }
                on:click=move |_| set_tab.set(value)
            >
                {value.label()}
                {move || (value == NotificationTab::Unread).then(|| {
                    let count = unread_count(&feed.items());
                    view! { <span class="badge-count">{count}</span> }
                })}
            </button>
        }
    };

    let list = move || {
        let state = feed.0;
        if state.loading() && state.data().is_none() {
            return view! { <LoadingScreen message="Loading notifications..." /> }.into_any();
        }
        if let (Some(err), None) = (state.error(), state.data()) {
            return view! { <ErrorBanner message=err.message /> }.into_any();
        }
        let items = feed.items();
        let query = search.get();
        let visible = filter_notifications(&items, tab.get(), &query);
        if visible.is_empty() {
            return view! { <p class="empty-state">"No notifications"</p> }.into_any();
        }
        let now = chrono::Utc::now();
        visible
            .into_iter()
            .map(|n| {
                let id = n.id;
                let unread = !n.is_read;
                let when = n.created_at.map(|at| time_ago(at, now)).unwrap_or_default();
                view! {
                    <div class={if unread { "notification-row unread" } else { "notification-row" }}>
                        <div class="notification-body">
                            <span class="badge badge-gray">{n.kind.clone()}</span>
                            <p>{n.message.clone()}</p>
                            <span class="muted">{when}</span>
                        </div>
                        <div class="notification-actions">
                            {unread.then(|| view! {
                                <button class="btn-link" on:click=move |_| mark_read(id)>"Mark read"</button>
                            })}
                            <DeleteConfirmButton button_class="icon-btn" on_confirm=move |_: ()| remove(id) />
                        </div>
                    </div>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="page">
            <header class="page-header">
                <h1>"Notifications"</h1>
                <button
                    class="btn-secondary"
                    disabled=move || unread_count(&feed.items()) == 0
                    on:click=mark_all
                >
                    "Mark all as read"
                </button>
            </header>
            <div class="toolbar">
                <div class="tab-bar">
                    {tab_button(NotificationTab::All)}
                    {tab_button(NotificationTab::Unread)}
                </div>
                <input
                    type="search"
                    placeholder="Search notifications..."
                    prop:value=move || search.get()
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                />
            </div>
            <div class="notification-list">{list}</div>
        </div>
    }
}
