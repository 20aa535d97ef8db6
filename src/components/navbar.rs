//! Navbar Component
//!
//! Top bar of the private layout: global search, notification bell, user menu.

use leptos::prelude::*;
use leptos::task::spawn_local;

use taskflow_client::filters::unread_count;
use taskflow_client::format::time_ago;
use taskflow_client::models::SearchResults;

use crate::commands::{notification, search};
use crate::components::Avatar;
use crate::context::{use_app_context, use_notifications, use_user};
use crate::router::{use_router, Route};
use crate::store::{toast_error, toast_info, use_app_store, AppStateStoreFields};

/// Entries in the bell dropdown
const BELL_PREVIEW: usize = 5;

#[component]
pub fn Navbar(#[prop(into)] on_toggle_sidebar: Callback<()>) -> impl IntoView {
    view! {
        <header class="navbar">
            <button class="icon-btn sidebar-toggle" on:click=move |_| on_toggle_sidebar.run(())>"☰"</button>
            <SearchBox />
            <div class="navbar-actions">
                <NotificationBell />
                <UserMenu />
            </div>
        </header>
    }
}

/// Global search over tasks and projects
#[component]
fn SearchBox() -> impl IntoView {
    let ctx = use_app_context();
    let router = use_router();
    let (query, set_query) = signal(String::new());
    let (results, set_results) = signal(SearchResults::default());
    let (open, set_open) = signal(false);
    let search_seq = StoredValue::new(0u32);

    let on_input = move |ev| {
        let text = event_target_value(&ev);
        set_query.set(text.clone());
        search_seq.update_value(|n| *n += 1);
        let seq = search_seq.get_value();
        let client = ctx.client();
        spawn_local(async move {
            let found = search::global_search(&client, &text).await;
            if search_seq.try_get_value() != Some(seq) {
                return;
            }
            match found {
                Ok(found) => {
                    set_open.set(!found.is_empty());
                    set_results.set(found);
                }
                Err(e) => log::warn!("[SEARCH] global search failed: {}", e),
            }
        });
    };

    let go = move |route: Route| {
        set_open.set(false);
        set_query.set(String::new());
        set_results.set(SearchResults::default());
        router.navigate(route);
    };

    view! {
        <div class="search-box">
            <input
                type="search"
                placeholder="Search tasks and projects..."
                prop:value=move || query.get()
                on:input=on_input
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Escape" {
                        set_open.set(false);
                    }
                }
            />
            <Show when=move || open.get()>
                <div class="search-results">
                    {move || {
                        let found = results.get();
                        view! {
                            {(!found.tasks.is_empty()).then(|| view! { <div class="search-group">"Tasks"</div> })}
                            {found.tasks.into_iter().map(|task| {
                                let id = task.id.to_string();
                                view! {
                                    <button class="search-item" on:click=move |_| go(Route::TaskDetail(id.clone()))>
                                        {task.title}
                                    </button>
                                }
                            }).collect_view()}
                            {(!found.projects.is_empty()).then(|| view! { <div class="search-group">"Projects"</div> })}
                            {found.projects.into_iter().map(|project| {
                                let id = project.id.to_string();
                                view! {
                                    <button class="search-item" on:click=move |_| go(Route::ProjectDetail(id.clone()))>
                                        {project.name}
                                    </button>
                                }
                            }).collect_view()}
                        }
                    }}
                </div>
            </Show>
        </div>
    }
}

/// Bell with unread badge and the latest notifications
#[component]
fn NotificationBell() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let feed = use_notifications();
    let router = use_router();
    let (open, set_open) = signal(false);

    let mark_all = move |_| {
        let client = ctx.client();
        let items = feed.items();
        spawn_local(async move {
            let failures = notification::mark_all_read(&client, &items).await;
            if let Some(first) = failures.first() {
                toast_error(&store, format!("Failed to mark notifications as read: {}", first));
            }
            feed.refetch();
        });
    };

    view! {
        <div class="notification-bell">
            <button class="icon-btn" on:click=move |_| set_open.update(|o| *o = !*o)>
                "🔔"
                <Show when=move || { store.unread_count().get() > 0 }>
                    <span class="badge-count">{move || store.unread_count().get()}</span>
                </Show>
            </button>
            <Show when=move || open.get()>
                <div class="dropdown notification-dropdown">
                    <div class="dropdown-header">
                        <span>"Notifications"</span>
                        <button
                            class="btn-link"
                            disabled=move || unread_count(&feed.items()) == 0
                            on:click=mark_all
                        >
                            "Mark all read"
                        </button>
                    </div>
                    {move || {
                        let items = feed.items();
                        if items.is_empty() {
                            return view! { <p class="muted">"No notifications"</p> }.into_any();
                        }
                        let now = chrono::Utc::now();
                        items.into_iter().take(BELL_PREVIEW).map(|n| {
                            let class = if n.is_read { "notification-item" } else { "notification-item unread" };
                            let when = n.created_at.map(|at| time_ago(at, now)).unwrap_or_default();
                            view! {
                                <div class=class>
                                    <p>{n.message}</p>
                                    <span class="muted">{when}</span>
                                </div>
                            }
                        }).collect_view().into_any()
                    }}
                    <button
                        class="btn-link"
                        on:click=move |_| {
                            set_open.set(false);
                            router.navigate(Route::Notifications);
                        }
                    >
                        "View all"
                    </button>
                </div>
            </Show>
        </div>
    }
}

/// Avatar with profile and logout entries
#[component]
fn UserMenu() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let user = use_user();
    let router = use_router();
    let (open, set_open) = signal(false);

    let logout = move |_| {
        ctx.auth().logout();
        user.clear();
        set_open.set(false);
        toast_info(&store, "You have been logged out");
        router.replace(Route::Login);
    };

    view! {
        <div class="user-menu">
            <button class="user-menu-trigger" on:click=move |_| set_open.update(|o| *o = !*o)>
                {move || {
                    let (name, avatar) = user
                        .current_user
                        .with(|u| u.as_ref().map(|u| (u.name.clone(), u.avatar.clone())))
                        .unwrap_or_else(|| ("User".to_string(), None));
                    view! { <Avatar name=name url=avatar /> }
                }}
            </button>
            <Show when=move || open.get()>
                <div class="dropdown">
                    <div class="dropdown-header">
                        {move || user.current_user.with(|u| u.as_ref().map(|u| u.email.clone()).unwrap_or_default())}
                    </div>
                    <button
                        class="dropdown-item"
                        on:click=move |_| {
                            set_open.set(false);
                            router.navigate(Route::Settings);
                        }
                    >
                        "Settings"
                    </button>
                    <button class="dropdown-item danger" on:click=logout>"Log out"</button>
                </div>
            </Show>
        </div>
    }
}
