//! Sidebar Component
//!
//! Section navigation of the private layout.

use leptos::prelude::*;

use crate::router::{use_router, Route};
use crate::store::{use_app_store, AppStateStoreFields};

const NAV_ITEMS: [(Route, &str, &str); 10] = [
    (Route::Home, "🏠", "Dashboard"),
    (Route::Tasks, "✅", "Tasks"),
    (Route::Projects, "📁", "Projects"),
    (Route::Calendar, "📅", "Calendar"),
    (Route::Important, "⭐", "Important"),
    (Route::Notes, "📝", "Notes"),
    (Route::Notifications, "🔔", "Notifications"),
    (Route::Team, "👥", "Team"),
    (Route::NewTask, "➕", "New Task"),
    (Route::Settings, "⚙", "Settings"),
];

/// Count shown next to an item; only the inbox entry carries one
fn unread_badge(shows_unread: bool, unread: usize) -> Option<usize> {
    (shows_unread && unread > 0).then_some(unread)
}

#[component]
pub fn Sidebar(collapsed: ReadSignal<bool>) -> impl IntoView {
    let router = use_router();
    let store = use_app_store();

    let items = NAV_ITEMS
        .into_iter()
        .map(|(route, icon, label)| {
            let is_active = {
                let route = route.clone();
                move || router.route.with(|current| current.section() == route)
            };
            let shows_unread = route == Route::Notifications;
            let target = route.clone();
            view! {
                <button
                    class=move || if is_active() { "sidebar-item active" } else { "sidebar-item" }
                    on:click=move |_| router.navigate(target.clone())
                >
                    <span class="sidebar-icon">{icon}</span>
                    <span class="sidebar-label">{label}</span>
                    {move || {
                        unread_badge(shows_unread, store.unread_count().get())
                            .map(|count| view! { <span class="badge-count">{count}</span> })
                    }}
                </button>
            }
        })
        .collect_view();

    view! {
        <nav class=move || if collapsed.get() { "sidebar collapsed" } else { "sidebar" }>
            <div class="sidebar-brand">
                <span class="brand-mark">"TF"</span>
                <span class="sidebar-label">"TaskFlow"</span>
            </div>
            {items}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unread_badge_only_on_inbox_with_unread() {
        assert_eq!(unread_badge(true, 3), Some(3));
        assert_eq!(unread_badge(true, 0), None);
        assert_eq!(unread_badge(false, 3), None);
    }

    #[test]
    fn test_inbox_is_the_only_badge_item() {
        let badged: Vec<_> = NAV_ITEMS
            .iter()
            .filter(|(route, _, _)| *route == Route::Notifications)
            .map(|(_, _, label)| *label)
            .collect();
        assert_eq!(badged, vec!["Notifications"]);
    }
}
