//! User Picker Component
//!
//! Search-as-you-type user selector for assignees and project members.
//! Arrow keys move the highlight, Enter/Tab picks it.

use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use taskflow_client::models::User;

use crate::commands::search;
use crate::context::use_app_context;

/// Results shown at most
const MAX_SUGGESTIONS: usize = 6;

/// User search input with suggestions
///
/// Props:
/// - project_id: restrict the search to that project's members
/// - exclude: users already picked, hidden from suggestions
/// - on_select: Callback when a user is chosen
#[component]
pub fn UserPicker(
    #[prop(into, default = None)] project_id: Option<String>,
    #[prop(into, default = Signal::from(Vec::new()))] exclude: Signal<Vec<Uuid>>,
    #[prop(into, default = "Search users...".to_string())] placeholder: String,
    #[prop(into)] on_select: Callback<User>,
) -> impl IntoView {
    let ctx = use_app_context();
    let (query, set_query) = signal(String::new());
    let (results, set_results) = signal(Vec::<User>::new());
    let (selected_idx, set_selected_idx) = signal(0usize);
    // Latest search wins; earlier responses are dropped
    let search_seq = StoredValue::new(0u32);
    let project_id = StoredValue::new(project_id);

    let suggestions = move || {
        let excluded = exclude.get();
        results
            .get()
            .into_iter()
            .filter(|u| !excluded.contains(&u.id))
            .take(MAX_SUGGESTIONS)
            .collect::<Vec<_>>()
    };

    let run_search = move |text: String| {
        search_seq.update_value(|n| *n += 1);
        let seq = search_seq.get_value();
        if text.trim().is_empty() {
            set_results.set(Vec::new());
            return;
        }
        let client = ctx.client();
        let scope = project_id.get_value();
        spawn_local(async move {
            let found = match scope {
                Some(pid) => search::search_project_assignees(&client, &pid, &text).await,
                None => search::search_assignees(&client, &text).await,
            };
            if search_seq.try_get_value() != Some(seq) {
                return;
            }
            match found {
                Ok(users) => set_results.set(users),
                Err(e) => {
                    log::warn!("[SEARCH] user search failed: {}", e);
                    set_results.set(Vec::new());
                }
            }
        });
    };

    let pick = move |user: User| {
        on_select.run(user);
        set_query.set(String::new());
        set_results.set(Vec::new());
        set_selected_idx.set(0);
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let sugg = suggestions();
        match ev.key().as_str() {
            "Enter" | "Tab" => {
                if let Some(user) = sugg.get(selected_idx.get()).cloned() {
                    ev.prevent_default();
                    pick(user);
                }
            }
            "ArrowDown" => {
                ev.prevent_default();
                let sel = selected_idx.get();
                if sel + 1 < sugg.len() {
                    set_selected_idx.set(sel + 1);
                }
            }
            "ArrowUp" => {
                ev.prevent_default();
                let sel = selected_idx.get();
                if sel > 0 {
                    set_selected_idx.set(sel - 1);
                }
            }
            "Escape" => set_results.set(Vec::new()),
            _ => {}
        }
    };

    view! {
        <div class="user-picker">
            <input
                type="text"
                placeholder=placeholder
                autocomplete="off"
                prop:value=move || query.get()
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    set_query.set(text.clone());
                    set_selected_idx.set(0);
                    run_search(text);
                }
                on:keydown=on_keydown
            />
            {move || {
                let sugg = suggestions();
                if sugg.is_empty() {
                    return view! { <div></div> }.into_any();
                }
                let selected = selected_idx.get();
                view! {
                    <div class="autocomplete-list">
                        {sugg.into_iter().enumerate().map(|(i, user)| {
                            let label = format!("{} ({})", user.name(), user.email);
                            view! {
                                <button
                                    type="button"
                                    class=if i == selected { "autocomplete-item selected" } else { "autocomplete-item" }
                                    on:click=move |ev| {
                                        ev.prevent_default();
                                        pick(user.clone());
                                    }
                                >
                                    {label}
                                </button>
                            }
                        }).collect_view()}
                    </div>
                }.into_any()
            }}
        </div>
    }
}
