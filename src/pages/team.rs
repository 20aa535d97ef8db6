//! Team Page

use leptos::prelude::*;

use taskflow_client::endpoints;
use taskflow_client::models::User;

use crate::components::{Avatar, ErrorBanner, LoadingScreen};
use crate::hooks::use_get;

#[component]
pub fn TeamPage() -> impl IntoView {
    let team = use_get::<Vec<User>>(endpoints::TEAM);
    let (search, set_search) = signal(String::new());

    view! {
        <div class="page">
            <header class="page-header">
                <h1>"Team"</h1>
                <input
                    type="search"
                    placeholder="Search people..."
                    prop:value=move || search.get()
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                />
            </header>
            {move || {
                if team.loading() && team.data().is_none() {
                    return view! { <LoadingScreen message="Loading team..." /> }.into_any();
                }
                if let Some(err) = team.error() {
                    return view! { <ErrorBanner message=err.message /> }.into_any();
                }
                let needle = search.get().to_lowercase();
                let members: Vec<User> = team
                    .data()
                    .unwrap_or_default()
                    .into_iter()
                    .filter(|u| {
                        needle.is_empty()
                            || u.name().to_lowercase().contains(&needle)
                            || u.email.to_lowercase().contains(&needle)
                    })
                    .collect();
                if members.is_empty() {
                    return view! { <p class="empty-state">"No team members found"</p> }.into_any();
                }
                view! {
                    <div class="team-grid">
                        {members.into_iter().map(|u| view! {
                            <div class="team-card">
                                <Avatar name=u.name() url=u.avatar.clone() large=true />
                                <h3>{u.name()}</h3>
                                <p class="muted">{u.email.clone()}</p>
                            </div>
                        }).collect_view()}
                    </div>
                }.into_any()
            }}
        </div>
    }
}
