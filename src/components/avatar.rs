//! Avatar Component

use leptos::prelude::*;
use taskflow_client::models::initials;

/// Picture when a URL is known, initials otherwise
#[component]
pub fn Avatar(
    #[prop(into)] name: String,
    #[prop(into, default = None)] url: Option<String>,
    #[prop(optional)] large: bool,
) -> impl IntoView {
    let class = if large { "avatar avatar-lg" } else { "avatar" };
    let content = match url.filter(|u| !u.is_empty()) {
        Some(src) => view! { <img src=src alt=name.clone() /> }.into_any(),
        None => view! { <span>{initials(&name)}</span> }.into_any(),
    };

    view! {
        <div class=class title=name>
            {content}
        </div>
    }
}
