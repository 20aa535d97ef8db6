//! Loading Screen Component

use leptos::prelude::*;

#[component]
pub fn LoadingScreen(
    #[prop(into, default = "Loading...".to_string())] message: String,
    #[prop(optional)] fullscreen: bool,
) -> impl IntoView {
    let class = if fullscreen { "loading-screen fullscreen" } else { "loading-screen" };
    view! {
        <div class=class>
            <div class="spinner"></div>
            <p>{message}</p>
        </div>
    }
}

/// Inline error banner
#[component]
pub fn ErrorBanner(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="error-banner" role="alert">{message}</div>
    }
}
