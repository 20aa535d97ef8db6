//! Toast Host Component
//!
//! Renders the shared toast queue from the app store.

use leptos::prelude::*;

use crate::store::{dismiss_toast, use_app_store, AppStateStoreFields};

#[component]
pub fn ToastHost() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toast-stack" aria-live="polite">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div
                            class=toast.kind.class()
                            role="status"
                            on:click=move |_| dismiss_toast(&store, id)
                        >
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
