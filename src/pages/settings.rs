//! Settings Page
//!
//! Profile editing (name, username, avatar), an OTP password change for
//! the signed-in email, and logout.

use leptos::prelude::*;
use leptos::task::spawn_local;

use taskflow_client::endpoints;
use taskflow_client::models::{ProfilePatch, User};
use taskflow_client::transport::FilePart;

use crate::commands::user as commands;
use crate::components::{read_file, Avatar, ErrorBanner, LoadingScreen};
use crate::context::{use_app_context, use_user};
use crate::hooks::use_get;
use crate::router::{use_router, Route};
use crate::store::{toast_error, toast_success, use_app_store};

const PROFILE_SAVED: &str = "Profile updated successfully!";
const PASSWORD_CHANGED: &str = "Password updated successfully!";

#[component]
pub fn SettingsPage() -> impl IntoView {
    let ctx = use_app_context();
    let user = use_user();
    let router = use_router();
    let profile = use_get::<User>(endpoints::ME);

    let logout = move |_| {
        ctx.auth().logout();
        user.clear();
        router.replace(Route::Login);
    };

    view! {
        <div class="page narrow">
            <header class="page-header">
                <h1>"Settings"</h1>
            </header>
            {move || {
                if profile.loading() && profile.data().is_none() {
                    return view! { <LoadingScreen message="Loading settings..." /> }.into_any();
                }
                match profile.data() {
                    Some(loaded) => {
                        let email = loaded.email.clone();
                        view! {
                            <ProfileForm loaded=loaded on_saved=move |_: ()| profile.refetch() />
                            <PasswordSection email=email />
                        }
                        .into_any()
                    }
                    None => view! {
                        <section class="settings-card">
                            <ErrorBanner message="Could not load your profile settings." />
                            <button class="btn-secondary" on:click=move |_| profile.refetch()>
                                "Retry"
                            </button>
                        </section>
                    }
                    .into_any(),
                }
            }}
            <section class="settings-card">
                <h2>"Session"</h2>
                <button class="btn-danger" on:click=logout>"Log out"</button>
            </section>
        </div>
    }
}

#[component]
fn ProfileForm(loaded: User, #[prop(into)] on_saved: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let user = use_user();

    let initial = ProfilePatch::from_user(&loaded);
    let first_name = RwSignal::new(initial.first_name);
    let last_name = RwSignal::new(initial.last_name);
    let username = RwSignal::new(initial.username);
    let avatar = RwSignal::new(None::<FilePart>);
    let (preview, set_preview) = signal(None::<String>);
    let (saving, set_saving) = signal(false);
    let loaded = StoredValue::new(loaded);

    let patch = move || ProfilePatch {
        first_name: first_name.get(),
        last_name: last_name.get(),
        username: username.get(),
    };
    let has_changes = move || loaded.with_value(|u| patch().has_changes(u, avatar.with(Option::is_some)));

    let on_avatar = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        if let Some(old) = preview.get_untracked() {
            let _ = web_sys::Url::revoke_object_url(&old);
        }
        set_preview.set(web_sys::Url::create_object_url_with_blob(&file).ok());
        spawn_local(async move {
            match read_file(file).await {
                Ok(part) => avatar.set(Some(part)),
                Err(e) => {
                    log::error!("[SETTINGS] could not read avatar: {}", e);
                    toast_error(&store, "Could not read the selected image.");
                }
            }
        });
    };

    let on_save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() || !untrack(has_changes) {
            return;
        }
        set_saving.set(true);
        let client = ctx.client();
        let next = untrack(patch);
        let picked = avatar.get_untracked();
        spawn_local(async move {
            match commands::update_profile(&client, next, picked).await {
                Ok(stored) => {
                    user.set_user(stored);
                    toast_success(&store, PROFILE_SAVED);
                    on_saved.run(());
                }
                Err(e) => {
                    log::error!("[SETTINGS] profile update failed: {}", e);
                    toast_error(&store, e.detail_or("Failed to update profile. Please try again."));
                }
            }
            set_saving.set(false);
        });
    };

    view! {
        <section class="settings-card">
            <div class="profile-summary">
                {move || {
                    let (name, current) = loaded.with_value(|u| (u.display_name.clone(), u.avatar.clone()));
                    view! { <Avatar name=name url=preview.get().or(current) large=true /> }
                }}
                <label class="btn-secondary">
                    "Change avatar"
                    <input type="file" accept="image/*" class="visually-hidden" on:change=on_avatar />
                </label>
            </div>
            <form on:submit=on_save>
                <div class="form-row">
                    <label>
                        "First name"
                        <input
                            type="text"
                            prop:value=move || first_name.get()
                            on:input=move |ev| first_name.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Last name"
                        <input
                            type="text"
                            prop:value=move || last_name.get()
                            on:input=move |ev| last_name.set(event_target_value(&ev))
                        />
                    </label>
                </div>
                <label>
                    "Username"
                    <input
                        type="text"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Email"
                    <input type="email" prop:value={loaded.with_value(|u| u.email.clone())} disabled=true />
                </label>
                <button
                    type="submit"
                    class="btn-primary"
                    disabled={move || saving.get() || !has_changes()}
                >
                    {move || if saving.get() { "Saving..." } else { "Save changes" }}
                </button>
            </form>
        </section>
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PasswordStep {
    Start,
    Confirm,
}

#[component]
fn PasswordSection(email: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let email = StoredValue::new(email);

    let (step, set_step) = signal(PasswordStep::Start);
    let otp = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let (error, set_error) = signal(None::<String>);
    let (submitting, set_submitting) = signal(false);

    let send_otp = move |_| {
        set_error.set(None);
        set_submitting.set(true);
        let auth = ctx.auth();
        let email = email.get_value();
        spawn_local(async move {
            match auth.request_password_reset(&email).await {
                Ok(message) => {
                    toast_success(&store, message);
                    set_step.set(PasswordStep::Confirm);
                }
                Err(e) => toast_error(&store, e.to_string()),
            }
            set_submitting.set(false);
        });
    };

    let confirm = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);
        set_submitting.set(true);
        let auth = ctx.auth();
        let (email, code, password, again) = (
            email.get_value(),
            otp.get_untracked(),
            new_password.get_untracked(),
            confirm_password.get_untracked(),
        );
        spawn_local(async move {
            match auth.confirm_password_reset(&email, &code, &password, &again).await {
                Ok(_) => {
                    toast_success(&store, PASSWORD_CHANGED);
                    otp.set(String::new());
                    new_password.set(String::new());
                    confirm_password.set(String::new());
                    set_step.set(PasswordStep::Start);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <section class="settings-card">
            <h2>"Password"</h2>
            {move || error.get().map(|message| view! { <ErrorBanner message=message /> })}
            {move || match step.get() {
                PasswordStep::Start => view! {
                    <p class="muted">
                        "We'll send a one-time code to " {email.get_value()} " to confirm the change."
                    </p>
                    <button class="btn-secondary" disabled=move || submitting.get() on:click=send_otp>
                        {move || if submitting.get() { "Sending..." } else { "Send OTP & Change Password" }}
                    </button>
                }
                .into_any(),
                PasswordStep::Confirm => view! {
                    <form on:submit=confirm>
                        <label>
                            "OTP"
                            <input
                                type="text"
                                inputmode="numeric"
                                maxlength="6"
                                prop:value=move || otp.get()
                                on:input=move |ev| otp.set(event_target_value(&ev))
                            />
                        </label>
                        <label>
                            "New password"
                            <input
                                type="password"
                                prop:value=move || new_password.get()
                                on:input=move |ev| new_password.set(event_target_value(&ev))
                            />
                        </label>
                        <label>
                            "Confirm password"
                            <input
                                type="password"
                                prop:value=move || confirm_password.get()
                                on:input=move |ev| confirm_password.set(event_target_value(&ev))
                            />
                        </label>
                        <button type="submit" class="btn-primary" disabled=move || submitting.get()>
                            {move || if submitting.get() { "Updating..." } else { "Update password" }}
                        </button>
                        <button
                            type="button"
                            class="btn-link"
                            on:click=move |_| {
                                set_error.set(None);
                                set_step.set(PasswordStep::Start);
                            }
                        >
                            "Cancel"
                        </button>
                    </form>
                }
                .into_any(),
            }}
        </section>
    }
}
