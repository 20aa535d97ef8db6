//! Login Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use taskflow_client::auth::GoogleFlow;
use taskflow_client::Persistence;

use crate::components::{ErrorBanner, GoogleButton};
use crate::context::use_app_context;
use crate::router::{use_router, Route};

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (keep_logged_in, set_keep_logged_in) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (submitting, set_submitting) = signal(false);
    let notice = router.take_flash();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        set_error.set(None);
        set_submitting.set(true);
        let auth = ctx.auth();
        let email = email.get_untracked();
        let password = password.get_untracked();
        let persistence = Persistence::from_keep_logged_in(keep_logged_in.get_untracked());
        spawn_local(async move {
            match auth.login(&email, &password, persistence).await {
                Ok(_) => router.replace(Route::Home),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_submitting.set(false);
        });
    };

    let on_google = move |credential: Option<String>| {
        set_error.set(None);
        let auth = ctx.auth();
        let persistence = Persistence::from_keep_logged_in(keep_logged_in.get_untracked());
        spawn_local(async move {
            match auth
                .login_with_google(credential.as_deref(), persistence, GoogleFlow::Login)
                .await
            {
                Ok(_) => router.replace(Route::Home),
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="auth-card">
            <h1>"Welcome back"</h1>
            <p class="muted">"Sign in to continue to TaskFlow"</p>
            {notice.map(|message| view! { <div class="success-banner">{message}</div> })}
            {move || error.get().map(|message| view! { <ErrorBanner message=message /> })}
            <form on:submit=on_submit>
                <label>
                    "Email"
                    <input
                        type="email"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Password"
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>
                <div class="form-row">
                    <label class="checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || keep_logged_in.get()
                            on:change=move |ev| set_keep_logged_in.set(event_target_checked(&ev))
                        />
                        "Keep me logged in"
                    </label>
                    <a href="/forgot-password" on:click=move |ev| {
                        ev.prevent_default();
                        router.navigate(Route::ForgotPassword);
                    }>"Forgot password?"</a>
                </div>
                <button type="submit" class="btn-primary" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
            <GoogleButton on_credential=on_google />
            <p class="auth-switch">
                "Don't have an account? "
                <a href="/signup" on:click=move |ev| {
                    ev.prevent_default();
                    router.navigate(Route::SignUp);
                }>"Sign up"</a>
            </p>
        </div>
    }
}
