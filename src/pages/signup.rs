//! Sign-Up Page
//!
//! Registers, then logs in with the same credentials. When the follow-up
//! login fails the user is sent to the login page with a notice instead.

use leptos::prelude::*;
use leptos::task::spawn_local;

use taskflow_client::auth::{GoogleFlow, RegisterOutcome, SignUpForm};
use taskflow_client::Persistence;

use crate::components::{ErrorBanner, GoogleButton};
use crate::context::use_app_context;
use crate::router::{use_router, Route};

#[component]
pub fn SignUpPage() -> impl IntoView {
    let ctx = use_app_context();
    let router = use_router();

    let form = RwSignal::new(SignUpForm::default());
    let (error, set_error) = signal(None::<String>);
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        set_error.set(None);
        set_submitting.set(true);
        let auth = ctx.auth();
        let form = form.get_untracked();
        spawn_local(async move {
            match auth.register(&form).await {
                Ok(RegisterOutcome::LoggedIn(_)) => router.replace(Route::Home),
                Ok(RegisterOutcome::LoginRequired(message)) => {
                    router.navigate_with_flash(Route::Login, message)
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_submitting.set(false);
        });
    };

    let on_google = move |credential: Option<String>| {
        set_error.set(None);
        let auth = ctx.auth();
        spawn_local(async move {
            match auth
                .login_with_google(credential.as_deref(), Persistence::SessionScoped, GoogleFlow::SignUp)
                .await
            {
                Ok(_) => router.replace(Route::Home),
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    let text_field = move |label: &'static str,
                           kind: &'static str,
                           read: fn(&SignUpForm) -> String,
                           write: fn(&mut SignUpForm, String)| {
        view! {
            <label>
                {label}
                <input
                    type=kind
                    prop:value=move || form.with(read)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| write(f, value));
                    }
                />
            </label>
        }
    };

    view! {
        <div class="auth-card">
            <h1>"Create your account"</h1>
            {move || error.get().map(|message| view! { <ErrorBanner message=message /> })}
            <form on:submit=on_submit>
                <div class="form-row">
                    {text_field("First name", "text", |f| f.first_name.clone(), |f, v| f.first_name = v)}
                    {text_field("Last name", "text", |f| f.last_name.clone(), |f, v| f.last_name = v)}
                </div>
                {text_field("Email", "email", |f| f.email.clone(), |f, v| f.email = v)}
                {text_field("Password", "password", |f| f.password.clone(), |f, v| f.password = v)}
                <button type="submit" class="btn-primary" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Creating account..." } else { "Sign up" }}
                </button>
            </form>
            <GoogleButton on_credential=on_google />
            <p class="auth-switch">
                "Already have an account? "
                <a href="/login" on:click=move |ev| {
                    ev.prevent_default();
                    router.navigate(Route::Login);
                }>"Log in"</a>
            </p>
        </div>
    }
}
