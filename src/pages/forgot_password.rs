//! Forgot Password Page
//!
//! Two steps: mail an OTP, then submit it with the new password.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::ErrorBanner;
use crate::context::use_app_context;
use crate::router::{use_router, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    RequestOtp,
    Confirm,
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let ctx = use_app_context();
    let router = use_router();

    let (step, set_step) = signal(Step::RequestOtp);
    let (email, set_email) = signal(String::new());
    let (otp, set_otp) = signal(String::new());
    let (new_password, set_new_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (error, set_error) = signal(None::<String>);
    let (notice, set_notice) = signal(None::<String>);
    let (submitting, set_submitting) = signal(false);

    let request_otp = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);
        set_submitting.set(true);
        let auth = ctx.auth();
        let email = email.get_untracked();
        spawn_local(async move {
            match auth.request_password_reset(&email).await {
                Ok(message) => {
                    set_notice.set(Some(message.to_string()));
                    set_step.set(Step::Confirm);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_submitting.set(false);
        });
    };

    let confirm = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);
        set_submitting.set(true);
        let auth = ctx.auth();
        let (email, otp, new_password, confirm_password) = (
            email.get_untracked(),
            otp.get_untracked(),
            new_password.get_untracked(),
            confirm_password.get_untracked(),
        );
        spawn_local(async move {
            match auth
                .confirm_password_reset(&email, &otp, &new_password, &confirm_password)
                .await
            {
                Ok(message) => router.navigate_with_flash(Route::Login, message),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_submitting.set(false);
        });
    };

    let request_form = move || {
        view! {
            <form on:submit=request_otp>
                <p class="muted">"Enter your email and we'll send you a one-time code."</p>
                <label>
                    "Email"
                    <input
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" class="btn-primary" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Sending..." } else { "Send OTP" }}
                </button>
            </form>
        }
    };

    let confirm_form = move || {
        view! {
            <form on:submit=confirm>
                <label>
                    "OTP"
                    <input
                        type="text"
                        inputmode="numeric"
                        prop:value=move || otp.get()
                        on:input=move |ev| set_otp.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "New password"
                    <input
                        type="password"
                        prop:value=move || new_password.get()
                        on:input=move |ev| set_new_password.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Confirm password"
                    <input
                        type="password"
                        prop:value=move || confirm_password.get()
                        on:input=move |ev| set_confirm_password.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" class="btn-primary" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Resetting..." } else { "Reset password" }}
                </button>
                <button
                    type="button"
                    class="btn-link"
                    on:click=move |_| {
                        set_error.set(None);
                        set_notice.set(None);
                        set_step.set(Step::RequestOtp);
                    }
                >
                    "Use a different email"
                </button>
            </form>
        }
    };

    view! {
        <div class="auth-card">
            <h1>"Reset password"</h1>
            {move || notice.get().map(|message| view! { <div class="success-banner">{message}</div> })}
            {move || error.get().map(|message| view! { <ErrorBanner message=message /> })}
            {move || match step.get() {
                Step::RequestOtp => request_form().into_any(),
                Step::Confirm => confirm_form().into_any(),
            }}
            <p class="auth-switch">
                <a href="/login" on:click=move |ev| {
                    ev.prevent_default();
                    router.navigate(Route::Login);
                }>"Back to login"</a>
            </p>
        </div>
    }
}
