//! TaskFlow App
//!
//! Root component: builds the API client, provides the app-wide contexts,
//! gates the current route on the session and picks the layout.

use std::sync::Arc;

use leptos::prelude::*;
use reactive_stores::Store;

use taskflow_client::browser::{browser_session, FetchTransport};
use taskflow_client::endpoints;
use taskflow_client::filters::unread_count;
use taskflow_client::models::Notification;
use taskflow_client::ApiClient;

use crate::components::{LoadingScreen, Navbar, Sidebar, ToastHost};
use crate::config::AppConfig;
use crate::context::{use_app_context, AppContext, NotificationFeed, UserContext};
use crate::hooks::use_get;
use crate::pages::{
    CalendarPage, ForgotPasswordPage, HomePage, ImportantPage, LoginPage, NewTaskPage, NotesPage,
    NotificationsPage, ProjectDetailPage, ProjectsPage, SettingsPage, SignUpPage, TaskDetailPage,
    TasksPage, TeamPage,
};
use crate::router::{Route, RouterContext};
use crate::store::{set_unread_count, use_app_store, AppState};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let client = ApiClient::new(config.client.clone(), Arc::new(FetchTransport), browser_session());
    let ctx = AppContext::new(client, config);
    provide_context(ctx);
    provide_context(Store::new(AppState::default()));
    let router = RouterContext::install();
    provide_context(router);

    // Where the user may actually be, given the stored session
    let route = Memo::new(move |_| router.route.get().gate(ctx.is_authenticated()));

    // Keep the address bar in line with the gate
    Effect::new(move |_| {
        let requested = router.route.get();
        let allowed = route.get();
        if requested != allowed {
            log::info!("[APP] redirect {} -> {}", requested.path(), allowed.path());
            router.replace(allowed);
        }
    });

    let public = Memo::new(move |_| route.get().is_public());

    view! {
        {move || {
            if public.get() {
                view! { <PublicLayout route=route /> }.into_any()
            } else {
                view! { <PrivateLayout route=route /> }.into_any()
            }
        }}
        <ToastHost />
    }
}

#[component]
fn PublicLayout(route: Memo<Route>) -> impl IntoView {
    view! {
        <div class="public-layout">
            <div class="brand">
                <span class="brand-mark">"TF"</span>
                <span>"TaskFlow"</span>
            </div>
            {move || match route.get() {
                Route::SignUp => view! { <SignUpPage /> }.into_any(),
                Route::ForgotPassword => view! { <ForgotPasswordPage /> }.into_any(),
                _ => view! { <LoginPage /> }.into_any(),
            }}
        </div>
    }
}

/// Owns the user context and the polled notification feed
#[component]
fn PrivateLayout(route: Memo<Route>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let user = UserContext::new(ctx.auth(), ctx.client().session().cached_user());
    provide_context(user);
    user.refresh();

    let feed = NotificationFeed(use_get::<Vec<Notification>>(endpoints::NOTIFICATIONS));
    provide_context(feed);

    Effect::new(move |_| {
        let count = feed.0.state.with(|s| s.value.as_deref().map(unread_count));
        if let Some(count) = count {
            set_unread_count(&store, count);
        }
    });

    let poll = ctx.config().notification_poll;
    match set_interval_with_handle(move || feed.refetch(), poll) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(e) => log::warn!("[APP] notification polling unavailable: {:?}", e),
    }

    let (collapsed, set_collapsed) = signal(false);

    let page = move || match route.get() {
        Route::Tasks => view! { <TasksPage /> }.into_any(),
        Route::TaskDetail(id) => view! { <TaskDetailPage id=id /> }.into_any(),
        Route::NewTask => view! { <NewTaskPage /> }.into_any(),
        Route::Projects => view! { <ProjectsPage /> }.into_any(),
        Route::ProjectDetail(id) => view! { <ProjectDetailPage id=id /> }.into_any(),
        Route::Notes => view! { <NotesPage /> }.into_any(),
        Route::Notifications => view! { <NotificationsPage /> }.into_any(),
        Route::Important => view! { <ImportantPage /> }.into_any(),
        Route::Team => view! { <TeamPage /> }.into_any(),
        Route::Calendar => view! { <CalendarPage /> }.into_any(),
        Route::Settings => view! { <SettingsPage /> }.into_any(),
        _ => view! { <HomePage /> }.into_any(),
    };

    view! {
        <Show
            when=move || !(user.loading.get() && user.current_user.with(|u| u.is_none()))
            fallback=|| view! { <LoadingScreen fullscreen=true /> }
        >
            <div class="app-layout">
                <Sidebar collapsed=collapsed />
                <div class="main-column">
                    <Navbar on_toggle_sidebar=move |_: ()| set_collapsed.update(|c| *c = !*c) />
                    <main class="main-content">{page}</main>
                </div>
            </div>
        </Show>
    }
}
