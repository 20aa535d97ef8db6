//! Router
//!
//! Path <-> route mapping, session gating and History API navigation.

use leptos::ev;
use leptos::prelude::*;

/// Every page of the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Tasks,
    TaskDetail(String),
    NewTask,
    Projects,
    ProjectDetail(String),
    Notes,
    Notifications,
    Important,
    Team,
    Calendar,
    Settings,
    Login,
    SignUp,
    ForgotPassword,
}

impl Route {
    /// Unknown paths resolve to the dashboard
    pub fn parse(path: &str) -> Self {
        let path = path.split(&['?', '#'][..]).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["tasks"] => Route::Tasks,
            ["tasks", id] => Route::TaskDetail(id.to_string()),
            ["new-task"] => Route::NewTask,
            ["projects"] => Route::Projects,
            ["projects", id] => Route::ProjectDetail(id.to_string()),
            ["notes"] => Route::Notes,
            ["notifications"] => Route::Notifications,
            ["important"] => Route::Important,
            ["team"] => Route::Team,
            ["calendar"] => Route::Calendar,
            ["settings"] => Route::Settings,
            ["login"] => Route::Login,
            ["signup"] => Route::SignUp,
            ["forgot-password"] => Route::ForgotPassword,
            _ => Route::Home,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Tasks => "/tasks".to_string(),
            Route::TaskDetail(id) => format!("/tasks/{}", id),
            Route::NewTask => "/new-task".to_string(),
            Route::Projects => "/projects".to_string(),
            Route::ProjectDetail(id) => format!("/projects/{}", id),
            Route::Notes => "/notes".to_string(),
            Route::Notifications => "/notifications".to_string(),
            Route::Important => "/important".to_string(),
            Route::Team => "/team".to_string(),
            Route::Calendar => "/calendar".to_string(),
            Route::Settings => "/settings".to_string(),
            Route::Login => "/login".to_string(),
            Route::SignUp => "/signup".to_string(),
            Route::ForgotPassword => "/forgot-password".to_string(),
        }
    }

    /// Rendered by the public layout
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::SignUp | Route::ForgotPassword)
    }

    /// Where the user actually lands given the session state
    pub fn gate(self, authenticated: bool) -> Self {
        match (self.is_public(), authenticated) {
            (false, false) => Route::Login,
            (true, true) => Route::Home,
            (_, _) => self,
        }
    }

    /// Sidebar entry this route highlights
    pub fn section(&self) -> Route {
        match self {
            Route::TaskDetail(_) | Route::NewTask => Route::Tasks,
            Route::ProjectDetail(_) => Route::Projects,
            other => other.clone(),
        }
    }
}

// ========================
// Navigation
// ========================

/// Current route, provided at the root
#[derive(Clone, Copy)]
pub struct RouterContext {
    /// Current route - read
    pub route: ReadSignal<Route>,
    set_route: WriteSignal<Route>,
    /// One-shot message for the next page (e.g. "Account created")
    pub flash: RwSignal<Option<String>>,
}

fn location_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history(path: &str, replace: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let result = if replace {
        history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path))
    } else {
        history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path))
    };
    if let Err(e) = result {
        log::warn!("[ROUTER] history update failed: {:?}", e);
    }
}

impl RouterContext {
    /// Read the initial route and follow back/forward navigation
    pub fn install() -> Self {
        let (route, set_route) = signal(Route::parse(&location_path()));
        let handle = window_event_listener(ev::popstate, move |_| {
            set_route.set(Route::parse(&location_path()));
        });
        on_cleanup(move || handle.remove());
        Self {
            route,
            set_route,
            flash: RwSignal::new(None),
        }
    }

    pub fn navigate(&self, to: Route) {
        self.go(to, false);
    }

    /// Navigate without a history entry (redirects)
    pub fn replace(&self, to: Route) {
        self.go(to, true);
    }

    /// Navigate and leave a message for the target page
    pub fn navigate_with_flash(&self, to: Route, message: impl Into<String>) {
        self.flash.set(Some(message.into()));
        self.replace(to);
    }

    /// Take the pending message, if any
    pub fn take_flash(&self) -> Option<String> {
        let message = self.flash.get_untracked();
        if message.is_some() {
            self.flash.set(None);
        }
        message
    }

    fn go(&self, to: Route, replace: bool) {
        if self.route.get_untracked() == to {
            return;
        }
        log::debug!("[ROUTER] -> {}", to.path());
        push_history(&to.path(), replace);
        self.set_route.set(to);
    }
}

pub fn use_router() -> RouterContext {
    use_context::<RouterContext>().expect("RouterContext should be provided")
}
