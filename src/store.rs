//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Holds the only
//! app-wide mutable state besides the user context: the toast queue and the
//! unread notification count.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

/// Toasts disappear on their own after this long
pub const TOAST_TIMEOUT_MS: u32 = 4_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Info => "toast toast-info",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Visible toasts, oldest first
    pub toasts: Vec<Toast>,
    /// Last issued toast id
    pub last_toast_id: u32,
    /// Unread notifications, shown on the bell and in the sidebar
    pub unread_count: usize,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Append a toast and return its id
fn queue_toast(store: &AppStore, kind: ToastKind, message: impl Into<String>) -> u32 {
    let id = {
        let field = store.last_toast_id();
        let mut last = field.write();
        *last += 1;
        *last
    };
    store.toasts().write().push(Toast {
        id,
        kind,
        message: message.into(),
    });
    id
}

/// Queue a toast and schedule its dismissal
pub fn push_toast(store: &AppStore, kind: ToastKind, message: impl Into<String>) {
    let id = queue_toast(store, kind, message);
    let store = *store;
    spawn_local(async move {
        TimeoutFuture::new(TOAST_TIMEOUT_MS).await;
        dismiss_toast(&store, id);
    });
}

pub fn dismiss_toast(store: &AppStore, id: u32) {
    store.toasts().write().retain(|t| t.id != id);
}

pub fn toast_success(store: &AppStore, message: impl Into<String>) {
    push_toast(store, ToastKind::Success, message);
}

pub fn toast_error(store: &AppStore, message: impl Into<String>) {
    push_toast(store, ToastKind::Error, message);
}

pub fn toast_info(store: &AppStore, message: impl Into<String>) {
    push_toast(store, ToastKind::Info, message);
}

pub fn set_unread_count(store: &AppStore, count: usize) {
    if store.unread_count().get_untracked() != count {
        store.unread_count().set(count);
    }
}
