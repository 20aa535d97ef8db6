//! Application Context
//!
//! Shared handles provided via Leptos Context API: the API client for the
//! whole app, and the signed-in user for the private layout.

use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use taskflow_client::auth::AuthService;
use taskflow_client::models::Notification;
use taskflow_client::{ApiClient, StoredUser};

use crate::config::AppConfig;
use crate::hooks::UseApi;

/// App-wide handles provided at the root
#[derive(Clone, Copy)]
pub struct AppContext {
    client: StoredValue<ApiClient>,
    config: StoredValue<AppConfig>,
}

impl AppContext {
    pub fn new(client: ApiClient, config: AppConfig) -> Self {
        Self {
            client: StoredValue::new(client),
            config: StoredValue::new(config),
        }
    }

    pub fn client(&self) -> ApiClient {
        self.client.get_value()
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.client())
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// Route guard input; reads storage, not signals
    pub fn is_authenticated(&self) -> bool {
        self.client.with_value(|c| c.session().is_authenticated())
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}

/// Current user, provided at the private layout root
#[derive(Clone, Copy)]
pub struct UserContext {
    /// Signed-in user - read
    pub current_user: ReadSignal<Option<StoredUser>>,
    set_current_user: WriteSignal<Option<StoredUser>>,
    /// True until the first refresh settles - read
    pub loading: ReadSignal<bool>,
    set_loading: WriteSignal<bool>,
    /// Last refresh failure - read
    pub error: ReadSignal<Option<String>>,
    set_error: WriteSignal<Option<String>>,
    auth: StoredValue<AuthService>,
}

impl UserContext {
    pub fn new(auth: AuthService, cached: Option<StoredUser>) -> Self {
        let (current_user, set_current_user) = signal(cached);
        let (loading, set_loading) = signal(true);
        let (error, set_error) = signal(None::<String>);
        Self {
            current_user,
            set_current_user,
            loading,
            set_loading,
            error,
            set_error,
            auth: StoredValue::new(auth),
        }
    }

    /// Re-read `/user/me/`; without a token only `loading` clears
    pub fn refresh(&self) {
        let ctx = *self;
        let auth = self.auth.get_value();
        spawn_local(async move {
            ctx.set_error.set(None);
            if let Some(refreshed) = auth.refresh_user().await {
                if let Some(user) = refreshed.user {
                    ctx.set_current_user.set(Some(user));
                }
                ctx.set_error.set(refreshed.error);
            }
            ctx.set_loading.set(false);
        });
    }

    /// Drop the user from context and from both storage areas
    pub fn clear(&self) {
        self.set_current_user.set(None);
        self.auth.with_value(|auth| auth.clear_user());
    }

    /// Tracked id of the signed-in user
    pub fn user_id(&self) -> Option<Uuid> {
        self.current_user.with(|u| u.as_ref().map(|u| u.id))
    }

    /// First name for greetings, "User" when unknown
    pub fn first_name(&self) -> String {
        self.current_user.with(|u| {
            u.as_ref()
                .map(|u| u.first_name.clone())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "User".to_string())
        })
    }

    /// Replace the user after a profile edit
    pub fn set_user(&self, user: StoredUser) {
        self.set_current_user.set(Some(user));
    }
}

pub fn use_user() -> UserContext {
    use_context::<UserContext>().expect("UserContext should be provided")
}

/// Notification list shared by the navbar bell and the inbox page.
///
/// Owned by the private layout, which polls it on an interval.
#[derive(Clone, Copy)]
pub struct NotificationFeed(pub UseApi<Vec<Notification>>);

impl NotificationFeed {
    pub fn items(&self) -> Vec<Notification> {
        self.0.data().unwrap_or_default()
    }

    pub fn refetch(&self) {
        self.0.refetch();
    }
}

pub fn use_notifications() -> NotificationFeed {
    use_context::<NotificationFeed>().expect("NotificationFeed should be provided")
}
