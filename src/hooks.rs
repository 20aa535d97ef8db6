//! Data-Fetch Hook
//!
//! `use_api` binds a `Query` to the component's reactive scope: the request
//! spec closure is tracked, so any signal it reads is a dependency. A change
//! re-issues the request and aborts the previous one; unmount aborts and
//! discards whatever is still in flight.
//!
//! `spawn_mutation` is the fire-and-forget counterpart for writes.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use serde_json::Value;

use taskflow_client::query::PendingFetch;
use taskflow_client::{ApiClient, ApiError, Method, Query, QueryState, RequestSpec};

use crate::context::use_app_context;
use crate::store::{toast_error, toast_success, AppStore};

/// `{data, loading, error, refetch, make_request}` of one hook instance
pub struct UseApi<T: Send + Sync + 'static> {
    pub state: ReadSignal<QueryState<T>>,
    set_state: WriteSignal<QueryState<T>>,
    query: StoredValue<Query<T>>,
}

impl<T: Send + Sync + 'static> Clone for UseApi<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for UseApi<T> {}

impl<T> UseApi<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Last loaded value (kept while reloading)
    pub fn data(&self) -> Option<T> {
        self.state.with(|s| s.value.clone())
    }

    pub fn loading(&self) -> bool {
        self.state.with(|s| s.is_loading())
    }

    pub fn error(&self) -> Option<ApiError> {
        self.state.with(|s| s.error.clone())
    }

    /// Re-issue with the last configured parameters
    pub fn refetch(&self) {
        let query = self.query.get_value();
        let pending = query.refetch();
        drive(query, pending, self.set_state);
    }

    /// Imperative side channel; never touches this hook's state
    pub async fn make_request(
        &self,
        path: &str,
        method: Method,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let query = self.query.get_value();
        query.make_request(path, method, body).await
    }
}

fn drive<T>(
    query: Query<T>,
    pending: Option<PendingFetch<T>>,
    set_state: WriteSignal<QueryState<T>>,
) where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    set_state.set(query.state());
    if let Some(pending) = pending {
        spawn_local(async move {
            if pending.run().await {
                set_state.try_set(query.state());
            }
        });
    }
}

/// Query configured from the first spec, its request already begun
fn start_query<T>(client: ApiClient, spec: RequestSpec) -> (Query<T>, Option<PendingFetch<T>>)
where
    T: DeserializeOwned + Clone,
{
    let query = Query::new(client, spec);
    let pending = query.start();
    (query, pending)
}

/// Authenticated request bound to the current scope.
///
/// `spec` is re-run whenever a signal it reads changes.
pub fn use_api<T, F>(spec: F) -> UseApi<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
    F: Fn() -> RequestSpec + Send + Sync + 'static,
{
    let client = use_app_context().client();
    let (initial, pending) = start_query::<T>(client, untrack(|| spec()));
    let (state, set_state) = signal(initial.state());
    let query = StoredValue::new(initial.clone());
    drive(initial, pending, set_state);

    // First run only subscribes; the request above already covers it
    Effect::new(move |prev: Option<()>| {
        let next = spec();
        let query = query.get_value();
        if prev.is_none() && next == query.spec() {
            return;
        }
        let pending = query.reconfigure(next);
        drive(query, pending, set_state);
    });

    on_cleanup(move || {
        if let Some(query) = query.try_get_value() {
            query.dispose();
        }
    });

    UseApi {
        state,
        set_state,
        query,
    }
}

/// GET of a fixed path
pub fn use_get<T>(path: &'static str) -> UseApi<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    use_api(move || RequestSpec::get(path))
}

/// Run a mutation off the event handler, toast the outcome, then `on_ok`.
///
/// Mutations are not cancelled on unmount and carry no stale-result guard.
pub fn spawn_mutation<T, Fut, F>(
    store: AppStore,
    success: Option<&'static str>,
    failure: &'static str,
    fut: Fut,
    on_ok: F,
) where
    T: 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
    F: FnOnce(T) + 'static,
{
    spawn_local(async move {
        match fut.await {
            Ok(value) => {
                if let Some(message) = success {
                    toast_success(&store, message);
                }
                on_ok(value);
            }
            Err(e) => {
                log::error!("[API] {}: {}", failure, e);
                toast_error(&store, format!("{}: {}", failure, e));
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use taskflow_client::testing::{authed_client, MockTransport};
    use taskflow_client::QueryStatus;

    #[tokio::test]
    async fn test_present_path_is_loading_before_first_render() {
        let transport = MockTransport::new();
        transport.respond(200, json!([{"id": 1}]));
        let client = authed_client(&transport, "t");

        let (query, pending) = start_query::<Vec<Value>>(client, RequestSpec::get("/api/notes/"));
        let state = query.state();
        assert!(state.is_loading());
        assert_eq!(state.value, None);

        let pending = pending.expect("request begun for a present path");
        assert!(pending.run().await);
        assert_eq!(query.state().status, QueryStatus::Success);
        assert_eq!(query.state().value, Some(vec![json!({"id": 1})]));
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn test_absent_path_starts_idle() {
        let transport = MockTransport::new();
        let client = authed_client(&transport, "t");

        let (query, pending) = start_query::<Vec<Value>>(client, RequestSpec::disabled());
        assert!(pending.is_none());
        assert_eq!(query.state(), QueryState::default());
        assert_eq!(transport.request_count(), 0);
    }
}
