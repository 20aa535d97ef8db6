//! Query Lifecycle
//!
//! The state machine behind `use_api`: one request per configuration, the
//! previous in-flight request aborted on reconfiguration, late results
//! discarded by generation.

use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{AbortHandle, AbortRegistration, Abortable};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::{Method, RequestBody};

// ========================
// State
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// `{status, value, error}`; `value` keeps the last success while reloading
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub status: QueryStatus,
    pub value: Option<T>,
    pub error: Option<ApiError>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            status: QueryStatus::Idle,
            value: None,
            error: None,
        }
    }
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    pub fn data(&self) -> Option<&T> {
        self.value.as_ref()
    }

    fn reloading(self) -> Self {
        Self {
            status: QueryStatus::Loading,
            value: self.value,
            error: None,
        }
    }
}

/// Path, method and body of the automatic request. No path means no request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub path: Option<String>,
    pub method: Method,
    pub body: Option<Value>,
}

impl RequestSpec {
    pub fn new(path: Option<String>, method: Method, body: Option<Value>) -> Self {
        Self { path, method, body }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Some(path.into()), Method::Get, None)
    }

    pub fn disabled() -> Self {
        Self::new(None, Method::Get, None)
    }
}

// ========================
// Controller
// ========================

/// Issued by `begin`; only the latest ticket may settle
pub struct Ticket {
    pub generation: u64,
    pub spec: RequestSpec,
    registration: AbortRegistration,
}

pub struct QueryController<T> {
    spec: RequestSpec,
    generation: u64,
    in_flight: Option<AbortHandle>,
    state: QueryState<T>,
    disposed: bool,
}

impl<T> QueryController<T> {
    pub fn new(spec: RequestSpec) -> Self {
        Self {
            spec,
            generation: 0,
            in_flight: None,
            state: QueryState::default(),
            disposed: false,
        }
    }

    pub fn spec(&self) -> &RequestSpec {
        &self.spec
    }

    pub fn state(&self) -> &QueryState<T> {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a request for the current spec, aborting the previous one.
    ///
    /// Without a path the state resolves to idle and no ticket is issued.
    pub fn begin(&mut self) -> Option<Ticket> {
        if self.disposed {
            return None;
        }
        self.cancel();
        self.generation += 1;

        if self.spec.path.is_none() {
            self.state = QueryState::default();
            return None;
        }

        let (handle, registration) = AbortHandle::new_pair();
        self.in_flight = Some(handle);
        self.state = std::mem::take(&mut self.state).reloading();
        Some(Ticket {
            generation: self.generation,
            spec: self.spec.clone(),
            registration,
        })
    }

    /// Replace the spec and start over
    pub fn reconfigure(&mut self, spec: RequestSpec) -> Option<Ticket> {
        self.spec = spec;
        self.begin()
    }

    /// Apply a result. Returns false when the result is stale and dropped.
    pub fn settle(&mut self, generation: u64, outcome: Result<T, ApiError>) -> bool {
        if self.disposed || generation != self.generation {
            log::debug!(
                "[QUERY] dropping stale result (gen {} != {})",
                generation,
                self.generation
            );
            return false;
        }
        self.in_flight = None;
        self.state = match outcome {
            Ok(value) => QueryState {
                status: QueryStatus::Success,
                value: Some(value),
                error: None,
            },
            Err(error) => QueryState {
                status: QueryStatus::Error,
                value: self.state.value.take(),
                error: Some(error),
            },
        };
        true
    }

    /// Abort the in-flight request, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }

    /// Unmount: abort and refuse further results
    pub fn dispose(&mut self) {
        self.cancel();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

// ========================
// Query handle
// ========================

/// Shared handle: a client plus one controller
pub struct Query<T> {
    client: ApiClient,
    controller: Arc<Mutex<QueryController<T>>>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            controller: Arc::clone(&self.controller),
        }
    }
}

impl<T: DeserializeOwned + Clone> Query<T> {
    pub fn new(client: ApiClient, spec: RequestSpec) -> Self {
        Self {
            client,
            controller: Arc::new(Mutex::new(QueryController::new(spec))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueryController<T>> {
        self.controller.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Initial request
    pub fn start(&self) -> Option<PendingFetch<T>> {
        let ticket = self.lock().begin()?;
        Some(self.pending(ticket))
    }

    /// Same parameters, new request
    pub fn refetch(&self) -> Option<PendingFetch<T>> {
        self.start()
    }

    /// Dependency change
    pub fn reconfigure(&self, spec: RequestSpec) -> Option<PendingFetch<T>> {
        let ticket = self.lock().reconfigure(spec)?;
        Some(self.pending(ticket))
    }

    pub fn dispose(&self) {
        self.lock().dispose();
    }

    pub fn state(&self) -> QueryState<T> {
        self.lock().state().clone()
    }

    pub fn spec(&self) -> RequestSpec {
        self.lock().spec().clone()
    }

    /// Imperative call; leaves this query's state alone
    pub async fn make_request(&self, path: &str, method: Method, body: Option<Value>) -> Result<Value, ApiError> {
        self.client.make_request(path, method, body).await
    }

    fn pending(&self, ticket: Ticket) -> PendingFetch<T> {
        PendingFetch {
            client: self.client.clone(),
            controller: Arc::clone(&self.controller),
            ticket,
        }
    }
}

/// A started request, not yet awaited
pub struct PendingFetch<T> {
    client: ApiClient,
    controller: Arc<Mutex<QueryController<T>>>,
    ticket: Ticket,
}

impl<T: DeserializeOwned> PendingFetch<T> {
    pub fn generation(&self) -> u64 {
        self.ticket.generation
    }

    /// Drive the request to completion. Returns true when the result was applied.
    pub async fn run(self) -> bool {
        let Ticket {
            generation,
            spec,
            registration,
        } = self.ticket;
        let Some(path) = spec.path else {
            return false;
        };

        let request = self
            .client
            .build_request(&path, spec.method, spec.body.map(RequestBody::Json));
        let fetch = Abortable::new(self.client.fetch_json::<T>(request), registration);

        match fetch.await {
            Ok(outcome) => {
                if let Err(e) = &outcome {
                    log::warn!("[QUERY] {} failed: {}", path, e);
                }
                self.controller
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .settle(generation, outcome)
            }
            Err(_aborted) => {
                log::debug!("[QUERY] {} aborted (gen {})", path, generation);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{authed_client, MockTransport};
    use crate::transport::HttpResponse;
    use serde_json::json;

    #[tokio::test]
    async fn test_present_path_issues_one_request() {
        let transport = MockTransport::new();
        transport.respond(200, json!({"ok": true}));
        let query: Query<Value> = Query::new(
            authed_client(&transport, "tok"),
            RequestSpec::new(Some("/api/tasks/".into()), Method::Post, Some(json!({"a": 1}))),
        );

        let pending = query.start().unwrap();
        assert!(query.state().is_loading());
        assert!(pending.run().await);

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].body, Some(RequestBody::Json(json!({"a": 1}))));
        assert_eq!(sent[0].header_value("Authorization"), Some("Bearer tok"));

        let state = query.state();
        assert_eq!(state.status, QueryStatus::Success);
        assert_eq!(state.value, Some(json!({"ok": true})));
    }

    #[tokio::test]
    async fn test_absent_path_issues_nothing() {
        let transport = MockTransport::new();
        let query: Query<Value> = Query::new(authed_client(&transport, "t"), RequestSpec::disabled());

        assert!(query.start().is_none());
        let state = query.state();
        assert!(!state.is_loading());
        assert!(state.value.is_none());
        assert!(state.error.is_none());
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_reconfigure_drops_late_response() {
        let transport = MockTransport::new();
        let first_response = transport.defer();
        transport.respond(200, json!("second"));
        let query: Query<Value> = Query::new(authed_client(&transport, "t"), RequestSpec::get("/api/tasks/?status=Done"));

        let first = query.start().unwrap();
        let first_run = first.run();
        futures::pin_mut!(first_run);
        // poll once so the first request reaches the transport
        assert!(futures::poll!(first_run.as_mut()).is_pending());

        let second = query.reconfigure(RequestSpec::get("/api/tasks/?status=To%20Do")).unwrap();
        assert!(second.run().await);
        assert_eq!(transport.request_count(), 2);

        let _ = first_response.send(HttpResponse::new(200, Some(json!("first"))));
        assert!(!first_run.await);

        assert_eq!(query.state().value, Some(json!("second")));
        assert_eq!(transport.requests()[1].url, "http://test.local/api/tasks/?status=To%20Do");
    }

    #[test]
    fn test_controller_ignores_stale_generation() {
        let mut controller: QueryController<u32> = QueryController::new(RequestSpec::get("/a"));
        let old = controller.begin().unwrap();
        let new = controller.reconfigure(RequestSpec::get("/b")).unwrap();

        assert!(!controller.settle(old.generation, Ok(1)));
        assert!(controller.state().is_loading());
        assert!(controller.settle(new.generation, Ok(2)));
        assert_eq!(controller.state().value, Some(2));
    }

    #[tokio::test]
    async fn test_refetch_reuses_parameters() {
        let transport = MockTransport::new();
        transport.respond(200, json!(1));
        transport.respond(200, json!(2));
        let query: Query<Value> = Query::new(
            authed_client(&transport, "t"),
            RequestSpec::new(Some("/api/notes/".into()), Method::Get, None),
        );

        query.start().unwrap().run().await;
        query.refetch().unwrap().run().await;

        let sent = transport.requests();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].url, sent[1].url);
        assert_eq!(sent[0].method, sent[1].method);
        assert_eq!(query.state().value, Some(json!(2)));
    }

    #[tokio::test]
    async fn test_previous_value_kept_while_reloading() {
        let transport = MockTransport::new();
        transport.respond(200, json!("loaded"));
        let query: Query<Value> = Query::new(authed_client(&transport, "t"), RequestSpec::get("/api/team/"));
        query.start().unwrap().run().await;

        let _pending = query.refetch().unwrap();
        let state = query.state();
        assert!(state.is_loading());
        assert_eq!(state.value, Some(json!("loaded")));
    }

    #[tokio::test]
    async fn test_error_lands_in_state() {
        let transport = MockTransport::new();
        transport.respond(500, json!({"detail": "boom"}));
        let query: Query<Value> = Query::new(authed_client(&transport, "t"), RequestSpec::get("/api/team/"));
        assert!(query.start().unwrap().run().await);

        let state = query.state();
        assert_eq!(state.status, QueryStatus::Error);
        assert_eq!(state.error.map(|e| e.status), Some(Some(500)));
    }

    #[tokio::test]
    async fn test_make_request_leaves_state_alone() {
        let transport = MockTransport::new();
        transport.respond(200, json!("data"));
        transport.respond(404, json!({"detail": "Not found."}));
        let query: Query<Value> = Query::new(authed_client(&transport, "t"), RequestSpec::get("/api/notes/"));
        query.start().unwrap().run().await;
        let before = query.state();

        let err = query
            .make_request("/api/notes/x/", Method::Delete, None)
            .await
            .unwrap_err();
        assert_eq!(err.status, Some(404));
        assert_eq!(err.message, "Request failed with status code 404");
        assert_eq!(err.data, Some(json!({"detail": "Not found."})));
        assert_eq!(query.state(), before);
    }

    #[tokio::test]
    async fn test_disposed_query_discards_result() {
        let transport = MockTransport::new();
        let response = transport.defer();
        let query: Query<Value> = Query::new(authed_client(&transport, "t"), RequestSpec::get("/api/notes/"));

        let run = query.start().unwrap().run();
        futures::pin_mut!(run);
        assert!(futures::poll!(run.as_mut()).is_pending());
        query.dispose();
        let _ = response.send(HttpResponse::new(200, Some(json!("late"))));

        assert!(!run.await);
        assert!(query.start().is_none());
        assert!(query.state().value.is_none());
    }
}
