//! TaskFlow Client Core
//!
//! Everything the UI needs that is not a component:
//! - models: REST resources and their fixed lookup tables
//! - transport / client: authenticated HTTP with normalized errors
//! - query: the fetch lifecycle behind `use_api`
//! - session / auth: token storage and the login flows
//! - validation, filters, format, dashboard, calendar, permissions: view-model logic
//!
//! Nothing here depends on Leptos, so the whole crate is tested natively.

pub mod auth;
pub mod browser;
pub mod calendar;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod endpoints;
pub mod error;
pub mod filters;
pub mod format;
pub mod models;
pub mod permissions;
pub mod query;
pub mod session;
pub mod transport;
pub mod validation;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, AuthError, SessionError, ValidationError};
pub use query::{Query, QueryState, QueryStatus, RequestSpec};
pub use session::{KeyValueStore, MemoryStore, Persistence, Session, StoredUser};
pub use transport::{HttpRequest, HttpResponse, Method, MultipartForm, RequestBody, Transport, TransportError};
