//! REST Command Wrappers
//!
//! Typed bindings to backend endpoints, organized by resource. Each command
//! takes the shared client and returns `Result<_, ApiError>`; callers use
//! them module-qualified (`task::create_task`, `note::toggle_pin`).

pub mod asset;
pub mod note;
pub mod notification;
pub mod project;
pub mod search;
pub mod task;
pub mod user;
