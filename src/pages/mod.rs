//! Pages
//!
//! One component per route. Public pages render without a session,
//! everything else inside the private layout.

mod calendar;
mod forgot_password;
mod home;
mod important;
mod login;
mod new_task;
mod notes;
mod notifications;
mod project_detail;
mod projects;
mod settings;
mod signup;
mod task_detail;
mod tasks;
mod team;

pub use calendar::CalendarPage;
pub use forgot_password::ForgotPasswordPage;
pub use home::HomePage;
pub use important::ImportantPage;
pub use login::LoginPage;
pub use new_task::NewTaskPage;
pub use notes::NotesPage;
pub use notifications::NotificationsPage;
pub use project_detail::ProjectDetailPage;
pub use projects::ProjectsPage;
pub use settings::SettingsPage;
pub use signup::SignUpPage;
pub use task_detail::TaskDetailPage;
pub use tasks::TasksPage;
pub use team::TeamPage;
