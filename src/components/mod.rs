//! UI Components
//!
//! Reusable Leptos components shared by the pages.

mod asset_section;
mod avatar;
mod delete_confirm_button;
mod filter_bar;
mod google_button;
mod loading_screen;
mod modal;
mod navbar;
mod sidebar;
mod task_card;
mod toast;
mod user_picker;

pub use asset_section::{read_file, AssetSection};
pub use avatar::Avatar;
pub use delete_confirm_button::DeleteConfirmButton;
pub use filter_bar::FilterBar;
pub use google_button::GoogleButton;
pub use loading_screen::{ErrorBanner, LoadingScreen};
pub use modal::Modal;
pub use navbar::Navbar;
pub use sidebar::Sidebar;
pub use task_card::TaskCard;
pub use toast::ToastHost;
pub use user_picker::UserPicker;
