//! TaskFlow Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod hooks;
mod logging;
mod pages;
mod router;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::from_build_env();
    logging::init(config.log_level);
    log::info!("[APP] TaskFlow starting, API at {}", config.client.api_base_url);
    mount_to_body(move || view! { <App config=config /> });
}
