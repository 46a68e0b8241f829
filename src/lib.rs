use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, get_logger};

pub mod app;
pub mod application;
pub mod domain;
pub mod global_state;
pub mod infrastructure;
pub mod macros;
pub mod presentation;
pub mod time_utils;

/// Install the panic hook, logger and clock.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let console_logger = if cfg!(debug_assertions) {
        infrastructure::services::ConsoleLogger::new_development()
    } else {
        infrastructure::services::ConsoleLogger::new_production()
    };
    domain::logging::init_logger(Box::new(app::DashboardLogger::new(console_logger)));
    domain::logging::init_time_provider(Box::new(infrastructure::services::BrowserTimeProvider::new()));

    get_logger().info(
        LogComponent::Presentation("Initialize"),
        "🚀 Stock chart dashboard initialized",
    );
}

/// Mount the Leptos dashboard onto `<body>`.
#[wasm_bindgen(js_name = mountDashboard)]
pub fn mount_dashboard() {
    leptos::mount_to_body(app::App);
}
