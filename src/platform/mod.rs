//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logging backend
//! - Storage backend selection
//! - The JS-facing game handle (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Install the logger for this platform. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Install the logger for this platform. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();
}
