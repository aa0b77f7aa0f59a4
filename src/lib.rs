pub mod cache;
pub mod commands;
pub mod config;
pub mod error;
pub mod i18n;
pub mod image_input;
pub mod orchestrator;
pub mod state;
pub mod store;
pub mod ui;
pub mod weaviate;

#[cfg(test)]
mod testing;

use std::path::PathBuf;

use log::LevelFilter;

/// Warn for dependencies, debug for our own crates. `RUST_LOG` still wins.
pub fn init_logging() {
    let _ = env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module("clip_arena_lib", LevelFilter::Debug)
        .filter_module("clip_arena", LevelFilter::Debug)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();
}

pub fn get_app_data_dir() -> PathBuf {
    let base = std::env::var("APPDATA")
        .or_else(|_| std::env::var("XDG_DATA_HOME"))
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            format!("{}/.local/share", home)
        });
    PathBuf::from(base).join("com.clip-arena.app")
}
