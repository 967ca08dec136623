mod config;
pub mod database;

pub use config::{Config, SchedulerSettings, TimerConfig};
pub use database::Database;

use std::path::PathBuf;

/// Returns `~/.config/vidya[-dev]/` based on VIDYA_ENV.
///
/// Set VIDYA_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("VIDYA_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("vidya-dev")
    } else {
        base_dir.join("vidya")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
