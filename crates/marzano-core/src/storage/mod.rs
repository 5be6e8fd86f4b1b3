mod config;
mod store;

pub use config::{Config, NotificationsConfig};
pub use store::{Store, StoredState};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/marzano/`, creating it if needed.
///
/// Set MARZANO_DATA_DIR to relocate all stored state (the CLI tests use
/// this to keep user state untouched).
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("MARZANO_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("marzano"),
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
