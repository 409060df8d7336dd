// Pinmark platform abstraction
// Picks the per-OS configuration and data directories at compile time.

use std::env;
use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Overrides the data directory when set.
pub const DATA_DIR_ENV: &str = "PINMARK_DATA_DIR";

/// Returns the platform-specific configuration directory for Pinmark.
///
/// - **Linux**: `~/.config/pinmark` (or `$XDG_CONFIG_HOME/pinmark`)
/// - **macOS**: `~/Library/Application Support/Pinmark`
/// - **Windows**: `%APPDATA%/Pinmark`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the directory holding the storage file.
///
/// `$PINMARK_DATA_DIR` wins; otherwise the platform data directory
/// (`~/.local/share/pinmark` on Linux).
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}
