// Pinmark platform paths for Linux
// Config: ~/.config/pinmark
// Data:   ~/.local/share/pinmark

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Uses `$XDG_CONFIG_HOME/pinmark` if set, otherwise `~/.config/pinmark`.
pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("pinmark"),
        _ => home_dir().join(".config").join("pinmark"),
    }
}

/// Uses `$XDG_DATA_HOME/pinmark` if set, otherwise `~/.local/share/pinmark`.
pub fn get_data_dir() -> PathBuf {
    match env::var("XDG_DATA_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("pinmark"),
        _ => home_dir().join(".local").join("share").join("pinmark"),
    }
}
