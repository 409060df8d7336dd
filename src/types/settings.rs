use serde::{Deserialize, Serialize};

/// Top-level client settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ClientSettings {
    pub api: ApiSettings,
    pub ui: UiSettings,
    pub timing: TimingSettings,
    pub storage: StorageSettings,
}

/// Where the bookmark API lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiSettings {
    /// Base URL including the `/api` prefix, without a trailing slash.
    pub base_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
        }
    }
}

/// Rendering-related settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiSettings {
    /// Viewports at or below this width get no drag reordering.
    pub mobile_breakpoint_px: u32,
    /// Assumed width until the host reports a real one.
    pub initial_viewport_width: u32,
    pub qr_size_px: u32,
    pub qr_dark_color: String,
    pub qr_light_color: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            mobile_breakpoint_px: 768,
            initial_viewport_width: 1280,
            qr_size_px: 256,
            qr_dark_color: "#6366f1".to_string(),
            qr_light_color: "#ffffff".to_string(),
        }
    }
}

/// Fixed delays used by the account flows, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingSettings {
    pub register_switch_delay_ms: u64,
    pub password_change_logout_delay_ms: u64,
    pub account_delete_delay_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            register_switch_delay_ms: 1500,
            password_change_logout_delay_ms: 2000,
            account_delete_delay_ms: 1500,
        }
    }
}

/// Durable storage location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSettings {
    /// File name inside the data directory, or an absolute path.
    pub database_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_file: "pinmark.db".to_string(),
        }
    }
}
