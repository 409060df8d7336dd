//! View preferences (layout and theme), persisted under `viewMode` and `theme`.
//!
//! These survive logout; nothing in the session flows touches them.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::database::kv_store::{DurableStore, THEME_KEY, VIEW_MODE_KEY};
use crate::types::errors::StorageError;
use crate::types::preferences::{Theme, ViewMode, ViewPreferences};

/// Trait defining view preference persistence.
pub trait PreferencesStoreTrait {
    fn load(&self) -> Result<ViewPreferences, StorageError>;
    fn set_view_mode(&self, mode: ViewMode) -> Result<(), StorageError>;
    fn set_theme(&self, theme: Theme) -> Result<(), StorageError>;
}

pub struct PreferencesStore {
    store: Arc<dyn DurableStore>,
}

impl PreferencesStore {
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        Self { store }
    }
}

impl PreferencesStoreTrait for PreferencesStore {
    /// Reads both keys; missing or unknown values fall back to grid / light.
    fn load(&self) -> Result<ViewPreferences, StorageError> {
        let view_mode = match self.store.get(VIEW_MODE_KEY)? {
            Some(raw) => ViewMode::parse(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "unknown stored view mode");
                ViewMode::default()
            }),
            None => ViewMode::default(),
        };
        let theme = match self.store.get(THEME_KEY)? {
            Some(raw) => Theme::parse(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "unknown stored theme");
                Theme::default()
            }),
            None => Theme::default(),
        };
        Ok(ViewPreferences { view_mode, theme })
    }

    fn set_view_mode(&self, mode: ViewMode) -> Result<(), StorageError> {
        debug!(mode = mode.as_str(), "view mode saved");
        self.store.set(VIEW_MODE_KEY, mode.as_str())
    }

    fn set_theme(&self, theme: Theme) -> Result<(), StorageError> {
        debug!(theme = theme.as_str(), "theme saved");
        self.store.set(THEME_KEY, theme.as_str())
    }
}
