//! # Settings Repository
//!
//! The store settings document. A missing file reads as defaults, so the
//! store works out of the box and settings only hit disk once edited.

use std::path::{Path, PathBuf};

use tracing::debug;

use medipos_core::types::StoreSettings;

use crate::collection::{load_document, save_document};
use crate::error::StoreResult;

/// Repository for the settings document.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    dir: PathBuf,
}

impl SettingsRepository {
    /// Creates a repository over the store directory.
    pub fn new(dir: &Path) -> Self {
        SettingsRepository {
            dir: dir.to_path_buf(),
        }
    }

    /// Loads settings, falling back to defaults when none are saved.
    pub fn load(&self) -> StoreResult<StoreSettings> {
        load_document(&self.dir, "settings")
    }

    /// Saves the settings document.
    pub fn save(&self, settings: &StoreSettings) -> StoreResult<()> {
        debug!(store_name = %settings.store_name, "Saving settings");
        save_document(&self.dir, "settings", settings)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
