//! The last selected location and the GPS flag, kept as JSON.

use crate::storage::error::StorageError;
use crate::types::location::Location;
use crate::utils::write_atomic;
use log::debug;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

fn default_use_gps() -> bool {
    true
}

/// User preferences that outlive a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// The location picked most recently, from search or a favorite.
    #[serde(default)]
    pub location: Option<Location>,
    /// Whether the device position should override [`Preferences::location`].
    #[serde(default = "default_use_gps")]
    pub use_gps: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            location: None,
            use_gps: default_use_gps(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PreferencesStore {
    path: PathBuf,
    preferences: Preferences,
}

impl PreferencesStore {
    /// Loads `preferences.json` from `folder`; a missing file gives the defaults.
    pub async fn open(folder: &Path) -> Result<Self, StorageError> {
        let path = folder.join(PREFERENCES_FILE_NAME);
        let preferences = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StorageError::Json(path.clone(), e))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No preferences at {}, using defaults", path.display());
                Preferences::default()
            }
            Err(e) => return Err(StorageError::Read(path, e)),
        };
        Ok(Self { path, preferences })
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn location(&self) -> Option<&Location> {
        self.preferences.location.as_ref()
    }

    pub fn use_gps(&self) -> bool {
        self.preferences.use_gps
    }

    /// Remembers `location` as the selected one together with the GPS flag.
    pub async fn save_location(
        &mut self,
        location: Location,
        use_gps: bool,
    ) -> Result<(), StorageError> {
        self.preferences.location = Some(location);
        self.preferences.use_gps = use_gps;
        self.persist().await
    }

    pub async fn set_use_gps(&mut self, use_gps: bool) -> Result<(), StorageError> {
        self.preferences.use_gps = use_gps;
        self.persist().await
    }

    async fn persist(&self) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(&self.preferences)
            .map_err(|e| StorageError::Json(self.path.clone(), e))?;
        write_atomic(&self.path, bytes)
            .await
            .map_err(|e| StorageError::Write(self.path.clone(), e))
    }
}
