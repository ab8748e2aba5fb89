//! Favorite locations persisted as a bincode file in the data folder.

use crate::storage::error::StorageError;
use crate::types::location::Location;
use crate::utils::write_atomic;
use bincode::config::{Configuration, Fixint, LittleEndian};
use log::{debug, info};
use std::path::{Path, PathBuf};

pub const FAVORITES_FILE_NAME: &str = "favorites.bin";
const BINCODE_CONFIG: Configuration<LittleEndian, Fixint> =
    bincode::config::standard().with_fixed_int_encoding();

/// Saved locations keyed by [`Location::full_name`].
///
/// The whole list lives in memory; every mutation rewrites the file atomically.
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    path: PathBuf,
    locations: Vec<Location>,
}

impl FavoritesStore {
    /// Loads `favorites.bin` from `folder`, or starts empty if there is none yet.
    ///
    /// # Errors
    ///
    /// [`StorageError::Read`] or [`StorageError::Decode`] if an existing file
    /// cannot be read back.
    pub async fn open(folder: &Path) -> Result<Self, StorageError> {
        let path = folder.join(FAVORITES_FILE_NAME);
        let locations = if tokio::fs::try_exists(&path)
            .await
            .map_err(|e| StorageError::Read(path.clone(), e))?
        {
            let path_clone = path.clone();
            tokio::task::spawn_blocking(move || Self::read_locations(&path_clone)).await??
        } else {
            debug!("No favorites file at {}, starting empty", path.display());
            Vec::new()
        };
        info!("Loaded {} saved locations from {}", locations.len(), path.display());
        Ok(Self { path, locations })
    }

    fn read_locations(path: &Path) -> Result<Vec<Location>, StorageError> {
        let bytes = std::fs::read(path).map_err(|e| StorageError::Read(path.to_path_buf(), e))?;
        let (locations, _) =
            bincode::serde::decode_from_slice::<Vec<Location>, _>(&bytes, BINCODE_CONFIG)
                .map_err(|e| StorageError::Decode(path.to_path_buf(), Box::new(e)))?;
        Ok(locations)
    }

    async fn persist(&self) -> Result<(), StorageError> {
        let locations = self.locations.clone();
        let bytes = tokio::task::spawn_blocking(move || {
            bincode::serde::encode_to_vec(&locations, BINCODE_CONFIG)
                .map_err(|e| StorageError::Encode(Box::new(e)))
        })
        .await??;
        write_atomic(&self.path, bytes)
            .await
            .map_err(|e| StorageError::Write(self.path.clone(), e))?;
        debug!("Wrote {} locations to {}", self.locations.len(), self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored location, in insertion order.
    pub fn all(&self) -> &[Location] {
        &self.locations
    }

    /// Only the locations flagged as favorites.
    pub fn favorites(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter().filter(|location| location.is_faved)
    }

    pub fn get(&self, full_name: &str) -> Option<&Location> {
        self.locations
            .iter()
            .find(|location| location.full_name == full_name)
    }

    pub fn is_favorite(&self, full_name: &str) -> bool {
        self.get(full_name).is_some_and(|location| location.is_faved)
    }

    /// Replaces the entry with the same full name, or appends a new one.
    pub async fn upsert(&mut self, location: Location) -> Result<(), StorageError> {
        match self
            .locations
            .iter_mut()
            .find(|existing| existing.same_place(&location))
        {
            Some(existing) => *existing = location,
            None => self.locations.push(location),
        }
        self.persist().await
    }

    /// Deletes the entry named `full_name`. Returns whether anything was removed.
    pub async fn remove(&mut self, full_name: &str) -> Result<bool, StorageError> {
        let before = self.locations.len();
        self.locations.retain(|location| location.full_name != full_name);
        if self.locations.len() == before {
            return Ok(false);
        }
        self.persist().await?;
        Ok(true)
    }

    /// Favoriting stores the location flagged as a favorite; un-favoriting
    /// deletes it.
    pub async fn set_favorite(
        &mut self,
        location: &Location,
        faved: bool,
    ) -> Result<(), StorageError> {
        if faved {
            self.upsert(location.clone().with_faved(true)).await
        } else {
            self.remove(&location.full_name).await.map(|_| ())
        }
    }
}
