use crate::forecast::error::ForecastError;
use crate::geocoding::error::GeocodeError;
use crate::storage::error::StorageError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaderError {
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to create data directory '{0}'")]
    DataDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to determine data directory")]
    DataDirResolution(#[source] std::io::Error),

    #[error("No location selected and no device position available")]
    NoLocation,
}
