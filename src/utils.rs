use log::info;
use reqwest::Client;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;

const DATA_DIR_NAME: &str = "vaderappen";

/// Sent with every upstream request unless the caller configures another one.
pub const DEFAULT_USER_AGENT: &str = concat!("vaderappen/", env!("CARGO_PKG_VERSION"));

pub fn get_data_dir() -> io::Result<PathBuf> {
    dirs::data_dir()
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine system data directory",
            )
        })
        .map(|p| p.join(DATA_DIR_NAME))
}

pub async fn ensure_data_dir_exists(path: &Path) -> io::Result<()> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("Data path exists but is not a directory: {}", path.display()),
                ));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating data directory: {}", path.display());
            tokio::fs::create_dir_all(path).await
        }
        Err(e) => Err(e),
    }
}

pub(crate) fn build_http_client(user_agent: &str, timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
}

/// Replaces `path` with `bytes` via a temp file in the same folder, so readers
/// never observe a half written file.
pub(crate) async fn write_atomic(path: &Path, bytes: Vec<u8>) -> io::Result<()> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let folder = path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp_file = NamedTempFile::new_in(folder)?;
        temp_file.write_all(&bytes)?;
        temp_file.flush()?;
        temp_file.persist(&path).map_err(|e| e.error)?;
        Ok::<(), io::Error>(())
    })
    .await
    .map_err(io::Error::other)?
}
