//! Guest storage in a single JSON file.
//!
//! The file holds a JSON array of `{"email": ..., "tickets": ...}` records in
//! display order. A missing file means an empty list.

use crate::providers::{GuestRepository, RepositoryError};
use crate::types::Guest;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Guest repository backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileGuestRepository {
    path: PathBuf,
}

impl JsonFileGuestRepository {
    /// Create a repository for the file at `path`. Nothing is touched until
    /// the first operation.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling the new contents are written to before being renamed into place.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl GuestRepository for JsonFileGuestRepository {
    fn load(&self) -> impl Future<Output = Result<Vec<Guest>, RepositoryError>> + Send {
        let path = self.path.clone();

        async move {
            match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    let guests: Vec<Guest> = serde_json::from_slice(&bytes)?;
                    tracing::debug!(path = %path.display(), count = guests.len(), "Loaded guests");
                    Ok(guests)
                },
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::debug!(path = %path.display(), "No guest file yet");
                    Ok(Vec::new())
                },
                Err(e) => Err(e.into()),
            }
        }
    }

    fn save(&self, guests: &[Guest]) -> impl Future<Output = Result<(), RepositoryError>> + Send {
        let path = self.path.clone();
        let staging = self.staging_path();
        let encoded = serde_json::to_vec_pretty(guests);

        async move {
            let encoded = encoded?;

            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }

            tokio::fs::write(&staging, &encoded).await?;
            tokio::fs::rename(&staging, &path).await?;

            tracing::debug!(path = %path.display(), bytes = encoded.len(), "Saved guests");
            Ok(())
        }
    }

    fn reset(&self) -> impl Future<Output = Result<(), RepositoryError>> + Send {
        let path = self.path.clone();

        async move {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        }
    }
}
