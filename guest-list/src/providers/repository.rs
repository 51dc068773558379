//! Guest repository trait.

use crate::types::Guest;
use std::future::Future;
use thiserror::Error;

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Reading or writing the backing store failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend is not reachable or refused the request.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Persistence for a guest collection.
///
/// Any backend offering these three operations can sit behind the guest
/// list: a file, a remote API, browser-style local storage.
pub trait GuestRepository: Send + Sync {
    /// Load the stored guests, in stored order.
    ///
    /// Returns an empty list when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns error if the backing store cannot be read or decoded.
    fn load(&self) -> impl Future<Output = Result<Vec<Guest>, RepositoryError>> + Send;

    /// Replace the stored guests with `guests`.
    ///
    /// # Errors
    ///
    /// Returns error if the backing store cannot be written.
    fn save(&self, guests: &[Guest]) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Clear everything stored.
    ///
    /// # Errors
    ///
    /// Returns error if the backing store cannot be cleared.
    fn reset(&self) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}
