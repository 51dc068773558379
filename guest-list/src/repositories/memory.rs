//! In-process guest storage.

use crate::providers::{GuestRepository, RepositoryError};
use crate::types::Guest;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Guest repository that keeps the collection in memory.
///
/// Clones share the same storage, so a clone kept by a test sees what the
/// guest list saved.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGuestRepository {
    stored: Arc<RwLock<Option<Vec<Guest>>>>,
}

impl InMemoryGuestRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository that already holds `guests`.
    #[must_use]
    pub fn with_guests(guests: Vec<Guest>) -> Self {
        Self {
            stored: Arc::new(RwLock::new(Some(guests))),
        }
    }

    /// What is currently stored; `None` after a reset or before the first save.
    pub async fn stored(&self) -> Option<Vec<Guest>> {
        self.stored.read().await.clone()
    }
}

impl GuestRepository for InMemoryGuestRepository {
    fn load(&self) -> impl Future<Output = Result<Vec<Guest>, RepositoryError>> + Send {
        let stored = Arc::clone(&self.stored);

        async move { Ok(stored.read().await.clone().unwrap_or_default()) }
    }

    fn save(&self, guests: &[Guest]) -> impl Future<Output = Result<(), RepositoryError>> + Send {
        let stored = Arc::clone(&self.stored);
        let guests = guests.to_vec();

        async move {
            *stored.write().await = Some(guests);
            Ok(())
        }
    }

    fn reset(&self) -> impl Future<Output = Result<(), RepositoryError>> + Send {
        let stored = Arc::clone(&self.stored);

        async move {
            *stored.write().await = None;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_repository_loads_nothing() {
        let repo = InMemoryGuestRepository::new();
        assert_eq!(repo.load().await.ok(), Some(Vec::new()));
        assert_eq!(repo.stored().await, None);
    }

    #[tokio::test]
    async fn save_then_load_preserves_order() {
        let repo = InMemoryGuestRepository::new();
        let guests = vec![Guest::new("b@example.com", 1), Guest::new("a@example.com", 2)];

        assert!(repo.save(&guests).await.is_ok());
        assert_eq!(repo.load().await.ok(), Some(guests));
    }

    #[test]
    fn reset_clears_storage() {
        let repo = InMemoryGuestRepository::with_guests(vec![Guest::new("a@example.com", 2)]);

        tokio_test::block_on(async {
            assert!(repo.reset().await.is_ok());
            assert_eq!(repo.stored().await, None);
            assert_eq!(repo.load().await.ok(), Some(Vec::new()));
        });
    }
}
