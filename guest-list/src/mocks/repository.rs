//! Mock guest repository for testing.

use crate::providers::{GuestRepository, RepositoryError};
use crate::types::Guest;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Default)]
struct MockState {
    stored: Vec<Guest>,
    fail_loads: bool,
    fail_saves: bool,
    fail_resets: bool,
    failing_saves_left: usize,
    save_delay: Option<Duration>,
    load_calls: usize,
    save_attempts: usize,
    reset_calls: usize,
    saved: Vec<Vec<Guest>>,
}

/// Mock guest repository.
///
/// Stores guests in memory, records every call, and fails on demand.
/// Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockGuestRepository {
    state: Arc<Mutex<MockState>>,
}

impl MockGuestRepository {
    /// Create an empty mock repository that always succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose `load` returns `guests`.
    #[must_use]
    pub fn with_guests(guests: Vec<Guest>) -> Self {
        let repo = Self::new();
        repo.lock().stored = guests;
        repo
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread must not hide what was recorded
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Make every `load` fail (or succeed again).
    pub fn fail_loads(&self, fail: bool) {
        self.lock().fail_loads = fail;
    }

    /// Make every `save` fail (or succeed again).
    pub fn fail_saves(&self, fail: bool) {
        self.lock().fail_saves = fail;
    }

    /// Make the next `count` save attempts fail, then succeed.
    pub fn fail_next_saves(&self, count: usize) {
        self.lock().failing_saves_left = count;
    }

    /// Make every `reset` fail (or succeed again).
    pub fn fail_resets(&self, fail: bool) {
        self.lock().fail_resets = fail;
    }

    /// Delay every save by `delay` before it completes.
    pub fn delay_saves(&self, delay: Duration) {
        self.lock().save_delay = Some(delay);
    }

    /// Currently stored guests.
    #[must_use]
    pub fn stored(&self) -> Vec<Guest> {
        self.lock().stored.clone()
    }

    /// Every successfully saved snapshot, oldest first.
    #[must_use]
    pub fn saved(&self) -> Vec<Vec<Guest>> {
        self.lock().saved.clone()
    }

    /// Number of `load` calls.
    #[must_use]
    pub fn load_calls(&self) -> usize {
        self.lock().load_calls
    }

    /// Number of `save` calls, failed ones included.
    #[must_use]
    pub fn save_attempts(&self) -> usize {
        self.lock().save_attempts
    }

    /// Number of `reset` calls.
    #[must_use]
    pub fn reset_calls(&self) -> usize {
        self.lock().reset_calls
    }
}

impl GuestRepository for MockGuestRepository {
    fn load(&self) -> impl Future<Output = Result<Vec<Guest>, RepositoryError>> + Send {
        let result = {
            let mut state = self.lock();
            state.load_calls += 1;
            if state.fail_loads {
                Err(RepositoryError::Unavailable("load failed".to_string()))
            } else {
                Ok(state.stored.clone())
            }
        };

        async move { result }
    }

    fn save(&self, guests: &[Guest]) -> impl Future<Output = Result<(), RepositoryError>> + Send {
        let state = Arc::clone(&self.state);
        let guests = guests.to_vec();
        let delay = self.lock().save_delay;

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            let mut state = state
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            state.save_attempts += 1;

            if state.failing_saves_left > 0 {
                state.failing_saves_left -= 1;
                return Err(RepositoryError::Unavailable("save failed".to_string()));
            }
            if state.fail_saves {
                return Err(RepositoryError::Unavailable("save failed".to_string()));
            }

            state.stored.clone_from(&guests);
            state.saved.push(guests);
            Ok(())
        }
    }

    fn reset(&self) -> impl Future<Output = Result<(), RepositoryError>> + Send {
        let result = {
            let mut state = self.lock();
            state.reset_calls += 1;
            if state.fail_resets {
                Err(RepositoryError::Unavailable("reset failed".to_string()))
            } else {
                state.stored.clear();
                Ok(())
            }
        };

        async move { result }
    }
}
