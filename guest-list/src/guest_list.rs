//! The guest list widget.
//!
//! [`GuestList`] wraps a [`Store`] running the [`GuestListReducer`] and turns
//! each command into an awaited call with a `Result`. Every call resolves
//! after persistence has settled and every notice for it has been delivered.

use crate::config::GuestListConfig;
use crate::error::{GuestListError, Result};
use crate::persistence::PersistenceQueue;
use crate::providers::{GuestRepository, Notifier};
use crate::reducer::{GuestListEnvironment, GuestListReducer};
use crate::types::{Guest, GuestListAction, GuestListState, GuestListSummary};
use guest_list_core::environment::Clock;
use guest_list_runtime::{RetryPolicy, Store};
use tokio::sync::watch;

/// Store type behind a [`GuestList`]
pub type GuestListStore<N, C> = Store<
    GuestListState,
    GuestListAction,
    GuestListEnvironment<N, C>,
    GuestListReducer<N, C>,
>;

/// An event's guest list
///
/// Cloning yields another handle to the same list.
pub struct GuestList<N, C>
where
    N: Notifier + 'static,
    C: Clock + 'static,
{
    store: GuestListStore<N, C>,
}

impl<N, C> Clone for GuestList<N, C>
where
    N: Notifier + 'static,
    C: Clock + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<N, C> GuestList<N, C>
where
    N: Notifier + 'static,
    C: Clock + 'static,
{
    /// Creates an empty guest list backed by `repository`
    ///
    /// Nothing is loaded until [`GuestList::load_guests`] is called.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn new<R>(repository: R, notifier: N, clock: C, config: &GuestListConfig) -> Self
    where
        R: GuestRepository + 'static,
    {
        Self::with_state(
            GuestListState::new(config.capacity),
            repository,
            notifier,
            clock,
            config.retry.clone(),
        )
    }

    /// Creates a guest list starting from `state`
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn with_state<R>(
        state: GuestListState,
        repository: R,
        notifier: N,
        clock: C,
        retry: RetryPolicy,
    ) -> Self
    where
        R: GuestRepository + 'static,
    {
        let environment =
            GuestListEnvironment::new(PersistenceQueue::spawn(repository, retry), notifier, clock);

        Self {
            store: Store::new(state, GuestListReducer::new(), environment),
        }
    }

    /// Replace the guests with the repository's contents
    ///
    /// # Errors
    ///
    /// [`GuestListError::PersistenceFailure`] if the repository fails; the
    /// current guests are kept.
    pub async fn load_guests(&self) -> Result<()> {
        self.dispatch(GuestListAction::LoadGuests).await
    }

    /// Add `candidate`, or replace the guest at `editing_index` with it
    ///
    /// # Errors
    ///
    /// Any validation error leaves the list untouched. A
    /// [`GuestListError::PersistenceFailure`] means the change is kept in
    /// memory but not stored.
    pub async fn add_or_update_guest(
        &self,
        candidate: Guest,
        editing_index: Option<usize>,
    ) -> Result<()> {
        self.dispatch(GuestListAction::AddOrUpdateGuest {
            candidate,
            editing_index,
        })
        .await
    }

    /// Append a guest
    ///
    /// # Errors
    ///
    /// See [`GuestList::add_or_update_guest`].
    pub async fn add_guest(&self, guest: Guest) -> Result<()> {
        self.dispatch(GuestListAction::add(guest)).await
    }

    /// Replace the guest at `index`
    ///
    /// # Errors
    ///
    /// See [`GuestList::add_or_update_guest`].
    pub async fn update_guest(&self, index: usize, guest: Guest) -> Result<()> {
        self.dispatch(GuestListAction::update(index, guest)).await
    }

    /// Remove the guest at `index`
    ///
    /// # Errors
    ///
    /// [`GuestListError::GuestNotFound`] when `index` is out of range, or a
    /// [`GuestListError::PersistenceFailure`] if the save fails.
    pub async fn remove_guest(&self, index: usize) -> Result<()> {
        self.dispatch(GuestListAction::RemoveGuest { index }).await
    }

    /// Clear persisted state, then the in-memory guests
    ///
    /// # Errors
    ///
    /// [`GuestListError::PersistenceFailure`] if the repository cannot be
    /// cleared; the guests are kept.
    pub async fn reset_guest_list(&self) -> Result<()> {
        self.dispatch(GuestListAction::ResetGuestList).await
    }

    /// Guests in display order
    pub async fn guests(&self) -> Vec<Guest> {
        self.store.state(|s| s.guests.clone()).await
    }

    /// Sum of tickets over all guests
    pub async fn total_tickets(&self) -> u64 {
        self.store.state(GuestListState::total_tickets).await
    }

    /// Tickets still available
    pub async fn remaining_tickets(&self) -> u32 {
        self.store.state(GuestListState::remaining_tickets).await
    }

    /// Whether the event has reached capacity
    pub async fn is_event_full(&self) -> bool {
        self.store.state(GuestListState::is_event_full).await
    }

    /// Whether adding a guest is currently allowed
    pub async fn can_add_guest(&self) -> bool {
        self.store.state(GuestListState::can_add_guest).await
    }

    /// Guests plus derived values, for rendering
    pub async fn summary(&self) -> GuestListSummary {
        self.store.state(GuestListState::summary).await
    }

    /// Copy of the full state
    pub async fn snapshot(&self) -> GuestListState {
        self.store.state(GuestListState::clone).await
    }

    /// Subscribe to state changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<GuestListState> {
        self.store.subscribe()
    }

    /// Stop accepting commands
    ///
    /// Operations still in flight complete against storage, but their
    /// results no longer touch the state or raise notices.
    pub fn dispose(&self) {
        self.store.shutdown();
    }

    /// Whether [`GuestList::dispose`] has been called
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.store.is_shut_down()
    }

    /// Send `action` and report how it turned out
    ///
    /// The outcome is read from the actions this call reduced, never from
    /// shared state, so concurrent callers each see their own result. A chain
    /// cut short by [`GuestList::dispose`] has no result.
    async fn dispatch(&self, action: GuestListAction) -> Result<()> {
        let reduced = self
            .store
            .send(action)
            .await
            .map_err(|_| GuestListError::Disposed)?;

        match reduced.iter().rev().find_map(GuestListAction::outcome) {
            Some(outcome) => outcome,
            None => Err(GuestListError::Disposed),
        }
    }
}
