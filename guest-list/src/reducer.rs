//! Reducer logic for the guest list.
//!
//! Commands are validated against the current state and applied
//! immediately. Persistence happens afterwards, through effects, and its
//! outcome comes back as a result action. A failed save does not undo the
//! in-memory change; it marks the list as having unsaved changes.

use crate::error::GuestListError;
use crate::persistence::PersistenceQueue;
use crate::providers::Notifier;
use crate::types::{
    GuestChange, GuestListAction, GuestListState, LoadStatus, Notice, NoticeLevel,
};
use crate::validation;
use guest_list_core::{
    SmallVec, async_effect, effect::Effect, environment::Clock, on_result, reducer::Reducer,
    smallvec,
};
use std::marker::PhantomData;
use std::sync::Arc;

/// Notice raised when a change fills the last ticket
pub const EVENT_FULL_MESSAGE: &str = "The event is now full";

/// Notice raised once the persisted list is cleared
pub const RESET_MESSAGE: &str = "Guest list reset";

/// Environment dependencies for the guest list reducer
pub struct GuestListEnvironment<N, C> {
    /// Ordered access to the repository
    pub persistence: PersistenceQueue,
    /// Where notices go
    pub notifier: Arc<N>,
    /// Timestamps for notices
    pub clock: C,
}

impl<N: Notifier, C: Clock> GuestListEnvironment<N, C> {
    /// Creates a new `GuestListEnvironment`
    #[must_use]
    pub fn new(persistence: PersistenceQueue, notifier: N, clock: C) -> Self {
        Self {
            persistence,
            notifier: Arc::new(notifier),
            clock,
        }
    }
}

/// Reducer for the guest list
///
/// Generic over the notifier and clock so the environment needs no trait
/// objects.
pub struct GuestListReducer<N, C> {
    _phantom: PhantomData<fn() -> (N, C)>,
}

impl<N, C> GuestListReducer<N, C> {
    /// Creates a new `GuestListReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<N, C> Default for GuestListReducer<N, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, C> Clone for GuestListReducer<N, C> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<N, C> std::fmt::Debug for GuestListReducer<N, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GuestListReducer")
    }
}

impl<N, C> GuestListReducer<N, C>
where
    N: Notifier + 'static,
    C: Clock,
{
    /// Effect delivering a notice stamped with the environment's clock
    fn notify(
        env: &GuestListEnvironment<N, C>,
        level: NoticeLevel,
        message: impl Into<String>,
    ) -> Effect<GuestListAction> {
        let notifier = Arc::clone(&env.notifier);
        let notice = Notice::new(level, message, env.clock.now());
        async_effect! {
            notifier.notify(notice);
            None
        }
    }

    /// Records a rejected command and reports it as the command's result
    fn reject(
        state: &mut GuestListState,
        error: GuestListError,
    ) -> SmallVec<[Effect<GuestListAction>; 4]> {
        tracing::debug!(error = %error, "Guest list command rejected");
        state.last_error = Some(error.clone());
        smallvec![async_effect! {
            Some(GuestListAction::CommandRejected { error })
        }]
    }

    /// Queues a save of the current guests and maps its outcome
    ///
    /// The snapshot is enqueued now, under the state lock, so saves reach
    /// storage in the order the state changed. `event_full` is the fullness
    /// right after the change, reported once the save succeeds.
    fn persist(
        state: &GuestListState,
        env: &GuestListEnvironment<N, C>,
        change: GuestChange,
        event_full: bool,
    ) -> Effect<GuestListAction> {
        on_result! {
            env.persistence.save(state.guests.clone()),
            on_success: |()| Some(GuestListAction::ChangeSaved { change, event_full }),
            on_error: |error| Some(GuestListAction::SaveFailed { change, error })
        }
    }
}

impl<N, C> Reducer for GuestListReducer<N, C>
where
    N: Notifier + 'static,
    C: Clock,
{
    type State = GuestListState;
    type Action = GuestListAction;
    type Environment = GuestListEnvironment<N, C>;

    #[allow(clippy::too_many_lines)] // One arm per action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if action.is_command() {
            state.last_error = None;
        }

        match action {
            // ========== Commands ==========
            GuestListAction::LoadGuests => {
                state.load_status = LoadStatus::Loading;
                tracing::debug!("Loading guests");

                smallvec![on_result! {
                    env.persistence.load(),
                    on_success: |guests| Some(GuestListAction::GuestsLoaded { guests }),
                    on_error: |error| Some(GuestListAction::LoadFailed { error })
                }]
            },

            GuestListAction::AddOrUpdateGuest {
                candidate,
                editing_index,
            } => {
                if state.load_status == LoadStatus::Loading {
                    return Self::reject(state, GuestListError::LoadInProgress);
                }
                let guest = match validation::check_candidate(state, &candidate, editing_index) {
                    Ok(guest) => guest,
                    Err(error) => return Self::reject(state, error),
                };

                let email = guest.email.clone();
                let change = match editing_index {
                    Some(index) => {
                        if let Some(slot) = state.guests.get_mut(index) {
                            *slot = guest;
                        }
                        GuestChange::Updated { index, email }
                    },
                    None => {
                        state.guests.push(guest);
                        GuestChange::Added { email }
                    },
                };

                tracing::info!(
                    ?change,
                    total_tickets = state.total_tickets(),
                    capacity = state.capacity,
                    "Guest list changed"
                );
                smallvec![Self::persist(state, env, change, state.is_event_full())]
            },

            GuestListAction::RemoveGuest { index } => {
                if state.load_status == LoadStatus::Loading {
                    return Self::reject(state, GuestListError::LoadInProgress);
                }
                if index >= state.guests.len() {
                    return Self::reject(state, GuestListError::GuestNotFound { index });
                }

                let removed = state.guests.remove(index);
                let change = GuestChange::Removed {
                    email: removed.email,
                };

                tracing::info!(
                    ?change,
                    total_tickets = state.total_tickets(),
                    "Guest removed"
                );
                smallvec![Self::persist(state, env, change, false)]
            },

            GuestListAction::ResetGuestList => {
                if state.load_status == LoadStatus::Loading {
                    return Self::reject(state, GuestListError::LoadInProgress);
                }
                tracing::debug!("Resetting guest list");

                smallvec![on_result! {
                    env.persistence.reset(),
                    on_success: |()| Some(GuestListAction::ListReset),
                    on_error: |error| Some(GuestListAction::ResetFailed { error })
                }]
            },

            // ========== Results ==========
            GuestListAction::GuestsLoaded { guests } => {
                tracing::info!(count = guests.len(), "Guests loaded");
                state.guests = guests;
                state.load_status = LoadStatus::Loaded;
                state.unsaved_changes = false;
                SmallVec::new()
            },

            GuestListAction::LoadFailed { error } => {
                tracing::warn!(error = %error, "Loading guests failed");
                state.load_status = LoadStatus::Failed;
                let message = error.to_string();
                state.last_error = Some(error);
                smallvec![Self::notify(env, NoticeLevel::Error, message)]
            },

            GuestListAction::ChangeSaved { change, event_full } => {
                state.unsaved_changes = false;

                let mut effects: SmallVec<[Effect<Self::Action>; 4]> =
                    smallvec![Self::notify(env, NoticeLevel::Success, change.success_message())];
                if event_full {
                    effects.push(Self::notify(env, NoticeLevel::Info, EVENT_FULL_MESSAGE));
                }
                effects
            },

            GuestListAction::SaveFailed { change, error } => {
                tracing::warn!(?change, error = %error, "Change kept in memory only");
                state.unsaved_changes = true;
                let message = error.to_string();
                state.last_error = Some(error);
                smallvec![Self::notify(env, NoticeLevel::Error, message)]
            },

            GuestListAction::ListReset => {
                tracing::info!(cleared = state.guests.len(), "Guest list reset");
                state.guests.clear();
                state.unsaved_changes = false;
                state.last_error = None;
                smallvec![Self::notify(env, NoticeLevel::Success, RESET_MESSAGE)]
            },

            GuestListAction::ResetFailed { error } => {
                tracing::warn!(error = %error, "Resetting guest list failed");
                let message = error.to_string();
                state.last_error = Some(error);
                smallvec![Self::notify(env, NoticeLevel::Error, message)]
            },

            GuestListAction::CommandRejected { error } => {
                smallvec![Self::notify(env, NoticeLevel::Error, error.to_string())]
            },
        }
    }
}
