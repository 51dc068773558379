//! Domain types for the guest list.
//!
//! A guest list is an ordered collection of guests, each holding some number
//! of tickets, capped by the event's capacity.

use crate::error::GuestListError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ticket capacity of an event unless configured otherwise
pub const DEFAULT_CAPACITY: u32 = 20;

/// A single guest
///
/// Identity is the lowercased email; the stored email keeps its original case.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Guest {
    /// Contact email, unique across the list ignoring case
    pub email: String,
    /// Number of tickets held, always positive once validated
    pub tickets: u32,
}

impl Guest {
    /// Creates a new guest
    #[must_use]
    pub fn new(email: impl Into<String>, tickets: u32) -> Self {
        Self {
            email: email.into(),
            tickets,
        }
    }

    /// Identity key: the trimmed, lowercased email
    #[must_use]
    pub fn key(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

/// Progress of the initial fetch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Waiting for the repository
    Loading,
    /// Guests replaced with the repository's contents
    Loaded,
    /// The repository failed; guests left as they were
    Failed,
}

/// State of the guest list
///
/// `guests` is public so tests and tools can seed a list directly. Doing so
/// bypasses validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuestListState {
    /// Guests in display order
    pub guests: Vec<Guest>,
    /// Maximum total tickets
    pub capacity: u32,
    /// Initial load progress
    pub load_status: LoadStatus,
    /// Error from the most recent command, if it failed
    pub last_error: Option<GuestListError>,
    /// A save failed and memory is ahead of storage
    pub unsaved_changes: bool,
}

impl Default for GuestListState {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl GuestListState {
    /// Creates an empty guest list with the given capacity
    #[must_use]
    pub const fn new(capacity: u32) -> Self {
        Self {
            guests: Vec::new(),
            capacity,
            load_status: LoadStatus::Idle,
            last_error: None,
            unsaved_changes: false,
        }
    }

    /// Creates a guest list already holding `guests`, without validation
    #[must_use]
    pub fn with_guests(capacity: u32, guests: Vec<Guest>) -> Self {
        Self {
            guests,
            ..Self::new(capacity)
        }
    }

    /// Sum of tickets over all guests
    #[must_use]
    ///
    /// Summed as `u64` so a seeded list of large counts cannot wrap or clamp.
    #[must_use]
    pub fn total_tickets(&self) -> u64 {
        self.guests.iter().map(|guest| u64::from(guest.tickets)).sum()
    }

    /// Tickets still available (zero when a seeded list is over capacity)
    #[must_use]
    pub fn remaining_tickets(&self) -> u32 {
        let remaining = u64::from(self.capacity).saturating_sub(self.total_tickets());
        // Never more than `capacity`, so the conversion always succeeds
        u32::try_from(remaining).unwrap_or(self.capacity)
    }

    /// Whether the event has reached capacity
    #[must_use]
    pub fn is_event_full(&self) -> bool {
        self.total_tickets() >= u64::from(self.capacity)
    }

    /// Whether the "add guest" affordance is enabled
    #[must_use]
    pub fn can_add_guest(&self) -> bool {
        !self.is_event_full()
    }

    /// Number of guests
    #[must_use]
    pub fn count(&self) -> usize {
        self.guests.len()
    }

    /// Read-only view for presentation layers
    #[must_use]
    pub fn summary(&self) -> GuestListSummary {
        GuestListSummary {
            guests: self.guests.clone(),
            total_tickets: self.total_tickets(),
            remaining_tickets: self.remaining_tickets(),
            capacity: self.capacity,
            is_event_full: self.is_event_full(),
        }
    }
}

/// What a presentation layer shows: the guests and the derived values
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestListSummary {
    /// Guests in display order
    pub guests: Vec<Guest>,
    /// Sum of tickets
    pub total_tickets: u64,
    /// Tickets still available
    pub remaining_tickets: u32,
    /// Event capacity
    pub capacity: u32,
    /// Whether the event is full
    pub is_event_full: bool,
}

/// A committed change to the guest collection, awaiting persistence
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuestChange {
    /// A guest was appended
    Added {
        /// Email of the new guest
        email: String,
    },
    /// The guest at `index` was replaced
    Updated {
        /// Position of the replaced guest
        index: usize,
        /// Email after the edit
        email: String,
    },
    /// A guest was removed
    Removed {
        /// Email of the removed guest
        email: String,
    },
}

impl GuestChange {
    /// User-facing confirmation once the change is persisted
    #[must_use]
    pub fn success_message(&self) -> String {
        match self {
            Self::Added { email } => format!("Guest {email} added"),
            Self::Updated { email, .. } => format!("Guest {email} updated"),
            Self::Removed { email } => format!("Guest {email} removed"),
        }
    }
}

/// Actions for the guest list
///
/// Commands come from the user; the rest are results fed back by effects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuestListAction {
    // ========== Commands ==========
    /// Command: Replace the guests with the repository's contents
    LoadGuests,

    /// Command: Append a guest, or replace the one at `editing_index`
    AddOrUpdateGuest {
        /// The guest to add, or the edited guest
        candidate: Guest,
        /// Position of the guest being edited, `None` to add
        editing_index: Option<usize>,
    },

    /// Command: Remove the guest at `index`
    RemoveGuest {
        /// Position of the guest to remove
        index: usize,
    },

    /// Command: Clear persisted state, then the in-memory guests
    ResetGuestList,

    // ========== Results ==========
    /// Result: The repository returned the stored guests
    GuestsLoaded {
        /// Stored guests, in stored order
        guests: Vec<Guest>,
    },

    /// Result: Loading failed
    LoadFailed {
        /// Why
        error: GuestListError,
    },

    /// Result: A change was persisted
    ChangeSaved {
        /// The persisted change
        change: GuestChange,
        /// The change took the event from open to full when it was applied
        event_full: bool,
    },

    /// Result: Persisting a change failed
    SaveFailed {
        /// The change that stays in memory only
        change: GuestChange,
        /// Why
        error: GuestListError,
    },

    /// Result: The repository was cleared
    ListReset,

    /// Result: Clearing the repository failed
    ResetFailed {
        /// Why
        error: GuestListError,
    },

    /// Result: A command failed validation and changed nothing
    CommandRejected {
        /// Why
        error: GuestListError,
    },
}

impl GuestListAction {
    /// Command to append `guest`
    #[must_use]
    pub const fn add(guest: Guest) -> Self {
        Self::AddOrUpdateGuest {
            candidate: guest,
            editing_index: None,
        }
    }

    /// Command to replace the guest at `index` with `guest`
    #[must_use]
    pub const fn update(index: usize, guest: Guest) -> Self {
        Self::AddOrUpdateGuest {
            candidate: guest,
            editing_index: Some(index),
        }
    }

    /// Whether this action came from the user rather than an effect
    #[must_use]
    pub const fn is_command(&self) -> bool {
        matches!(
            self,
            Self::LoadGuests
                | Self::AddOrUpdateGuest { .. }
                | Self::RemoveGuest { .. }
                | Self::ResetGuestList
        )
    }

    /// How the command that produced this result turned out
    ///
    /// `None` for commands. Every command's chain of actions ends in exactly
    /// one result for which this is `Some`.
    #[must_use]
    pub fn outcome(&self) -> Option<Result<(), GuestListError>> {
        match self {
            Self::GuestsLoaded { .. } | Self::ChangeSaved { .. } | Self::ListReset => Some(Ok(())),
            Self::LoadFailed { error }
            | Self::SaveFailed { error, .. }
            | Self::ResetFailed { error }
            | Self::CommandRejected { error } => Some(Err(error.clone())),
            Self::LoadGuests
            | Self::AddOrUpdateGuest { .. }
            | Self::RemoveGuest { .. }
            | Self::ResetGuestList => None,
        }
    }
}

/// Notification category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// An operation completed
    Success,
    /// An operation was rejected or failed
    Error,
    /// Informational
    Info,
}

impl std::fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Error => f.write_str("error"),
            Self::Info => f.write_str("info"),
        }
    }
}

/// A user-visible notification
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Category
    pub level: NoticeLevel,
    /// Text shown to the user
    pub message: String,
    /// When it was raised
    pub at: DateTime<Utc>,
}

impl Notice {
    /// Creates a notice
    #[must_use]
    pub fn new(level: NoticeLevel, message: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            level,
            message: message.into(),
            at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(guests: &[(&str, u32)]) -> GuestListState {
        GuestListState::with_guests(
            DEFAULT_CAPACITY,
            guests
                .iter()
                .map(|(email, tickets)| Guest::new(*email, *tickets))
                .collect(),
        )
    }

    #[test]
    fn empty_list_has_all_tickets_left() {
        let state = GuestListState::default();
        assert_eq!(state.total_tickets(), 0);
        assert_eq!(state.remaining_tickets(), 20);
        assert!(!state.is_event_full());
        assert!(state.can_add_guest());
    }

    #[test]
    fn totals_follow_the_collection() {
        let state = state_with(&[("test1@example.com", 3), ("test2@example.com", 2)]);
        assert_eq!(state.total_tickets(), 5);
        assert_eq!(state.remaining_tickets(), 15);
        assert!(!state.is_event_full());
    }

    #[test]
    fn full_at_exactly_capacity() {
        let state = state_with(&[("guest1@example.com", 10), ("guest2@example.com", 10)]);
        assert!(state.is_event_full());
        assert!(!state.can_add_guest());
        assert_eq!(state.remaining_tickets(), 0);
    }

    #[test]
    fn over_capacity_seed_saturates_remaining() {
        let mut state = state_with(&[("guest1@example.com", 10), ("guest2@example.com", 8)]);
        assert!(!state.is_event_full());

        state.guests.push(Guest::new("newguest@example.com", 5));
        assert_eq!(state.total_tickets(), 23);
        assert!(state.is_event_full());
        assert_eq!(state.remaining_tickets(), 0);
    }

    #[test]
    fn huge_seeded_counts_do_not_clamp_the_total() {
        let state = GuestListState::with_guests(
            DEFAULT_CAPACITY,
            vec![
                Guest::new("a@example.com", u32::MAX),
                Guest::new("b@example.com", u32::MAX),
            ],
        );
        assert_eq!(state.total_tickets(), 2 * u64::from(u32::MAX));
        assert_eq!(state.remaining_tickets(), 0);
        assert!(state.is_event_full());
        assert_eq!(state.summary().total_tickets, 2 * u64::from(u32::MAX));
    }

    #[test]
    fn guest_serializes_as_plain_record() {
        let json = serde_json::to_string(&Guest::new("a@example.com", 2)).unwrap_or_default();
        assert_eq!(json, r#"{"email":"a@example.com","tickets":2}"#);
    }

    #[test]
    fn commands_are_distinguished_from_results() {
        assert!(GuestListAction::LoadGuests.is_command());
        assert!(GuestListAction::add(Guest::new("a@example.com", 1)).is_command());
        assert!(!GuestListAction::ListReset.is_command());
    }

    #[test]
    fn only_results_carry_an_outcome() {
        let error = GuestListError::GuestNotFound { index: 3 };
        assert_eq!(GuestListAction::LoadGuests.outcome(), None);
        assert_eq!(GuestListAction::ListReset.outcome(), Some(Ok(())));
        assert_eq!(
            GuestListAction::CommandRejected {
                error: error.clone()
            }
            .outcome(),
            Some(Err(error))
        );
    }
}
