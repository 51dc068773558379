//! Error types for guest list operations.

use thiserror::Error;

/// Result type alias for guest list operations.
pub type Result<T> = std::result::Result<T, GuestListError>;

/// Repository operation a [`GuestListError::PersistenceFailure`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersistenceOperation {
    /// Loading the guest collection
    Load,
    /// Saving the full guest collection
    Save,
    /// Clearing persisted state
    Reset,
}

impl PersistenceOperation {
    /// Lowercase name, used in logs, metrics and messages
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Save => "save",
            Self::Reset => "reset",
        }
    }
}

impl std::fmt::Display for PersistenceOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every way a guest list operation can be rejected or fail.
///
/// Validation errors leave the guest collection untouched. None of them is
/// fatal: the guest list stays usable after any of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GuestListError {
    // ═══════════════════════════════════════════════════════════
    // Validation Errors
    // ═══════════════════════════════════════════════════════════

    /// Email is empty or malformed.
    #[error("Invalid email address: {email:?}")]
    InvalidEmail {
        /// The rejected input
        email: String,
    },

    /// Ticket count is not a positive integer.
    #[error("Invalid ticket count: {input:?} (must be a positive whole number)")]
    InvalidTicketCount {
        /// The rejected input, as given
        input: String,
    },

    /// Another guest already uses this email (case-insensitive).
    #[error("A guest with email {email} is already on the list")]
    DuplicateEmail {
        /// The colliding email
        email: String,
    },

    /// The change would push total tickets above capacity.
    #[error("Not enough tickets left: requested {requested}, {remaining} of {capacity} remaining")]
    CapacityExceeded {
        /// Tickets the change asked for
        requested: u32,
        /// Tickets still available (excluding a guest being replaced)
        remaining: u32,
        /// Event capacity
        capacity: u32,
    },

    /// No guest at the given position.
    #[error("No guest at position {index}")]
    GuestNotFound {
        /// Requested position
        index: usize,
    },

    /// Guests are still being fetched; changes would be overwritten.
    #[error("Guest list is still loading")]
    LoadInProgress,

    // ═══════════════════════════════════════════════════════════
    // Persistence Errors
    // ═══════════════════════════════════════════════════════════

    /// The repository rejected a load, save or reset.
    #[error("Failed to {operation} guest list: {reason}")]
    PersistenceFailure {
        /// Failed operation
        operation: PersistenceOperation,
        /// Underlying storage error
        reason: String,
    },

    /// The guest list was disposed and accepts no more operations.
    #[error("Guest list has been disposed")]
    Disposed,
}

/// Payload-free discriminant of [`GuestListError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`GuestListError::InvalidEmail`]
    InvalidEmail,
    /// See [`GuestListError::InvalidTicketCount`]
    InvalidTicketCount,
    /// See [`GuestListError::DuplicateEmail`]
    DuplicateEmail,
    /// See [`GuestListError::CapacityExceeded`]
    CapacityExceeded,
    /// See [`GuestListError::GuestNotFound`]
    GuestNotFound,
    /// See [`GuestListError::LoadInProgress`]
    LoadInProgress,
    /// See [`GuestListError::PersistenceFailure`]
    PersistenceFailure,
    /// See [`GuestListError::Disposed`]
    Disposed,
}

impl GuestListError {
    /// The error's kind, for matching without payload
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidEmail { .. } => ErrorKind::InvalidEmail,
            Self::InvalidTicketCount { .. } => ErrorKind::InvalidTicketCount,
            Self::DuplicateEmail { .. } => ErrorKind::DuplicateEmail,
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            Self::GuestNotFound { .. } => ErrorKind::GuestNotFound,
            Self::LoadInProgress => ErrorKind::LoadInProgress,
            Self::PersistenceFailure { .. } => ErrorKind::PersistenceFailure,
            Self::Disposed => ErrorKind::Disposed,
        }
    }

    /// Whether this is a rejected input rather than a failed operation
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidEmail
                | ErrorKind::InvalidTicketCount
                | ErrorKind::DuplicateEmail
                | ErrorKind::CapacityExceeded
                | ErrorKind::GuestNotFound
                | ErrorKind::LoadInProgress
        )
    }

    /// Build a [`GuestListError::PersistenceFailure`]
    pub fn persistence(operation: PersistenceOperation, reason: impl std::fmt::Display) -> Self {
        Self::PersistenceFailure {
            operation,
            reason: reason.to_string(),
        }
    }
}
