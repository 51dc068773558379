//! # Guest List
//!
//! Guest list for a single event: guests holding tickets, a fixed ticket
//! capacity, and a pluggable repository the list is loaded from and saved to.
//!
//! ## Architecture
//!
//! - **State**: [`GuestListState`], the guests plus load and error status
//! - **Actions**: [`GuestListAction`], user commands and persistence results
//! - **Reducer**: [`GuestListReducer`], validation and state transitions
//! - **Effects**: saves, loads, resets and notices, run by the Store
//! - **Providers**: [`GuestRepository`] and [`Notifier`], injected
//!
//! Repository calls go through a single ordered queue, so the last change
//! made is the last one stored.
//!
//! ## Example
//!
//! ```ignore
//! use guest_list::{Guest, GuestList, GuestListConfig, TracingNotifier};
//! use guest_list::repositories::InMemoryGuestRepository;
//! use guest_list_core::environment::SystemClock;
//!
//! let list = GuestList::new(
//!     InMemoryGuestRepository::new(),
//!     TracingNotifier,
//!     SystemClock,
//!     &GuestListConfig::default(),
//! );
//!
//! list.load_guests().await?;
//! list.add_guest(Guest::new("ada@example.com", 2)).await?;
//! assert_eq!(list.remaining_tickets().await, 18);
//! ```

pub mod config;
pub mod error;
pub mod guest_list;
pub mod persistence;
pub mod providers;
pub mod reducer;
pub mod repositories;
pub mod types;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

pub use config::GuestListConfig;
pub use error::{ErrorKind, GuestListError, PersistenceOperation, Result};
pub use guest_list::{GuestList, GuestListStore};
pub use persistence::PersistenceQueue;
pub use providers::{GuestRepository, Notifier, RepositoryError, TracingNotifier};
pub use reducer::{GuestListEnvironment, GuestListReducer};
pub use types::{
    DEFAULT_CAPACITY, Guest, GuestChange, GuestListAction, GuestListState, GuestListSummary,
    LoadStatus, Notice, NoticeLevel,
};
