//! Guest list providers.
//!
//! Traits for the external collaborators the reducer depends on. The reducer
//! only ever sees these interfaces; binaries and tests choose the
//! implementations.
//!
//! ```text
//! GuestListReducer ──> PersistenceQueue ──> GuestRepository ──> storage
//!        │
//!        └──────────> Notifier ──> toast / log / console
//! ```

pub mod notifier;
pub mod repository;

pub use notifier::{Notifier, TracingNotifier};
pub use repository::{GuestRepository, RepositoryError};
