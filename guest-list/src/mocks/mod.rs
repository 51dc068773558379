//! Mock provider implementations for testing.
//!
//! In-memory, deterministic implementations of the provider traits with
//! knobs for failure injection and call inspection.

pub mod notifier;
pub mod repository;

pub use notifier::RecordingNotifier;
pub use repository::MockGuestRepository;
