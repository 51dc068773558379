//! Storage backends for [`GuestRepository`](crate::providers::GuestRepository).

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileGuestRepository;
pub use memory::InMemoryGuestRepository;
