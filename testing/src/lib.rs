//! # Guest List Testing
//!
//! Testing utilities for reducers and stores:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - [`assertions`]: effect assertion helpers
//! - [`run_effects`]: drives effect descriptions and collects fed-back actions
//! - [`FixedClock`] / [`test_clock`]: deterministic time
//!
//! ## Example
//!
//! ```ignore
//! use guest_list_testing::{test_clock, ReducerTest};
//!
//! ReducerTest::new(GuestListReducer::new())
//!     .with_env(test_environment())
//!     .given_state(GuestListState::default())
//!     .when_action(GuestListAction::add(Guest::new("a@example.com", 2)))
//!     .then_state(|state| assert_eq!(state.total_tickets(), 2))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use guest_list_core::environment::Clock;


pub use reducer_test::{ReducerTest, assertions, run_effects};

/// Mock implementations of shared Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// # Example
    ///
    /// ```
    /// use guest_list_testing::mocks::FixedClock;
    /// use guest_list_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone, Copy)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Fixed clock at 2025-01-01 00:00:00 UTC
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap_or_default())
    }
}

pub use mocks::{FixedClock, test_clock};
