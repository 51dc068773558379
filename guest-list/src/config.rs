//! Configuration management for the guest list.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::types::DEFAULT_CAPACITY;
use guest_list_runtime::RetryPolicy;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Guest list configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GuestListConfig {
    /// Maximum total tickets for the event
    pub capacity: u32,
    /// File used by the JSON repository
    pub data_file: PathBuf,
    /// Retry policy for repository calls
    pub retry: RetryPolicy,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for GuestListConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            data_file: PathBuf::from("guests.json"),
            retry: RetryPolicy::default(),
            log_filter: "guest_list=warn".to_string(),
        }
    }
}

impl GuestListConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `GUEST_LIST_CAPACITY` | 20 |
    /// | `GUEST_LIST_DATA_FILE` | `guests.json` |
    /// | `GUEST_LIST_RETRY_MAX` | 3 |
    /// | `GUEST_LIST_RETRY_INITIAL_DELAY_MS` | 100 |
    /// | `GUEST_LIST_RETRY_MAX_DELAY_MS` | 2000 |
    /// | `GUEST_LIST_RETRY_JITTER` | `false` |
    /// | `GUEST_LIST_LOG` | `guest_list=warn` |
    ///
    /// Unparseable values fall back to the default, as does a capacity of 0.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`GuestListConfig::from_env`], reading variables through `var`
    #[must_use]
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            capacity: var("GUEST_LIST_CAPACITY")
                .and_then(|s| s.trim().parse::<u32>().ok())
                .filter(|&capacity| capacity > 0)
                .unwrap_or(defaults.capacity),
            data_file: var("GUEST_LIST_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            retry: RetryPolicy::builder()
                .max_retries(
                    var("GUEST_LIST_RETRY_MAX")
                        .and_then(|s| s.trim().parse().ok())
                        .unwrap_or(defaults.retry.max_retries),
                )
                .initial_delay(
                    var("GUEST_LIST_RETRY_INITIAL_DELAY_MS")
                        .and_then(|s| s.trim().parse().ok())
                        .map_or(defaults.retry.initial_delay, Duration::from_millis),
                )
                .max_delay(
                    var("GUEST_LIST_RETRY_MAX_DELAY_MS")
                        .and_then(|s| s.trim().parse().ok())
                        .map_or(defaults.retry.max_delay, Duration::from_millis),
                )
                .jitter(
                    var("GUEST_LIST_RETRY_JITTER")
                        .and_then(|s| parse_flag(&s))
                        .unwrap_or(defaults.retry.jitter),
                )
                .build(),
            log_filter: var("GUEST_LIST_LOG").unwrap_or(defaults.log_filter),
        }
    }

    /// Set the ticket capacity.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the JSON data file.
    #[must_use]
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    /// Set the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// `true`/`false` in the usual spellings
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
