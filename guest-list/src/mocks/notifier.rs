//! Recording notifier for testing.

use crate::providers::Notifier;
use crate::types::{Notice, NoticeLevel};
use std::sync::{Arc, Mutex, MutexGuard};

/// Notifier that keeps every notice for later assertions. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Notice>> {
        self.notices
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// All notices, oldest first.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.lock().clone()
    }

    /// `(level, message)` pairs, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<(NoticeLevel, String)> {
        self.lock()
            .iter()
            .map(|notice| (notice.level, notice.message.clone()))
            .collect()
    }

    /// Number of notices at `level`.
    #[must_use]
    pub fn count(&self, level: NoticeLevel) -> usize {
        self.lock().iter().filter(|n| n.level == level).count()
    }

    /// Most recent notice.
    #[must_use]
    pub fn last(&self) -> Option<Notice> {
        self.lock().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.lock().push(notice);
    }
}
