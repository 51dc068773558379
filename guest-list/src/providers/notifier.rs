//! Notification surface.

use crate::types::{Notice, NoticeLevel};

/// Sink for user-visible notices.
///
/// Presentation (toasts, console lines, log records) is up to the
/// implementation; the guest list only decides category and wording.
pub trait Notifier: Send + Sync {
    /// Deliver a notice. Must not block.
    fn notify(&self, notice: Notice);
}

/// Notifier that writes notices to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success | NoticeLevel::Info => {
                tracing::info!(level = %notice.level, at = %notice.at, "{}", notice.message);
            },
            NoticeLevel::Error => {
                tracing::warn!(level = %notice.level, at = %notice.at, "{}", notice.message);
            },
        }
    }
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}
