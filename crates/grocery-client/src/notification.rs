use std::time::Duration;

use tokio::time::Instant;

/// How long an error notification stays up unless dismissed first.
pub const AUTO_HIDE: Duration = Duration::from_millis(6000);

/// A dismissible, time-limited message shown alongside a view.
#[derive(Debug, Clone)]
pub struct Notification {
    message: String,
    raised_at: Instant,
    auto_hide: Duration,
    dismissed: bool,
}

impl Notification {
    #[must_use]
    pub fn raise(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            raised_at: Instant::now(),
            auto_hide: AUTO_HIDE,
            dismissed: false,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.dismissed && self.raised_at.elapsed() < self.auto_hide
    }

    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }
}
