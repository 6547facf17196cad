use crate::error::PollError;
use chrono::{DateTime, Duration, Utc};
#[cfg(feature = "serde")]
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "lowercase"))]
pub enum Level {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Notification {
    pub message: String,
    pub level: Level,
    pub expires_at: DateTime<Utc>,
}

/// Toasts waiting to be shown, oldest first. The caller supplies the clock,
/// so rendering is a pure function of `(queue, now)`.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    items: VecDeque<Notification>,
    lifetime: Duration,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        NotificationQueue::new(Duration::seconds(3))
    }
}

impl NotificationQueue {
    pub fn new(lifetime: Duration) -> NotificationQueue {
        NotificationQueue {
            items: VecDeque::new(),
            lifetime,
        }
    }

    pub fn push(&mut self, message: &str, level: Level, now: DateTime<Utc>) {
        self.items.push_back(Notification {
            message: message.to_string(),
            level,
            expires_at: now + self.lifetime,
        });
    }

    pub fn push_error(&mut self, error: &PollError, now: DateTime<Utc>) {
        self.push(&error.user_message(), Level::Error, now);
    }

    /// Drops every notification that has expired by `now` and returns how
    /// many went.
    pub fn prune(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.expires_at > now);
        before - self.items.len()
    }

    /// Notifications still live at `now`, oldest first.
    pub fn active(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Notification> {
        self.items.iter().filter(move |item| item.expires_at > now)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
