//! Transient user-visible notices
//!
//! The store pushes a notice whenever it rolls a move back. The view drains
//! them once and shows each briefly; nothing blocks on them. Notices the
//! view never drained expire with `BoardSession::maintain`.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Oldest notices are dropped beyond this many
pub const MAX_NOTICES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: Uuid,
    pub level: NoticeLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }
}

#[derive(Debug, Default)]
pub struct NoticeBoard {
    notices: RwLock<VecDeque<Notice>>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push(&self, notice: Notice) {
        let mut notices = self.notices.write().await;
        if notices.len() == MAX_NOTICES {
            notices.pop_front();
        }
        notices.push_back(notice);
    }

    /// Take every pending notice, oldest first
    pub async fn drain(&self) -> Vec<Notice> {
        self.notices.write().await.drain(..).collect()
    }

    /// Drop notices older than `ttl`
    pub async fn expire(&self, ttl: Duration) {
        let cutoff = Utc::now() - ttl;
        self.notices.write().await.retain(|n| n.created_at > cutoff);
    }
}
