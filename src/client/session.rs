//! Board session
//!
//! One open board: the optimistic store plus the drag controller feeding
//! it. Sessions are not shared between boards.

use std::sync::Arc;

use chrono::Duration;

use crate::client::api::BoardBackend;
use crate::client::drag::DragController;
use crate::client::error::ClientError;
use crate::client::notice::Notice;
use crate::client::store::{BoardSnapshot, BoardStore};
use crate::shared::BoardId;

/// Notices older than this are dropped by [`BoardSession::maintain`]
pub const NOTICE_TTL_SECS: i64 = 8;

#[derive(Debug)]
pub struct BoardSession {
    store: Arc<BoardStore>,
    drag: DragController,
}

impl BoardSession {
    /// Fetch the board and wire a store to a drag controller
    pub async fn open(backend: Arc<dyn BoardBackend>, board_id: BoardId) -> Result<Self, ClientError> {
        let store = Arc::new(BoardStore::load(backend, board_id).await?);
        let drag = DragController::new(store.clone());
        tracing::info!("Opened board {}", board_id);
        Ok(Self { store, drag })
    }

    pub fn store(&self) -> &Arc<BoardStore> {
        &self.store
    }

    pub fn drag(&mut self) -> &mut DragController {
        &mut self.drag
    }

    pub async fn snapshot(&self) -> BoardSnapshot {
        self.store.snapshot().await
    }

    pub async fn drain_notices(&self) -> Vec<Notice> {
        self.store.drain_notices().await
    }

    /// Discard local state in favour of a fresh server read
    pub async fn refresh(&self) -> Result<(), ClientError> {
        self.store.reload_authoritative().await
    }

    /// Periodic housekeeping for the view
    ///
    /// Drops notices nobody drained in time and retries the reload a
    /// failed rollback left pending.
    pub async fn maintain(&self) -> Result<(), ClientError> {
        self.store.notices().expire(Duration::seconds(NOTICE_TTL_SECS)).await;
        if self.store.needs_reload().await {
            tracing::info!("Retrying reload of board {}", self.store.board_id());
            self.store.reload_authoritative().await?;
        }
        Ok(())
    }
}
