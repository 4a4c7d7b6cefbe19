//! Client Module
//!
//! The board view's side of reordering: an optimistic store per open
//! board, the drag controller that feeds it, and the HTTP transport.
//!
//! - **`config`** - Server URL and identity headers
//! - **`api`** - `BoardBackend` trait and its `reqwest` implementation
//! - **`store`** - Snapshots, move planning and the two-phase store
//! - **`drag`** - Gesture metadata and move classification
//! - **`notice`** - Transient notices raised by rollbacks
//! - **`session`** - Store and controller wired for one board

pub mod api;
pub mod config;
pub mod drag;
pub mod error;
pub mod notice;
pub mod session;
pub mod store;

pub use api::{BoardBackend, HttpBoardBackend};
pub use config::Config;
pub use drag::{DragController, DragPayload, DropCandidate, DropTarget};
pub use error::ClientError;
pub use notice::{Notice, NoticeLevel};
pub use session::BoardSession;
pub use store::{
    BoardSnapshot, BoardStore, CardMove, Dispatch, ListMove, MoveCommand, MoveOutcome, MovePhase, PendingMove,
};
