//! Boardflow - Main Library
//!
//! Boardflow is a multi-tenant kanban board (boards → lists → cards) with
//! drag-and-drop reordering. Every move is reflected in the client at once
//! and reconciled against the server afterwards.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between client and server
//!   - Board, list and card records
//!   - Batch order-update wire types
//!   - Audit log records, configuration, error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server over an SQLite pool
//!   - Order assignment for new lists and cards
//!   - Transactional batch re-numbering
//!   - Audit logging of create/update/delete
//!
//! - **`client`** - Native client core
//!   - Optimistic board store with rollback
//!   - Drag interaction controller
//!   - HTTP transport to the backend
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - enables the `backend` module and the
//!   `boardflow-server` binary.
//!
//! # Ordering Model
//!
//! Creation appends (`MAX(order) + 1`), reordering renumbers the touched
//! sibling sets to `0..n`. The server trusts the client to send a complete
//! renumbering; see [`client::store`] for how it is derived.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

/// Client-side board state and drag handling
/// Only compiled for native targets (not WASM)
#[cfg(not(target_arch = "wasm32"))]
pub mod client;
