//! Backend Module
//!
//! This module contains all server-side code for Boardflow. It provides an
//! Axum HTTP server over an SQLite pool that stores boards, lists and cards
//! for many organizations.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`board`** - Board/list/card persistence, order assignment and the
//!   batch order-update service
//! - **`audit`** - Fire-and-forget audit log writer and readers
//! - **`middleware`** - Organization context extraction
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── board/          - Boards, lists, cards, ordering
//! ├── audit/          - Audit log
//! ├── middleware/     - Request context
//! └── error/          - Error types
//! ```
//!
//! # Ordering
//!
//! New lists and cards are appended with `MAX(order) + 1`
//! ([`board::ordering`]). Drag reorders arrive as a complete renumbering of
//! the touched siblings and are applied in one transaction
//! ([`board::batch`]). The server never re-derives orders itself.

/// Server initialization and state management
pub mod server;

/// HTTP route configuration
pub mod routes;

/// Boards, lists, cards and their ordering
pub mod board;

/// Audit log
pub mod audit;

/// Request middleware
pub mod middleware;

/// Backend error types
pub mod error;
