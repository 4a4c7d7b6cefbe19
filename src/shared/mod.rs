//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the client and the backend. All types are designed for serialization
//! and transmission over the JSON API.

/// Board, list and card records
pub mod board;

/// Batch order-update wire types
pub mod order;

/// Audit log records
pub mod audit;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use board::{Board, BoardId, Card, CardId, List, ListId, ListWithCards};
pub use order::{BatchOrderItem, BatchOrderRequest, BatchOrderResponse, EntityKind};
pub use audit::{AuditAction, AuditEntity, AuditLog};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
