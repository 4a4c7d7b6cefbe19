//! Boards, lists and cards
//!
//! - **`db`** - Organization-scoped persistence and the board read interface
//! - **`ordering`** - Order assignment for freshly created lists and cards
//! - **`batch`** - Transactional batch order-update service
//! - **`handlers`** - HTTP handlers

pub mod db;
pub mod ordering;
pub mod batch;
pub mod handlers;

pub use batch::batch_update_order;
pub use ordering::{create_ordered_child, OrderParent};
