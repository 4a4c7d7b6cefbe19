//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - Board, list, card and audit endpoints
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use boardflow::backend::routes::create_router;
//! use boardflow::backend::server::AppState;
//!
//! let router = create_router(AppState::new(None));
//! ```

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
