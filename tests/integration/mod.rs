//! Integration tests
//!
//! - **`api_test`** - HTTP routes through the full router
//! - **`store_test`** - Optimistic store against a real database
//! - **`http_backend_test`** - The reqwest transport against a live server

#[cfg(feature = "ssr")]
mod api_test;
#[cfg(feature = "ssr")]
mod store_test;
