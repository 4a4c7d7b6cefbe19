//! Middleware Module
//!
//! Request processing that runs before handlers.
//!
//! - **`auth`** - Extraction of the upstream-validated organization context

pub mod auth;

pub use auth::{OrgContext, ORG_ID_HEADER, USER_ID_HEADER};
