/**
 * Organization Context
 *
 * Authentication happens upstream of this server. By the time a request
 * reaches a handler, the auth layer has validated the session and stamped
 * the caller's identity into two headers:
 *
 * - `x-user-id` - the acting user
 * - `x-org-id`  - the organization whose boards the user may touch
 *
 * `OrgContext` extracts those headers. Every query is scoped by `org_id`,
 * so a board of another organization behaves exactly like a missing one.
 */

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use crate::backend::error::BackendError;

/// Header carrying the acting user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the organization id
pub const ORG_ID_HEADER: &str = "x-org-id";

/// Validated caller identity
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrgContext {
    pub user_id: String,
    pub org_id: String,
}

impl OrgContext {
    /// Read the identity headers
    ///
    /// Returns `Unauthorized` when either header is absent, not UTF-8 or blank.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, BackendError> {
        let user_id = header_value(headers, USER_ID_HEADER)?;
        let org_id = header_value(headers, ORG_ID_HEADER)?;
        Ok(Self { user_id, org_id })
    }
}

fn header_value(headers: &HeaderMap, name: &'static str) -> Result<String, BackendError> {
    let value = headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            tracing::warn!("Missing or invalid {} header", name);
            BackendError::unauthorized(format!("missing {} header", name))
        })?;
    Ok(value.to_string())
}

impl<S> FromRequestParts<S> for OrgContext
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers)
    }
}
