//! The acting user of a request.
//!
//! Authentication happens upstream; the gateway forwards the authenticated
//! user id in `X-User-Id`. Services receive the context explicitly, there is
//! no ambient "current user".

use crate::error::{authentication_error, TutorlinkError};
use crate::models::UserId;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tracing::debug;

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionContext {
    user_id: Option<UserId>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    /// The signed-in user, if any.
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none()
    }

    /// Reads the context from a raw header value. `None` means no header.
    pub fn from_header_value(value: Option<&str>) -> Result<Self, TutorlinkError> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::anonymous()),
            Some(raw) => raw
                .parse::<i64>()
                .map(|id| Self::for_user(UserId(id)))
                .map_err(|_| {
                    authentication_error(format!("invalid {} header: {}", USER_ID_HEADER, raw))
                }),
        }
    }
}

impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = TutorlinkError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = match parts.headers.get(USER_ID_HEADER) {
            Some(header) => Some(header.to_str().map_err(|_| {
                authentication_error(format!("{} header is not valid text", USER_ID_HEADER))
            })?),
            None => None,
        };
        let session = Self::from_header_value(value)?;
        debug!("Session resolved: {:?}", session.user_id);
        Ok(session)
    }
}
