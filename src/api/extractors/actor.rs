use crate::domain::models::actor::{Actor, Role};
use crate::error::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use std::str::FromStr;
use tracing::Span;

/// Extracts the verified caller identity from the gateway headers
/// `X-User-Id` and `X-User-Role`. Authentication happens upstream; by the
/// time a request reaches this service the identity is already checked,
/// and it is carried explicitly on every request rather than through any
/// shared client state.
pub struct AuthActor(pub Actor);

impl<S> FromRequestParts<S> for AuthActor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get("X-User-Id")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or(AppError::Unauthorized)?
            .to_string();

        let role = parts
            .headers
            .get("X-User-Role")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Role::from_str(v).ok())
            .ok_or(AppError::Unauthorized)?;

        let actor = Actor { id, role };

        Span::current().record("user_id", actor.id.as_str());

        Ok(AuthActor(actor))
    }
}
