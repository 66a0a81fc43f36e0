//! Authentication middleware and extractors for axum.
//!
//! ```text
//! Request → auth_middleware → validates Bearer token, injects Actor into extensions
//!                                      ↓
//!                              Handler → RequireAuth / RequireAdmin read the Actor
//! ```
//!
//! The middleware only depends on the `SessionValidator` port, so tests can
//! swap in a validator that doesn't sign anything.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{Actor, AuthError};
use crate::ports::SessionValidator;

use super::super::error::ErrorResponse;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Validates a Bearer token when one is present.
///
/// - No token: the request continues anonymously; extractors decide.
/// - Valid token: the `Actor` is inserted into the request extensions.
/// - Invalid or expired token: `401` straight away.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(&request) else {
        return next.run(request).await;
    };

    match validator.validate(token).await {
        Ok(actor) => {
            request.extensions_mut().insert(actor);
            next.run(request).await
        }
        Err(e) => {
            let (status, message) = match &e {
                AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
                AuthError::ServiceUnavailable(msg) => {
                    tracing::error!("Auth service unavailable: {}", msg);
                    (StatusCode::SERVICE_UNAVAILABLE, "Authentication service unavailable")
                }
                _ => (StatusCode::UNAUTHORIZED, "Invalid token"),
            };
            tracing::debug!(error = %e, "Rejected bearer token");
            (status, Json(ErrorResponse::new("UNAUTHORIZED", message))).into_response()
        }
    }
}

/// Extractor that requires an authenticated actor of any role.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub Actor);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Actor>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Extractor that requires an administrator.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Actor);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(actor) = RequireAuth::from_request_parts(parts, state).await?;
        if !actor.is_admin() {
            tracing::warn!(user_id = %actor.user_id, path = %parts.uri.path(), "Admin route denied");
            return Err(AuthRejection::AdminOnly);
        }
        Ok(RequireAdmin(actor))
    }
}

/// Extractor for routes that behave differently when logged in.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<Actor>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<Actor>().cloned()))
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// No valid authentication token was provided.
    Unauthenticated,
    /// Authenticated, but the route is for administrators.
    AdminOnly,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("UNAUTHORIZED", "Please log in to access this page."),
            ),
            AuthRejection::AdminOnly => (
                StatusCode::FORBIDDEN,
                ErrorResponse::new("FORBIDDEN", "Access denied. Admins only."),
            ),
        };
        (status, Json(body)).into_response()
    }
}
