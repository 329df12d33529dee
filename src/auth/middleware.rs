use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::token::verify_session_token;
use crate::error::AppError;
use crate::AppState;

/// Identity attached to a request after token verification. `id` is the
/// provider's opaque subject; nothing else about the user is known here.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers()).ok_or(AppError::Unauthorized)?;
    let token_data = verify_session_token(token, &state.config)?;

    let auth_user = AuthUser {
        id: token_data.claims.sub,
    };

    req.extensions_mut().insert(auth_user);
    Ok(next.run(req).await)
}

/// Best-effort identity for routes that also serve anonymous visitors. A
/// missing or unverifiable token degrades to `None` instead of a 401.
pub async fn resolve_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let identity: Option<AuthUser> = bearer_token(req.headers())
        .and_then(|token| verify_session_token(token, &state.config).ok())
        .map(|data| AuthUser {
            id: data.claims.sub,
        });

    if identity.is_none() && req.headers().contains_key(AUTHORIZATION) {
        tracing::debug!("Ignoring unverifiable session token");
    }

    req.extensions_mut().insert(identity);
    next.run(req).await
}
