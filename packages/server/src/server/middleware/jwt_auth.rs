use crate::server::auth::{CallerId, IdentityVerifier};
use crate::server::error::ApiError;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Authenticated caller information from the bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub caller_id: CallerId,
}

/// JWT authentication middleware
///
/// Extracts the token from the Authorization header, verifies it, and adds AuthUser to request extensions.
/// If no token or invalid token, request continues without AuthUser; protected handlers reject it.
pub async fn jwt_auth_middleware(
    verifier: Arc<dyn IdentityVerifier>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_user = extract_auth_user(&request, verifier.as_ref()).await;

    if let Some(user) = auth_user {
        debug!("Authenticated caller: {}", user.caller_id);
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Extract and verify the bearer token from request
///
/// The header is read before the returned future is created so the future does not
/// borrow the (non-`Sync`) request body and stays `Send`.
fn extract_auth_user<'a>(
    request: &axum::http::Request<axum::body::Body>,
    verifier: &'a dyn IdentityVerifier,
) -> impl std::future::Future<Output = Option<AuthUser>> + Send + 'a {
    // Get Authorization header
    let auth_str = request
        .headers()
        .get("authorization")
        .and_then(|auth_header| auth_header.to_str().ok())
        .map(str::to_owned);

    async move {
        let auth_str = auth_str?;

        // Extract token (handle both "Bearer <token>" and raw token)
        let token = auth_str.strip_prefix("Bearer ").unwrap_or(&auth_str);

        match verifier.verify(token).await {
            Ok(caller_id) => Some(AuthUser { caller_id }),
            Err(e) => {
                debug!(error = %e, "Token verification failed");
                None
            }
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| {
                ApiError::Unauthorized("Invalid or expired authentication credentials.".to_string())
            })
    }
}
