use crate::common::{Actor, ActorRole, MemberId};
use crate::domains::auth::JwtService;
use axum::{http::header::AUTHORIZATION, middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;

/// Authenticated actor information from JWT
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub member_id: MemberId,
    pub role: ActorRole,
}

impl AuthUser {
    pub fn actor(&self) -> Actor {
        Actor::new(self.member_id, self.role)
    }
}

/// Resolves the bearer token into an `AuthUser` request extension.
///
/// Requests without a verifiable token pass through anonymously; the
/// handlers decide whether that is `UNAUTHORIZED`.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_user = extract_auth_user(&request, &jwt_service);

    if let Some(user) = auth_user {
        debug!(member_id = %user.member_id, role = %user.role, "Resolved actor");
        request.extensions_mut().insert(user);
    } else {
        debug!("Anonymous request");
    }

    next.run(request).await
}

/// `Authorization: Bearer <jwt>`; a bare token is accepted too
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    let header = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ").unwrap_or(header);
    let claims = jwt_service.verify_token(token).ok()?;

    Some(AuthUser {
        member_id: claims.member_id(),
        role: claims.role,
    })
}
