//! Admin authentication middleware and extractor for axum.
//!
//! - `admin_auth_middleware` - Validates Bearer tokens and injects the admin into extensions
//! - `RequireAdmin` - Extractor that requires an authenticated admin
//!
//! ```text
//! Request → admin_auth_middleware → injects AdminIdentity into extensions
//!                                          ↓
//!                                  Handler → RequireAdmin reads from extensions
//! ```
//!
//! The middleware only knows the `AdminSessionValidator` port, so tests can
//! swap the JWT adapter for anything else.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::admin::{AdminAuthError, AdminIdentity};
use crate::ports::AdminSessionValidator;

/// Auth middleware state - wraps the session validator.
pub type AdminAuthState = Arc<dyn AdminSessionValidator>;

/// Extracts the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
}

/// Validates Bearer tokens on admin routes.
///
/// 1. A valid token injects `AdminIdentity` into request extensions
/// 2. An invalid or expired token is rejected with 401
/// 3. A missing token passes through; `RequireAdmin` rejects it
pub async fn admin_auth_middleware(
    State(validator): State<AdminAuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()) else {
        return next.run(request).await;
    };

    match validator.validate(&token).await {
        Ok(admin) => {
            request.extensions_mut().insert(admin);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "Admin token rejected");
            AdminAuthRejection(e).into_response()
        }
    }
}

/// Extractor that requires an authenticated admin.
///
/// ```ignore
/// async fn my_handler(RequireAdmin(admin): RequireAdmin) -> impl IntoResponse {
///     format!("Hello, {}!", admin.email)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AdminIdentity);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminIdentity>()
            .cloned()
            .map(RequireAdmin)
            .ok_or(AdminAuthRejection(AdminAuthError::MissingToken))
    }
}

/// Rejection for admin authentication failures.
#[derive(Debug, Clone)]
pub struct AdminAuthRejection(pub AdminAuthError);

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AdminAuthError::Unavailable(msg) => {
                tracing::error!("Admin session validation unavailable: {}", msg);
                StatusCode::SERVICE_UNAVAILABLE
            }
            _ => StatusCode::UNAUTHORIZED,
        };

        (
            status,
            Json(json!({
                "success": false,
                "message": self.0.message(),
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{HeaderValue, Request};
    use axum::{middleware, routing::get, Router};
    use std::collections::HashMap;
    use tower::ServiceExt;

    struct StaticValidator {
        tokens: HashMap<String, AdminIdentity>,
    }

    #[async_trait]
    impl AdminSessionValidator for StaticValidator {
        async fn validate(&self, token: &str) -> Result<AdminIdentity, AdminAuthError> {
            self.tokens
                .get(token)
                .cloned()
                .ok_or(AdminAuthError::InvalidToken)
        }
    }

    fn app() -> Router {
        let mut tokens = HashMap::new();
        tokens.insert("good".to_string(), AdminIdentity::new("admin@peche.in"));
        let validator: AdminAuthState = Arc::new(StaticValidator { tokens });

        async fn whoami(RequireAdmin(admin): RequireAdmin) -> String {
            admin.email
        }

        Router::new()
            .route("/whoami", get(whoami))
            .layer(middleware::from_fn_with_state(validator, admin_auth_middleware))
    }

    fn request(auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/whoami");
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Token Extraction
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer my-token"));
        assert_eq!(bearer_token(&headers).as_deref(), Some("my-token"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Middleware + Extractor
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn valid_token_reaches_handler() {
        let response = app().oneshot(request(Some("Bearer good"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"admin@peche.in");
    }

    #[tokio::test]
    async fn missing_token_is_401() {
        let response = app().oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn invalid_token_is_401() {
        let response = app().oneshot(request(Some("Bearer forged"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid or expired token");
    }

    #[tokio::test]
    async fn require_admin_fails_without_identity() {
        let request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let result = RequireAdmin::from_request_parts(&mut parts, &()).await;

        assert!(matches!(
            result,
            Err(AdminAuthRejection(AdminAuthError::MissingToken))
        ));
    }

    #[test]
    fn unavailable_validator_is_503() {
        let response =
            AdminAuthRejection(AdminAuthError::unavailable("jwks down")).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn admin_auth_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AdminAuthState>();
    }
}
