//! Top-level router: checkout and admin routes behind the shared layers.

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::admin::{admin_router, AdminAppState};
use super::checkout::{checkout_routes, CheckoutAppState};

/// Build the complete application router.
///
/// Layers, outermost first: request tracing, CORS, request timeout.
pub fn app_router(checkout: CheckoutAppState, admin: AdminAppState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(checkout_routes().with_state(checkout))
        .merge(admin_router(admin))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
}

/// Any origin when none are configured, otherwise only the listed ones.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::auth::JwtAdminSessions;
    use crate::adapters::email::MockOtpSender;
    use crate::adapters::razorpay::MockPaymentGateway;
    use crate::adapters::storage::{InMemoryOtpStore, InMemoryPaymentRepository};
    use crate::application::handlers::admin::OtpSettings;
    use crate::domain::admin::AdminAccessPolicy;
    use crate::domain::payment::SignatureVerifier;

    fn app(server: &ServerConfig) -> Router {
        let repository = Arc::new(InMemoryPaymentRepository::new());
        let sessions = Arc::new(JwtAdminSessions::new("router-test-secret", 60));
        let checkout = CheckoutAppState::new(
            Arc::new(MockPaymentGateway::new()),
            repository.clone(),
            SignatureVerifier::new("secret"),
            "INR",
        );
        let admin = AdminAppState {
            policy: AdminAccessPolicy::new(["admin@peche.in"], "pw"),
            otp_store: Arc::new(InMemoryOtpStore::new()),
            otp_sender: Arc::new(MockOtpSender::new()),
            otp_settings: OtpSettings::default(),
            token_issuer: sessions.clone(),
            session_validator: sessions,
            payments: repository,
        };
        app_router(checkout, admin, server)
    }

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/create-order")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn serves_checkout_and_admin_routes() {
        let app = app(&ServerConfig::default());

        let health = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(health.status(), StatusCode::OK);

        let stats = app
            .oneshot(
                Request::builder()
                    .uri("/admin/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(stats.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let response = app(&ServerConfig::default())
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_allows_any_origin_by_default() {
        let response = app(&ServerConfig::default())
            .oneshot(preflight("https://shop.example"))
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn cors_restricts_to_configured_origins() {
        let server = ServerConfig {
            cors_origins: Some("https://peche.in".to_string()),
            ..Default::default()
        };

        let allowed = app(&server).oneshot(preflight("https://peche.in")).await.unwrap();
        assert_eq!(
            allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://peche.in"
        );

        let denied = app(&server).oneshot(preflight("https://evil.example")).await.unwrap();
        assert!(denied.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
