//! Axum router configuration for admin endpoints.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::adapters::http::middleware::{admin_auth_middleware, AdminAuthState};

use super::handlers::{list_payments, login, payment_stats, verify_otp, AdminAppState};

/// Create the admin API router.
///
/// # Routes
///
/// ## Login (public)
/// - `POST /login` - Check email and password, email a one-time code
/// - `POST /verify-otp` - Exchange the code for a bearer token
///
/// ## Dashboard (bearer token)
/// - `GET /payments` - Payment records, newest first
/// - `GET /stats` - Summary figures
pub fn admin_routes(validator: AdminAuthState) -> Router<AdminAppState> {
    let dashboard = Router::new()
        .route("/payments", get(list_payments))
        .route("/stats", get(payment_stats))
        .route_layer(middleware::from_fn_with_state(
            validator,
            admin_auth_middleware,
        ));

    Router::new()
        .route("/login", post(login))
        .route("/verify-otp", post(verify_otp))
        .merge(dashboard)
}

/// Admin routes mounted at `/admin` with their state applied.
pub fn admin_router(state: AdminAppState) -> Router {
    Router::new()
        .nest("/admin", admin_routes(state.session_validator.clone()))
        .with_state(state)
}
