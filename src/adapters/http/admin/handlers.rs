//! HTTP handlers for the admin dashboard API.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::adapters::http::middleware::RequireAdmin;
use crate::application::handlers::admin::{
    GetPaymentStatsHandler, GetPaymentStatsQuery, ListPaymentsHandler, ListPaymentsQuery,
    OtpSettings, RequestOtpHandler, VerifyOtpHandler,
};
use crate::domain::admin::{AdminAccessPolicy, AdminAuthError};
use crate::domain::foundation::DomainError;
use crate::ports::{
    AdminSessionValidator, AdminTokenIssuer, OtpSender, OtpStore, PaymentRepository,
};

use super::dto::{
    LoginRequest, LoginResponse, PaymentStatsView, PaymentView, PaymentsResponse, StatsResponse,
    TokenResponse, VerifyOtpRequest,
};

pub const OTP_SENT_MESSAGE: &str = "OTP sent to your email";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Application state for admin routes.
#[derive(Clone)]
pub struct AdminAppState {
    pub policy: AdminAccessPolicy,
    pub otp_store: Arc<dyn OtpStore>,
    pub otp_sender: Arc<dyn OtpSender>,
    pub otp_settings: OtpSettings,
    pub token_issuer: Arc<dyn AdminTokenIssuer>,
    pub session_validator: Arc<dyn AdminSessionValidator>,
    pub payments: Arc<dyn PaymentRepository>,
}

impl AdminAppState {
    pub fn request_otp_handler(&self) -> RequestOtpHandler {
        RequestOtpHandler::new(
            self.policy.clone(),
            self.otp_store.clone(),
            self.otp_sender.clone(),
            self.otp_settings,
        )
    }

    pub fn verify_otp_handler(&self) -> VerifyOtpHandler {
        VerifyOtpHandler::new(self.otp_store.clone(), self.token_issuer.clone())
    }

    pub fn list_payments_handler(&self) -> ListPaymentsHandler {
        ListPaymentsHandler::new(self.payments.clone())
    }

    pub fn stats_handler(&self) -> GetPaymentStatsHandler {
        GetPaymentStatsHandler::new(self.payments.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Login (public)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /admin/login - Check credentials and email a one-time code
pub async fn login(
    State(state): State<AdminAppState>,
    payload: Option<Json<LoginRequest>>,
) -> Result<impl IntoResponse, AdminApiError> {
    let request = payload.map(|Json(r)| r).unwrap_or_default();
    let handler = state.request_otp_handler();

    handler.handle(request.into_command()).await?;

    Ok(Json(LoginResponse {
        success: true,
        message: OTP_SENT_MESSAGE.to_string(),
    }))
}

/// POST /admin/verify-otp - Exchange a one-time code for a bearer token
pub async fn verify_otp(
    State(state): State<AdminAppState>,
    payload: Option<Json<VerifyOtpRequest>>,
) -> Result<impl IntoResponse, AdminApiError> {
    let request = payload.map(|Json(r)| r).unwrap_or_default();
    let handler = state.verify_otp_handler();

    let result = handler.handle(request.into_command()).await?;

    Ok(Json(TokenResponse {
        success: true,
        token: result.token,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Dashboard (bearer token required)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /admin/payments - All payment records, newest first
pub async fn list_payments(
    State(state): State<AdminAppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<impl IntoResponse, AdminApiError> {
    let handler = state.list_payments_handler();

    let records = handler.handle(ListPaymentsQuery).await?;
    tracing::debug!(admin = %admin.email, count = records.len(), "Listed payments");

    Ok(Json(PaymentsResponse {
        success: true,
        payments: records.into_iter().map(PaymentView::from).collect(),
    }))
}

/// GET /admin/stats - Dashboard summary figures
pub async fn payment_stats(
    State(state): State<AdminAppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<impl IntoResponse, AdminApiError> {
    let handler = state.stats_handler();

    let stats = handler.handle(GetPaymentStatsQuery).await?;

    Ok(Json(StatsResponse {
        success: true,
        stats: PaymentStatsView::from(stats),
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper for admin endpoints.
#[derive(Debug)]
pub struct AdminApiError(AdminAuthError);

impl From<AdminAuthError> for AdminApiError {
    fn from(err: AdminAuthError) -> Self {
        Self(err)
    }
}

impl From<DomainError> for AdminApiError {
    fn from(err: DomainError) -> Self {
        Self(AdminAuthError::unavailable(err.to_string()))
    }
}

impl IntoResponse for AdminApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            AdminAuthError::MissingCredentials => StatusCode::BAD_REQUEST,
            AdminAuthError::DeliveryFailed(_) | AdminAuthError::Unavailable(_) => {
                tracing::error!(error = %self.0, "Admin request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::UNAUTHORIZED,
        };

        let body = json!({
            "success": false,
            "message": self.0.message(),
        });
        (status, Json(body)).into_response()
    }
}
