//! HTTP DTOs for the admin dashboard API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::handlers::admin::{RequestOtpCommand, VerifyOtpCommand};
use crate::domain::payment::{minor_to_major, PaymentRecord, PaymentStats};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Password step of the admin login.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn into_command(self) -> RequestOtpCommand {
        RequestOtpCommand {
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        }
    }
}

/// Code step of the admin login.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub otp: Option<String>,
}

impl VerifyOtpRequest {
    pub fn into_command(self) -> VerifyOtpCommand {
        VerifyOtpCommand {
            email: self.email.unwrap_or_default(),
            otp: self.otp.unwrap_or_default(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub success: bool,
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentsResponse {
    pub success: bool,
    pub payments: Vec<PaymentView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: PaymentStatsView,
}

/// One row of the dashboard payments table.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentView {
    pub id: String,
    pub payment_id: Option<String>,
    pub order_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub product_name: Option<String>,
    /// Major units, as a JSON number.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    pub currency: String,
    pub payment_method: Option<String>,
    pub status: String,
    pub error_code: Option<String>,
    pub error_description: Option<String>,
    pub payment_date: String,
    pub created_at: String,
}

impl From<PaymentRecord> for PaymentView {
    fn from(record: PaymentRecord) -> Self {
        Self {
            id: record.id.to_string(),
            payment_id: record.payment_id,
            order_id: record.order_id,
            name: record.buyer.name,
            email: record.buyer.email,
            phone: record.buyer.phone,
            product_name: record.product_name,
            amount: record.amount_minor.map(minor_to_major),
            currency: record.currency,
            payment_method: record.payment_method,
            status: record.status.as_str().to_string(),
            error_code: record.error_code,
            error_description: record.error_description,
            payment_date: record.payment_date.to_rfc3339(),
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

/// Dashboard summary cards. Money and percentages are two-decimal strings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatsView {
    pub total_payments: usize,
    pub total_revenue: String,
    pub successful_payments: usize,
    pub success_rate: String,
    pub failed_payments: usize,
    pub pending_payments: usize,
}

impl From<PaymentStats> for PaymentStatsView {
    fn from(stats: PaymentStats) -> Self {
        Self {
            total_payments: stats.total_payments,
            total_revenue: stats.formatted_revenue(),
            successful_payments: stats.successful_payments,
            success_rate: stats.formatted_success_rate(),
            failed_payments: stats.failed_payments,
            pending_payments: stats.pending_payments,
        }
    }
}
