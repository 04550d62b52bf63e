//! PostgreSQL implementation of PaymentRepository.
//!
//! Duplicates are absorbed with `ON CONFLICT DO NOTHING` by two partial
//! unique indexes: `payments_payment_id_key` for gateway payments and
//! `payments_abandoned_order_key` for records without a payment id.

use crate::domain::foundation::{DomainError, ErrorCode, PaymentRecordId, Timestamp};
use crate::domain::payment::{BuyerDetails, PaymentRecord, PaymentStatus};
use crate::ports::{PaymentRepository, SaveResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the PaymentRepository port.
pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    /// Creates a new PostgresPaymentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = r#"
    id, payment_id, order_id, name, email, phone, product_name, amount_minor,
    currency, payment_method, status, error_code, error_description,
    payment_date, created_at, updated_at
"#;

/// Database row representation of a payment record.
#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    payment_id: Option<String>,
    order_id: String,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    product_name: Option<String>,
    amount_minor: Option<i64>,
    currency: String,
    payment_method: Option<String>,
    status: String,
    error_code: Option<String>,
    error_description: Option<String>,
    payment_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for PaymentRecord {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let status = PaymentStatus::parse(&row.status).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid status value: {}", row.status),
            )
        })?;

        Ok(PaymentRecord {
            id: PaymentRecordId::from_uuid(row.id),
            payment_id: row.payment_id,
            order_id: row.order_id,
            buyer: BuyerDetails {
                name: row.name,
                email: row.email,
                phone: row.phone,
            },
            product_name: row.product_name,
            amount_minor: row.amount_minor,
            currency: row.currency,
            payment_method: row.payment_method,
            status,
            error_code: row.error_code,
            error_description: row.error_description,
            payment_date: Timestamp::from_datetime(row.payment_date),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn database_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn insert_if_absent(&self, record: PaymentRecord) -> Result<SaveResult, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO payments (
                id, payment_id, order_id, name, email, phone, product_name, amount_minor,
                currency, payment_method, status, error_code, error_description,
                payment_date, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(&record.payment_id)
        .bind(&record.order_id)
        .bind(&record.buyer.name)
        .bind(&record.buyer.email)
        .bind(&record.buyer.phone)
        .bind(&record.product_name)
        .bind(record.amount_minor)
        .bind(&record.currency)
        .bind(&record.payment_method)
        .bind(record.status.as_str())
        .bind(&record.error_code)
        .bind(&record.error_description)
        .bind(record.payment_date.as_datetime())
        .bind(record.created_at.as_datetime())
        .bind(record.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("save payment", e))?;

        if result.rows_affected() == 0 {
            Ok(SaveResult::AlreadyExists)
        } else {
            Ok(SaveResult::Inserted)
        }
    }

    async fn update(&self, record: &PaymentRecord) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE payments SET
                name = $2,
                email = $3,
                phone = $4,
                product_name = $5,
                amount_minor = $6,
                payment_method = $7,
                status = $8,
                error_code = $9,
                error_description = $10,
                updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(&record.buyer.name)
        .bind(&record.buyer.email)
        .bind(&record.buyer.phone)
        .bind(&record.product_name)
        .bind(record.amount_minor)
        .bind(&record.payment_method)
        .bind(record.status.as_str())
        .bind(&record.error_code)
        .bind(&record.error_description)
        .bind(record.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("update payment", e))?;

        if result.rows_affected() == 0 {
            return Err(
                DomainError::new(ErrorCode::PaymentNotFound, "Payment record not found")
                    .with_detail("record_id", record.id.to_string()),
            );
        }

        Ok(())
    }

    async fn find_by_payment_id(
        &self,
        payment_id: &str,
    ) -> Result<Option<PaymentRecord>, DomainError> {
        let sql = format!("SELECT {} FROM payments WHERE payment_id = $1", SELECT_COLUMNS);
        let row: Option<PaymentRow> = sqlx::query_as(&sql)
            .bind(payment_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("find payment", e))?;

        row.map(PaymentRecord::try_from).transpose()
    }

    async fn list_recent(&self) -> Result<Vec<PaymentRecord>, DomainError> {
        let sql = format!(
            "SELECT {} FROM payments ORDER BY created_at DESC, id DESC",
            SELECT_COLUMNS
        );
        let rows: Vec<PaymentRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("list payments", e))?;

        rows.into_iter().map(PaymentRecord::try_from).collect()
    }
}
