//! peche-checkout server binary.
//!
//! Loads configuration from `PECHE__*` environment variables (and `.env`),
//! wires adapters to ports, and serves the checkout and admin APIs.

use std::process::ExitCode;
use std::sync::Arc;

use secrecy::ExposeSecret;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use peche_checkout::adapters::auth::JwtAdminSessions;
use peche_checkout::adapters::email::{LogOtpSender, ResendConfig, ResendOtpSender};
use peche_checkout::adapters::http::{app_router, AdminAppState, CheckoutAppState};
use peche_checkout::adapters::postgres::PostgresPaymentRepository;
use peche_checkout::adapters::razorpay::{RazorpayConfig, RazorpayPaymentAdapter};
use peche_checkout::adapters::storage::{InMemoryOtpStore, InMemoryPaymentRepository};
use peche_checkout::application::handlers::admin::OtpSettings;
use peche_checkout::config::{AppConfig, ConfigError, DatabaseConfig, ServerConfig, ValidationError};
use peche_checkout::domain::admin::AdminAccessPolicy;
use peche_checkout::domain::payment::SignatureVerifier;
use peche_checkout::ports::{OtpSender, PaymentGateway, PaymentRepository};

/// Failures that stop the server from starting or keep it from serving.
#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "peche-checkout stopped");
            eprintln!("peche-checkout: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        razorpay_test_mode = config.payment.is_test_mode(),
        "Starting peche-checkout"
    );

    // Ports
    let gateway: Arc<dyn PaymentGateway> = Arc::new(RazorpayPaymentAdapter::new(
        RazorpayConfig::new(
            config.payment.razorpay_key_id.as_str(),
            config.payment.razorpay_key_secret.expose_secret().as_str(),
        )
        .with_base_url(config.payment.api_base_url.as_str()),
    ));
    let payments = payment_repository(config.database.as_ref(), &config.server).await?;
    let sessions = Arc::new(JwtAdminSessions::new(
        config.admin.jwt_secret.expose_secret(),
        config.admin.token_ttl_secs,
    ));

    // HTTP state
    let checkout = CheckoutAppState::new(
        gateway,
        payments.clone(),
        SignatureVerifier::new(config.payment.razorpay_key_secret.expose_secret().as_str()),
        config.payment.currency.as_str(),
    );
    let admin = AdminAppState {
        policy: AdminAccessPolicy::new(
            config.admin.allowed_emails_list(),
            config.admin.password.expose_secret().as_str(),
        ),
        otp_store: Arc::new(InMemoryOtpStore::new()),
        otp_sender: otp_sender(&config),
        otp_settings: OtpSettings {
            ttl_secs: config.admin.otp_ttl_secs,
            max_attempts: config.admin.otp_max_attempts,
        },
        token_issuer: sessions.clone(),
        session_validator: sessions,
        payments,
    };

    let app = app_router(checkout, admin, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "peche-checkout listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("peche-checkout stopped");
    Ok(())
}

/// JSON logs in production, human-readable logs elsewhere.
///
/// `RUST_LOG` overrides `server.log_level` when set.
fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Postgres when a database is configured, otherwise process memory.
async fn payment_repository(
    database: Option<&DatabaseConfig>,
    server: &ServerConfig,
) -> Result<Arc<dyn PaymentRepository>, StartupError> {
    let Some(db) = database else {
        if server.is_production() {
            warn!("No database configured; payment records will not survive a restart");
        } else {
            info!("No database configured, keeping payment records in memory");
        }
        return Ok(Arc::new(InMemoryPaymentRepository::new()));
    };

    info!(url = %db.redacted_url(), "Connecting to Postgres");
    let pool = db.pool_options().connect(&db.url).await?;

    if db.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Database migrations applied");
    }

    Ok(Arc::new(PostgresPaymentRepository::new(pool)))
}

/// Resend when configured; the log sender is only reachable outside
/// production because validation rejects a missing email section there.
fn otp_sender(config: &AppConfig) -> Arc<dyn OtpSender> {
    match &config.email {
        Some(email) => Arc::new(ResendOtpSender::new(
            ResendConfig::new(
                email.resend_api_key.expose_secret().as_str(),
                email.from_header(),
            )
            .with_ttl_secs(config.admin.otp_ttl_secs),
        )),
        None => {
            warn!("No email provider configured, admin login codes will be logged");
            Arc::new(LogOtpSender::new())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutdown signal received");
}
