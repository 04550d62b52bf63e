//! Typed settings read from `PECHE__*` environment variables.
//!
//! Nested keys use `__`, so `PECHE__SERVER__PORT=8081` sets `server.port`.
//! A `.env` file in the working directory is read first when present.
//!
//! ```no_run
//! use peche_checkout::config::AppConfig;
//!
//! let config = AppConfig::load().expect("configuration");
//! config.validate().expect("valid configuration");
//! ```

mod admin;
mod database;
mod email;
mod error;
mod payment;
mod server;

pub use admin::AdminConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Razorpay credentials and checkout currency.
    pub payment: PaymentConfig,

    /// Absent means payment records live in process memory.
    pub database: Option<DatabaseConfig>,

    pub admin: AdminConfig,

    /// Absent means login codes are written to the log.
    pub email: Option<EmailConfig>,
}

impl AppConfig {
    /// Reads `.env` (if any) and the process environment.
    ///
    /// Fails when a required key such as `PECHE__PAYMENT__RAZORPAY_KEY_ID`
    /// is missing or a value does not parse. Semantic checks live in
    /// [`AppConfig::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let settings = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PECHE")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.payment.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.admin.validate(&self.server.environment)?;

        match &self.email {
            Some(email) => email.validate(),
            None if self.is_production() => Err(ValidationError::EmailRequiredInProduction),
            None => Ok(()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
