//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `LUMERA_BASE_URL` - Public URL for the storefront
//!
//! ## Optional
//! - `LUMERA_HOST` - Bind address (default: 127.0.0.1)
//! - `LUMERA_PORT` - Listen port (default: 3000)
//! - `LUMERA_USD_TO_INR_RATE` - Display conversion rate (default: 83.50)
//! - `LUMERA_CATALOG_PATH` - JSON catalog to load instead of the built-in seed
//! - `LUMERA_BANK_ACCOUNT_HOLDER`, `LUMERA_BANK_NAME`, `LUMERA_BANK_ACCOUNT_NUMBER`,
//!   `LUMERA_BANK_IFSC`, `LUMERA_BANK_ACCOUNT_TYPE`, `LUMERA_BANK_UPI_ID`,
//!   `LUMERA_BANK_QR_IMAGE_URL`, `LUMERA_BANK_GST_DETAILS` - Bank-transfer details
//!   shown at checkout (published only when holder, bank name and account number
//!   are all set)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use lumera_core::{BankDetails, ExchangeRate};
use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Conversion used for customer-facing prices
    pub exchange_rate: ExchangeRate,
    /// Optional JSON catalog file
    pub catalog_path: Option<PathBuf>,
    /// Bank-transfer details shown at checkout
    pub bank_details: Option<BankDetails>,
    /// Sentry error tracking configuration
    pub sentry: SentryConfig,
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone, Default)]
pub struct SentryConfig {
    pub dsn: Option<String>,
    pub environment: Option<String>,
    pub sample_rate: f32,
    pub traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(&lookup);

        let host = env.parsed_or("LUMERA_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = env.parsed_or("LUMERA_PORT", 3000u16)?;
        let base_url = env.required("LUMERA_BASE_URL").and_then(|raw| {
            Url::parse(&raw).map_err(|e| {
                ConfigError::InvalidEnvVar("LUMERA_BASE_URL".to_string(), e.to_string())
            })
        })?;

        let rate: Decimal = env.parsed_or("LUMERA_USD_TO_INR_RATE", ExchangeRate::DEFAULT_USD_TO_INR)?;
        if rate <= Decimal::ZERO {
            return Err(ConfigError::InvalidEnvVar(
                "LUMERA_USD_TO_INR_RATE".to_string(),
                "must be positive".to_string(),
            ));
        }

        let catalog_path = env.optional("LUMERA_CATALOG_PATH").map(PathBuf::from);
        let bank_details = bank_details_from(&env);

        let sentry = SentryConfig {
            dsn: env.optional("SENTRY_DSN"),
            environment: env.optional("SENTRY_ENVIRONMENT"),
            sample_rate: env.parsed_or("SENTRY_SAMPLE_RATE", 1.0)?,
            traces_sample_rate: env.parsed_or("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        };

        Ok(Self {
            host,
            port,
            base_url,
            exchange_rate: ExchangeRate::usd_to_inr(rate),
            catalog_path,
            bank_details,
            sentry,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies must be marked `Secure`.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

fn bank_details_from(env: &Env<'_>) -> Option<BankDetails> {
    let account_holder = env.optional("LUMERA_BANK_ACCOUNT_HOLDER")?;
    let bank_name = env.optional("LUMERA_BANK_NAME")?;
    let account_number = env.optional("LUMERA_BANK_ACCOUNT_NUMBER")?;

    Some(BankDetails {
        account_holder,
        bank_name,
        account_number,
        ifsc_code: env.optional("LUMERA_BANK_IFSC").unwrap_or_default(),
        account_type: env.optional("LUMERA_BANK_ACCOUNT_TYPE").unwrap_or_default(),
        upi_id: env.optional("LUMERA_BANK_UPI_ID").unwrap_or_default(),
        qr_image_url: env.optional("LUMERA_BANK_QR_IMAGE_URL").unwrap_or_default(),
        gst_details: env.optional("LUMERA_BANK_GST_DETAILS"),
    })
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup with the storefront's parsing conventions.
struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parsed_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |raw| {
            raw.parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}
