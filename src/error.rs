//! Error types for rdsri
//!
//! This module defines the error handling strategy for rdsri. There are two
//! error types: `RdsriError` (main error enum) and `ConfigError` (configuration-specific).
//!
//! ## Error Handling Philosophy
//!
//! Library code uses `crate::error::Result<T>` which returns `RdsriError`.
//! CLI code uses `anyhow::Result<T>` for top-level error handling. The conversion
//! happens at the CLI boundary using `anyhow::Error::from` to preserve error chains.
//!
//! ## Fatal vs. non-fatal
//!
//! Only the two external fetches can fail a run:
//!
//! - `InventoryFetch`: the RDS API (or inventory file) could not be read
//! - `PricingFetch`: the pricing dataset could not be downloaded or parsed
//!
//! Both abort the run with no partial output. Nothing is retried; the operator
//! re-runs the tool.
//!
//! Unknown engines and instance types missing from the pricing dataset are not
//! errors. They are reported through `crate::diagnostics::Reporter` and simply
//! produce no cost rows. A zero on-demand total in the savings percentage is
//! defined as 0% and never surfaces here either.

use thiserror::Error;

/// Main error type for rdsri
#[derive(Error, Debug)]
pub enum RdsriError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Inventory fetch failed for region {region}: {message}")]
    InventoryFetch {
        region: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Pricing dataset fetch failed from {location}: {message}")]
    PricingFetch {
        location: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {field} - {reason}")]
    Validation { field: String, reason: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RdsriError {
    pub(crate) fn inventory<E>(region: &str, message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        RdsriError::InventoryFetch {
            region: region.to_string(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub(crate) fn pricing<E>(location: &str, message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        RdsriError::PricingFetch {
            location: location.to_string(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, RdsriError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = RdsriError::inventory("us-east-1", "DescribeDBInstances failed", io);

        assert!(err.to_string().contains("us-east-1"));
        assert!(err.to_string().contains("DescribeDBInstances failed"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_config_error_conversion() {
        let err: RdsriError = ConfigError::MissingField("region".to_string()).into();
        assert!(matches!(err, RdsriError::Config(_)));
        assert!(err.to_string().contains("Missing required field: region"));
    }
}
