//! Exit code standardization for rdsri
//!
//! Provides consistent exit codes for different error types so scripts can
//! tell a bad invocation from an unreachable AWS endpoint.
//!
//! ## Exit Code Convention
//!
//! - `0` = Success
//! - `1` = User error (invalid input, validation failure)
//! - `2` = System error (RDS API failure, pricing dataset unreachable, I/O)
//! - `3` = Configuration error (missing region, config parse error)

use crate::error::RdsriError;

/// Standard exit codes for rdsri
pub mod codes {
    /// Success
    #[allow(dead_code)]
    pub const SUCCESS: i32 = 0;
    /// User error (invalid input, validation failure)
    pub const USER_ERROR: i32 = 1;
    /// System error (AWS API failure, network error)
    pub const SYSTEM_ERROR: i32 = 2;
    /// Configuration error (missing config, invalid values)
    pub const CONFIG_ERROR: i32 = 3;
}

/// Map an RdsriError to an appropriate exit code
pub fn exit_code_for_error(error: &RdsriError) -> i32 {
    use RdsriError::*;
    match error {
        Config(_) => codes::CONFIG_ERROR,

        Validation { .. } => codes::USER_ERROR,

        InventoryFetch { .. } => codes::SYSTEM_ERROR,
        PricingFetch { .. } => codes::SYSTEM_ERROR,
        Io(_) => codes::SYSTEM_ERROR,
        Json(_) => codes::SYSTEM_ERROR,
    }
}

/// Exit code for an error that reached `main`
///
/// Errors that did not originate as `RdsriError` (e.g. clap or anyhow context
/// only) are treated as user errors.
pub fn exit_code_for_anyhow(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<RdsriError>()
        .map(exit_code_for_error)
        .unwrap_or(codes::USER_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_fetch_errors_are_system_errors() {
        let err = RdsriError::PricingFetch {
            location: "https://example.invalid".to_string(),
            message: "timeout".to_string(),
            source: None,
        };
        assert_eq!(exit_code_for_error(&err), codes::SYSTEM_ERROR);
    }

    #[test]
    fn test_config_errors_map_to_config_code() {
        let err = RdsriError::Config(ConfigError::MissingField("region".into()));
        assert_eq!(exit_code_for_error(&err), codes::CONFIG_ERROR);

        let wrapped = anyhow::Error::from(err);
        assert_eq!(exit_code_for_anyhow(&wrapped), codes::CONFIG_ERROR);
    }

    #[test]
    fn test_foreign_errors_default_to_user_error() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code_for_anyhow(&err), codes::USER_ERROR);
    }
}
