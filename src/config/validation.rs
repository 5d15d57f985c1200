//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - Check cookie/field/header names are usable on the wire
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::AppConfig;

/// A single semantic validation failure.
#[derive(Debug)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate semantic constraints on a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address",
            message: format!("'{}' is not a valid socket address", config.listener.bind_address),
        });
    }

    check_cookie_name(&config.csrf.cookie_name, &mut errors);

    if config.csrf.field_name.is_empty() {
        errors.push(ValidationError {
            field: "csrf.field_name",
            message: "must not be empty".to_string(),
        });
    }

    if config.csrf.header_name.is_empty()
        || !config
            .csrf
            .header_name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
    {
        errors.push(ValidationError {
            field: "csrf.header_name",
            message: "must be a non-empty ASCII header name".to_string(),
        });
    }

    if config.csrf.max_age_secs == Some(0) {
        errors.push(ValidationError {
            field: "csrf.max_age_secs",
            message: "must be positive; omit for a session cookie".to_string(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.request_secs",
            message: "must be positive".to_string(),
        });
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError {
            field: "limits.max_body_bytes",
            message: "must be positive".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// RFC 6265 cookie-name charset, minus the rarely used symbols.
fn check_cookie_name(name: &str, errors: &mut Vec<ValidationError>) {
    let valid = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if !valid {
        errors.push(ValidationError {
            field: "csrf.cookie_name",
            message: "must be non-empty and contain only alphanumerics, '-' or '_'".to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn bad_bind_address_is_reported() {
        let mut config = AppConfig::default();
        config.listener.bind_address = "localhost".to_string();
        let errors = validate_config(&config).expect_err("should fail");
        assert!(errors.iter().any(|e| e.field == "listener.bind_address"));
    }

    #[test]
    fn cookie_name_with_separator_is_rejected() {
        let mut config = AppConfig::default();
        config.csrf.cookie_name = "csrf;secret".to_string();
        let errors = validate_config(&config).expect_err("should fail");
        assert!(errors.iter().any(|e| e.field == "csrf.cookie_name"));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = AppConfig::default();
        config.listener.bind_address = String::new();
        config.csrf.cookie_name = String::new();
        config.csrf.field_name = String::new();
        config.timeouts.request_secs = 0;
        let errors = validate_config(&config).expect_err("should fail");
        assert!(errors.len() >= 4);
    }

    #[test]
    fn zero_max_age_is_rejected() {
        let mut config = AppConfig::default();
        config.csrf.max_age_secs = Some(0);
        let errors = validate_config(&config).expect_err("should fail");
        assert!(errors.iter().any(|e| e.field == "csrf.max_age_secs"));
    }
}
