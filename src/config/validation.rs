//! Configuration validation.
//!
//! Serde handles syntactic validation; this module checks semantics: value
//! ranges and cross-field consistency. All violations are returned, not just
//! the first.

use url::Url;

use crate::config::schema::ServiceConfig;

/// A single semantic violation in the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("service.name must not be empty")]
    EmptyServiceName,

    #[error("service.port must not be 0")]
    ZeroPort,

    #[error("registry.address is not a valid http(s) URL: {0}")]
    InvalidRegistryAddress(String),

    #[error("health_check.{0}_secs must be greater than 0")]
    ZeroHealthCheckDuration(&'static str),

    #[error("health_check.path must start with '/'")]
    RelativeHealthCheckPath,

    #[error("shutdown.grace_period_secs must be greater than 0")]
    ZeroGracePeriod,
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.service.name.trim().is_empty() {
        errors.push(ValidationError::EmptyServiceName);
    }
    if config.service.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    match Url::parse(&config.registry.address) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        _ => errors.push(ValidationError::InvalidRegistryAddress(
            config.registry.address.clone(),
        )),
    }

    if config.health_check.interval_secs == 0 {
        errors.push(ValidationError::ZeroHealthCheckDuration("interval"));
    }
    if config.health_check.timeout_secs == 0 {
        errors.push(ValidationError::ZeroHealthCheckDuration("timeout"));
    }
    if config.health_check.deregister_after_secs == 0 {
        errors.push(ValidationError::ZeroHealthCheckDuration("deregister_after"));
    }
    if !config.health_check.path.starts_with('/') {
        errors.push(ValidationError::RelativeHealthCheckPath);
    }

    if config.shutdown.grace_period_secs == 0 {
        errors.push(ValidationError::ZeroGracePeriod);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&ServiceConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_violations() {
        let mut config = ServiceConfig::default();
        config.service.name = "  ".to_string();
        config.service.port = 0;
        config.registry.address = "consul:8500".to_string();
        config.health_check.interval_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn rejects_relative_probe_path() {
        let mut config = ServiceConfig::default();
        config.health_check.path = "health".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::RelativeHealthCheckPath]
        ));
    }
}
