use crate::config::types::{
    AnalyticsConfig, ApiConfig, Config, PresentationConfig, UserAgentConfig,
};
use crate::ConfigError;
use reqwest::header::{HeaderName, HeaderValue};
use url::Url;

const MAX_PAGE_DELAY_MS: u64 = 10_000;
const MAX_TIMEOUT_SECS: u64 = 300;
const MAX_RELATED: usize = 50;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_user_agent_config(&config.user_agent)?;
    if let Some(analytics) = &config.analytics {
        validate_analytics_config(analytics)?;
    }
    validate_presentation_config(&config.presentation)?;
    Ok(())
}

fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    validate_http_url("base-url", &config.base_url)?;

    if config.models_path.trim_matches('/').is_empty() {
        return Err(ConfigError::Validation(
            "models-path cannot be empty".to_string(),
        ));
    }

    if config.maps_path.trim_matches('/').is_empty() {
        return Err(ConfigError::Validation(
            "maps-path cannot be empty".to_string(),
        ));
    }

    config
        .models_url()
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid models-path: {}", e)))?;
    config
        .maps_url()
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid maps-path: {}", e)))?;

    if config.page_delay_ms > MAX_PAGE_DELAY_MS {
        return Err(ConfigError::Validation(format!(
            "page-delay-ms must be <= {}ms, got {}ms",
            MAX_PAGE_DELAY_MS, config.page_delay_ms
        )));
    }

    if config.timeout_secs < 1 || config.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.timeout_secs
        )));
    }

    for (name, value) in &config.headers {
        if HeaderName::from_bytes(name.as_bytes()).is_err() {
            return Err(ConfigError::Validation(format!("invalid header name '{}'", name)));
        }
        if HeaderValue::from_str(value).is_err() {
            return Err(ConfigError::Validation(format!("invalid value for header '{}'", name)));
        }
    }

    Ok(())
}

fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.client_name.is_empty() {
        return Err(ConfigError::Validation(
            "client-name cannot be empty".to_string(),
        ));
    }

    if !config
        .client_name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "client-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.client_name
        )));
    }

    if config.client_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "client-version cannot be empty".to_string(),
        ));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    Ok(())
}

fn validate_analytics_config(config: &AnalyticsConfig) -> Result<(), ConfigError> {
    validate_http_url("analytics base-url", &config.base_url)?;

    if config.short_id.trim().is_empty() {
        return Err(ConfigError::Validation(
            "analytics short-id cannot be empty".to_string(),
        ));
    }

    if config.api_key_env.trim().is_empty() {
        return Err(ConfigError::Validation(
            "analytics api-key-env cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_presentation_config(config: &PresentationConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("related-wide", config.related_wide),
        ("related-narrow", config.related_narrow),
    ] {
        if value < 1 || value > MAX_RELATED {
            return Err(ConfigError::Validation(format!(
                "{} must be between 1 and {}, got {}",
                name, MAX_RELATED, value
            )));
        }
    }

    if config.description_words < 1 {
        return Err(ConfigError::Validation(
            "description-words must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates an absolute http(s) URL
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must use http or https, got '{}'",
            field,
            url.scheme()
        )));
    }

    Ok(())
}
