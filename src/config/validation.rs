use crate::config::types::{Config, HarvestConfig, HttpConfig, SiteConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_http_config(&config.http)?;
    validate_harvest_config(&config.harvest)?;
    Ok(())
}

/// Validates the dictionary site location
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            config.base_url
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' has no host",
            config.base_url
        )));
    }

    if !config.browse_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "browse_path must start with '/', got '{}'",
            config.browse_path
        )));
    }

    if config.entries_selector.trim().is_empty() {
        return Err(ConfigError::Validation(
            "entries_selector cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "connect_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates the letter list and page cap
fn validate_harvest_config(config: &HarvestConfig) -> Result<(), ConfigError> {
    if config.letters.is_empty() {
        return Err(ConfigError::Validation(
            "letters cannot be empty".to_string(),
        ));
    }

    for (i, letter) in config.letters.iter().enumerate() {
        if !letter.is_ascii_lowercase() {
            return Err(ConfigError::Validation(format!(
                "letters must be lowercase ASCII, got '{}'",
                letter
            )));
        }

        if config.letters[..i].contains(letter) {
            return Err(ConfigError::Validation(format!(
                "letter '{}' is listed more than once",
                letter
            )));
        }
    }

    if config.max_pages_per_letter == Some(0) {
        return Err(ConfigError::Validation(
            "max_pages_per_letter must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
