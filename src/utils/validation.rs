//! Input validation and sanitization utilities

use crate::error::CliError;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

/// Validate a Citrix Cloud customer id
pub fn validate_customer_id(customer_id: &str) -> crate::Result<()> {
    if customer_id.is_empty() {
        return Err(CliError::InvalidArguments(
            "Customer id cannot be empty".to_string(),
        )
        .into());
    }

    if !customer_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CliError::InvalidArguments(format!(
            "Invalid customer id '{}': only ASCII letters and digits are allowed",
            customer_id
        ))
        .into());
    }

    Ok(())
}
