use crate::utils::error::{AppError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> AppError {
    AppError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Accepts absolute http(s) URLs only.
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", scheme),
        )),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_required_field<'a>(field_name: &str, value: &'a Option<String>) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::MissingConfigError {
            field: field_name.to_string(),
        }),
    }
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            &value.to_string(),
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("catalog.api_base_url", "https://api.spotify.com/v1").is_ok());
        assert!(validate_url("catalog.api_base_url", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("catalog.api_base_url", "").is_err());
        assert!(validate_url("catalog.api_base_url", "api.spotify.com").is_err());
        assert!(validate_url("auth.redirect_uri", "chrome-extension://abc/oauth2").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        assert_eq!(
            validate_required_field("auth.client_id", &Some("abc".to_string())).unwrap(),
            "abc"
        );
        assert!(matches!(
            validate_required_field("auth.client_id", &Some("  ".to_string())),
            Err(AppError::MissingConfigError { .. })
        ));
        assert!(validate_required_field("auth.client_id", &None).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("catalog.timeout_seconds", 30u64, 1, 300).is_ok());
        assert!(validate_range("catalog.timeout_seconds", 0u64, 1, 300).is_err());
        assert!(validate_range("catalog.timeout_seconds", 301u64, 1, 300).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("playlist.default_name", "Mix").is_ok());
        assert!(validate_non_empty_string("playlist.default_name", " \t").is_err());
    }
}
