//! Common validation utilities.

use validator::ValidationError;

use crate::crypto::API_KEY_LENGTH;

/// Maximum length of a remote server hostname.
pub const HOSTNAME_MAX_LENGTH: usize = 128;

/// Maximum length of a push device token.
pub const TOKEN_MAX_LENGTH: usize = 4096;

/// Validates a remote server hostname.
///
/// Hostnames are not verified against DNS; they exist so operators can be
/// contacted about abuse. Only shape is checked here.
pub fn validate_hostname(hostname: &str) -> Result<(), ValidationError> {
    if hostname.is_empty() {
        let mut err = ValidationError::new("hostname_missing");
        err.message = Some("Hostname is missing".into());
        return Err(err);
    }
    if hostname.len() > HOSTNAME_MAX_LENGTH {
        let mut err = ValidationError::new("hostname_length");
        err.message = Some(format!("Hostname must be at most {} characters", HOSTNAME_MAX_LENGTH).into());
        return Err(err);
    }
    let valid_chars = hostname
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':'));
    if !valid_chars || hostname.starts_with('.') || hostname.ends_with('.') {
        let mut err = ValidationError::new("hostname_format");
        err.message = Some(format!("{} is not a valid hostname", hostname).into());
        return Err(err);
    }
    Ok(())
}

/// Validates the shape of a remote server API key (exact length, alphanumeric).
pub fn validate_api_key_format(api_key: &str) -> Result<(), ValidationError> {
    if api_key.len() != API_KEY_LENGTH || !api_key.chars().all(|c| c.is_ascii_alphanumeric()) {
        let mut err = ValidationError::new("api_key_format");
        err.message = Some(format!("API key must be {} alphanumeric characters", API_KEY_LENGTH).into());
        return Err(err);
    }
    Ok(())
}

/// Validates a push device token: non-empty and bounded.
pub fn validate_push_token(token: &str) -> Result<(), ValidationError> {
    if token.is_empty() {
        let mut err = ValidationError::new("token_missing");
        err.message = Some("Empty or invalid length token".into());
        return Err(err);
    }
    if token.len() > TOKEN_MAX_LENGTH {
        let mut err = ValidationError::new("token_length");
        err.message = Some("Empty or invalid length token".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Hostname tests
    #[test]
    fn test_validate_hostname() {
        assert!(validate_hostname("chat.example.com").is_ok());
        assert!(validate_hostname("localhost").is_ok());
        assert!(validate_hostname("example.com:9991").is_ok());
    }

    #[test]
    fn test_validate_hostname_empty() {
        let err = validate_hostname("").unwrap_err();
        assert_eq!(err.message.unwrap().to_string(), "Hostname is missing");
    }

    #[test]
    fn test_validate_hostname_too_long() {
        let long = "a".repeat(HOSTNAME_MAX_LENGTH + 1);
        assert!(validate_hostname(&long).is_err());
    }

    #[test]
    fn test_validate_hostname_max_length_ok() {
        let max = "a".repeat(HOSTNAME_MAX_LENGTH);
        assert!(validate_hostname(&max).is_ok());
    }

    #[test]
    fn test_validate_hostname_bad_chars() {
        assert!(validate_hostname("chat example.com").is_err());
        assert!(validate_hostname("chat/example").is_err());
        assert!(validate_hostname(".example.com").is_err());
        assert!(validate_hostname("example.com.").is_err());
    }

    // API key format tests
    #[test]
    fn test_validate_api_key_format() {
        let key = "a".repeat(API_KEY_LENGTH);
        assert!(validate_api_key_format(&key).is_ok());
    }

    #[test]
    fn test_validate_api_key_format_wrong_length() {
        assert!(validate_api_key_format("short").is_err());
        assert!(validate_api_key_format(&"a".repeat(API_KEY_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_api_key_format_bad_chars() {
        let mut key = "a".repeat(API_KEY_LENGTH - 1);
        key.push('!');
        assert!(validate_api_key_format(&key).is_err());
    }

    // Push token tests
    #[test]
    fn test_validate_push_token() {
        assert!(validate_push_token("apns-device-token-hex").is_ok());
    }

    #[test]
    fn test_validate_push_token_empty() {
        let err = validate_push_token("").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Empty or invalid length token"
        );
    }

    #[test]
    fn test_validate_push_token_too_long() {
        let long = "x".repeat(TOKEN_MAX_LENGTH + 1);
        assert!(validate_push_token(&long).is_err());
    }

    #[test]
    fn test_validate_push_token_boundary() {
        let max = "x".repeat(TOKEN_MAX_LENGTH);
        assert!(validate_push_token(&max).is_ok());
    }
}
