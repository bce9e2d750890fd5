use crate::core::ValidationError;
use url::Url;

/// Parses `input` as an absolute URL that carries an authority.
pub fn validate(input: &str) -> Result<Url, ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::Empty);
    }

    let parsed = Url::parse(input).map_err(|_| ValidationError::Invalid)?;
    if !parsed.has_host() {
        return Err(ValidationError::Invalid);
    }

    Ok(parsed)
}

pub fn is_valid_url(input: &str) -> bool {
    validate(input).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_absolute_urls() {
        assert!(is_valid_url("https://www.youtube.com/watch?v=abc123&t=10"));
        assert!(is_valid_url("http://localhost:8080/path"));
        assert!(is_valid_url("ftp://files.example.org/pub"));
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url("www.example.com"));
        assert!(!is_valid_url("/relative/path"));
        assert!(!is_valid_url("mailto:someone@example.com"));
    }

    #[test]
    fn test_empty_is_distinct_from_invalid() {
        assert_eq!(validate("").unwrap_err(), ValidationError::Empty);
        assert_eq!(validate("   \t").unwrap_err(), ValidationError::Empty);
        assert_eq!(validate("nope").unwrap_err(), ValidationError::Invalid);
    }
}
