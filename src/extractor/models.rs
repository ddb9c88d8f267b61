//! Extraction data model: login requests, captured headers, results, and
//! history records.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::{KEY_HEADERS, MAX_CREDENTIAL_LEN, REDACT_KEEP, REDACT_THRESHOLD};
use crate::error_handling::{ExtractError, ValidationError};

/// Credentials and target for one extraction session.
///
/// Constructed per call and discarded; never persisted.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub target_url: String,
}

impl LoginRequest {
    /// Checks the request for basic well-formedness.
    ///
    /// Username and password must be non-empty and at most
    /// [`MAX_CREDENTIAL_LEN`] characters; the target URL must parse and use
    /// the `https` scheme. No side effects.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.is_empty() {
            return Err(ValidationError::EmptyUsername);
        }
        if self.username.chars().count() > MAX_CREDENTIAL_LEN {
            return Err(ValidationError::UsernameTooLong);
        }

        if self.password.is_empty() {
            return Err(ValidationError::EmptyPassword);
        }
        if self.password.chars().count() > MAX_CREDENTIAL_LEN {
            return Err(ValidationError::PasswordTooLong);
        }

        if self.target_url.is_empty() {
            return Err(ValidationError::EmptyTargetUrl);
        }
        let parsed = Url::parse(&self.target_url).map_err(|_| ValidationError::MalformedTargetUrl)?;
        if parsed.scheme() != "https" {
            return Err(ValidationError::SchemeNotHttps);
        }

        Ok(())
    }
}

/// One captured HTTP request header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderInfo {
    pub name: String,
    pub value: String,
    /// Whether the name is on the key-header allow-list.
    pub is_key: bool,
}

/// Outcome of one extraction session.
///
/// Header names are unique within one result (they come out of a map). The
/// `error` text duplicates the typed error for display purposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResult {
    pub success: bool,
    pub timestamp: DateTime<Utc>,
    pub headers: Vec<HeaderInfo>,
    pub error: Option<String>,
}

impl ExtractResult {
    /// Builds the success shape from the drained capture map.
    pub fn captured(headers: HashMap<String, String>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| {
                let is_key = is_key_header(&name);
                HeaderInfo {
                    name,
                    value,
                    is_key,
                }
            })
            .collect();

        Self {
            success: true,
            timestamp: Utc::now(),
            headers,
            error: None,
        }
    }

    /// Builds the failure shape for a typed extraction error.
    pub fn failure(error: &ExtractError) -> Self {
        Self {
            success: false,
            timestamp: Utc::now(),
            headers: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    /// The key headers of this result.
    pub fn key_headers(&self) -> impl Iterator<Item = &HeaderInfo> {
        self.headers.iter().filter(|h| h.is_key)
    }
}

/// One persisted line of extraction history.
///
/// Key-header values are redacted before they get here; raw credentials are
/// never written to the history file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub username: String,
    pub success: bool,
    pub key_headers: HashMap<String, String>,
}

impl HistoryRecord {
    /// Builds a history record from a finished extraction, keeping only the
    /// key headers, redacted.
    pub fn from_result(username: &str, result: &ExtractResult) -> Self {
        let key_headers = result
            .key_headers()
            .map(|h| (h.name.clone(), redact_header_value(&h.value)))
            .collect();

        Self {
            id: format!("extract_{}", result.timestamp.timestamp_millis()),
            timestamp: result.timestamp,
            username: username.to_string(),
            success: result.success,
            key_headers,
        }
    }
}

/// Returns true iff `name` exactly matches one of the allow-listed key-header
/// names. No normalization: matching is case-sensitive against the two casings
/// the portal emits.
pub fn is_key_header(name: &str) -> bool {
    KEY_HEADERS.contains(&name)
}

/// Redacts a header value for persistence: values longer than
/// [`REDACT_THRESHOLD`] characters keep only their first and last
/// [`REDACT_KEEP`] characters. Shorter values pass through unchanged.
pub fn redact_header_value(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= REDACT_THRESHOLD {
        return value.to_string();
    }

    let head: String = chars[..REDACT_KEEP].iter().collect();
    let tail: String = chars[chars.len() - REDACT_KEEP..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, password: &str, url: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
            target_url: url.to_string(),
        }
    }

    #[test]
    fn valid_request_passes() {
        let req = request("user@example.com", "hunter2", "https://portal.example.com/login");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn empty_fields_are_rejected() {
        let req = request("", "pw", "https://example.com");
        assert_eq!(req.validate(), Err(ValidationError::EmptyUsername));

        let req = request("user", "", "https://example.com");
        assert_eq!(req.validate(), Err(ValidationError::EmptyPassword));

        let req = request("user", "pw", "");
        assert_eq!(req.validate(), Err(ValidationError::EmptyTargetUrl));
    }

    #[test]
    fn oversized_credentials_are_rejected() {
        let long = "x".repeat(MAX_CREDENTIAL_LEN + 1);

        let req = request(&long, "pw", "https://example.com");
        assert_eq!(req.validate(), Err(ValidationError::UsernameTooLong));

        let req = request("user", &long, "https://example.com");
        assert_eq!(req.validate(), Err(ValidationError::PasswordTooLong));
    }

    #[test]
    fn credential_at_limit_passes() {
        let exact = "x".repeat(MAX_CREDENTIAL_LEN);
        let req = request(&exact, &exact, "https://example.com");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn non_https_schemes_are_rejected() {
        let req = request("user", "pw", "http://example.com");
        assert_eq!(req.validate(), Err(ValidationError::SchemeNotHttps));

        let req = request("user", "pw", "ftp://example.com");
        assert_eq!(req.validate(), Err(ValidationError::SchemeNotHttps));
    }

    #[test]
    fn unparseable_url_is_rejected() {
        let req = request("user", "pw", "not a url");
        assert_eq!(req.validate(), Err(ValidationError::MalformedTargetUrl));
    }

    #[test]
    fn key_header_match_is_exact_and_case_sensitive() {
        for name in [
            "X-Auth-Token",
            "X-Auth-Ts",
            "Gtoken",
            "Authorization",
            "x-auth-token",
            "x-auth-ts",
            "gtoken",
            "authorization",
        ] {
            assert!(is_key_header(name), "{name} should be a key header");
        }

        // Only the two listed casings count; anything else is not key
        for name in ["X-AUTH-TOKEN", "GTOKEN", "authoriZation", "Content-Type", ""] {
            assert!(!is_key_header(name), "{name} should not be a key header");
        }
    }

    #[test]
    fn redaction_keeps_short_values_verbatim() {
        assert_eq!(redact_header_value("short"), "short");
        // exactly at the threshold: untouched
        let exact = "a".repeat(REDACT_THRESHOLD);
        assert_eq!(redact_header_value(&exact), exact);
    }

    #[test]
    fn redaction_truncates_long_values() {
        let value = "abcdefgh-MIDDLE-SECRET-stuvwxyz";
        let redacted = redact_header_value(value);

        assert_eq!(redacted, "abcdefgh...stuvwxyz");
        assert!(!redacted.contains("SECRET"));
    }

    #[test]
    fn history_record_redacts_key_headers_only() {
        let mut captured = HashMap::new();
        captured.insert(
            "X-Auth-Token".to_string(),
            "0123456789abcdef0123456789abcdef".to_string(),
        );
        captured.insert("Content-Type".to_string(), "application/json".to_string());

        let result = ExtractResult::captured(captured);
        let record = HistoryRecord::from_result("alice", &result);

        assert!(record.success);
        assert_eq!(record.username, "alice");
        assert_eq!(record.key_headers.len(), 1);
        assert_eq!(
            record.key_headers["X-Auth-Token"],
            "01234567...89abcdef"
        );
    }

    #[test]
    fn failure_shape_duplicates_error_text() {
        let result = ExtractResult::failure(&ExtractError::NoHeaders);

        assert!(!result.success);
        assert!(result.headers.is_empty());
        assert_eq!(
            result.error.as_deref(),
            Some("no request headers were captured")
        );
    }
}
