// ── Core error types ──
//
// User-facing errors from apic-core. Consumers never see reqwest or
// serde failures directly -- the `From<apic_api::Error>` impl translates
// transport-layer errors into domain-appropriate variants, preserving
// the APIC error code/text and request metadata for diagnosis.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out")]
    Timeout,

    // ── Parameter errors ─────────────────────────────────────────────
    /// Configuration-validation failure. Raised before any network call.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── API errors ───────────────────────────────────────────────────
    /// Error reported by the APIC, surfaced verbatim with request metadata.
    #[error("APIC error {code}: {text}")]
    Api {
        code: String,
        text: String,
        status: Option<u16>,
        method: Option<String>,
        url: Option<String>,
    },

    /// Response body could not be parsed; the raw body is preserved.
    #[error("Response parse error: {message}")]
    ParseResponse { message: String, raw: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<apic_api::Error> for CoreError {
    fn from(err: apic_api::Error) -> Self {
        match err {
            apic_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            apic_api::Error::SessionExpired => CoreError::AuthenticationFailed {
                message: "Session expired -- re-authentication required".into(),
            },
            apic_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else {
                    CoreError::ConnectionFailed {
                        url: e.url().map(ToString::to_string).unwrap_or_default(),
                        reason: e.to_string(),
                    }
                }
            }
            apic_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid URL: {e}"),
            },
            apic_api::Error::Tls(message) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: message,
            },
            apic_api::Error::Apic {
                code,
                text,
                status,
                method,
                url,
            } => CoreError::Api {
                code,
                text,
                status: Some(status),
                method: Some(method),
                url: Some(url),
            },
            apic_api::Error::Http {
                status,
                method,
                url,
                body,
            } => CoreError::Api {
                code: status.to_string(),
                text: if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    body
                },
                status: Some(status),
                method: Some(method),
                url: Some(url),
            },
            apic_api::Error::ParseResponse { message, raw } => {
                CoreError::ParseResponse { message, raw }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_carries_no_stale_duration() {
        assert_eq!(CoreError::Timeout.to_string(), "Request timed out");
    }

    #[test]
    fn session_expiry_maps_to_authentication_failure() {
        let err = CoreError::from(apic_api::Error::SessionExpired);
        assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    }
}
