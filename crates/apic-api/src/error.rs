use thiserror::Error;

/// Top-level error type for the `apic-api` crate.
///
/// Covers every failure mode of the REST surface: authentication,
/// transport, APIC-reported errors, and response parsing. `apic-core`
/// maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login failed (wrong credentials, account locked, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Session cookie expired or was revoked by the controller.
    #[error("Session expired -- re-authentication required")]
    SessionExpired,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── APIC ────────────────────────────────────────────────────────
    /// Structured error reported by the APIC in the `imdata` envelope.
    ///
    /// Carries the request metadata (`method`, `url`) so callers can
    /// surface it unchanged for diagnosis.
    #[error("APIC error {code} (HTTP {status}): {text}")]
    Apic {
        code: String,
        text: String,
        status: u16,
        method: String,
        url: String,
    },

    /// Non-2xx response with no parseable APIC error record.
    #[error("HTTP {status} from {url}")]
    Http {
        status: u16,
        method: String,
        url: String,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// Response body could not be parsed, with the raw body for debugging.
    #[error("Response parse error: {message}")]
    ParseResponse { message: String, raw: String },
}

impl Error {
    /// Returns `true` if this error indicates auth has expired
    /// and re-authentication might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::SessionExpired)
    }

    /// Returns `true` if this is a "not found" error.
    ///
    /// The APIC answers MO reads on missing objects with an empty
    /// `imdata`, so this only fires for path-level 404s.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Http { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Extract the APIC error code, if available.
    pub fn apic_error_code(&self) -> Option<&str> {
        match self {
            Self::Apic { code, .. } => Some(code),
            _ => None,
        }
    }
}
