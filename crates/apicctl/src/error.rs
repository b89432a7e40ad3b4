//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help
//! text and deterministic exit codes.

use miette::Diagnostic;
use thiserror::Error;

use apic_core::CoreError;

/// Exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to APIC at {url}")]
    #[diagnostic(
        code(apicctl::connection_failed),
        help(
            "Check that the controller is running and accessible.\n\
             URL: {url}\n\
             Try: apicctl match-as-path-term query --insecure"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(code(apicctl::timeout), help("Increase --timeout or check connectivity."))]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(apicctl::auth_failed),
        help("Verify your APIC username and password (or APIC_PASSWORD).")
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(apicctl::no_credentials),
        help(
            "Configure credentials with: apicctl config init\n\
             Or set the APIC_USERNAME / APIC_PASSWORD environment variables."
        )
    )]
    NoCredentials { profile: String },

    #[error("No controller configured")]
    #[diagnostic(
        code(apicctl::no_config),
        help(
            "Point apicctl at a controller with --host or APIC_HOST,\n\
             or create a profile: apicctl config init --host <url> --username <user>\n\
             (config path: {path})"
        )
    )]
    NoConfig { path: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid parameters: {message}")]
    #[diagnostic(code(apicctl::validation))]
    Validation { message: String },

    // ── API ──────────────────────────────────────────────────────────
    /// Error reported by the APIC, with request metadata for diagnosis.
    #[error("APIC error {code}: {text}")]
    #[diagnostic(code(apicctl::api_error))]
    Api {
        code: String,
        text: String,
        method: Option<String>,
        url: Option<String>,
        status: Option<u16>,
    },

    /// The controller answered with something unparseable.
    #[error("Could not parse controller response: {message}")]
    #[diagnostic(
        code(apicctl::parse_error),
        help("Raw response body:\n{raw}")
    )]
    ParseError { message: String, raw: String },

    // ── Local ────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    #[diagnostic(code(apicctl::config))]
    Config { message: String },

    #[error("IO error: {0}")]
    #[diagnostic(code(apicctl::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Deterministic process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Validation { .. } => exit_code::USAGE,
            Self::Api { .. }
            | Self::ParseError { .. }
            | Self::Config { .. }
            | Self::NoConfig { .. }
            | Self::Io(_) => exit_code::GENERAL,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::Timeout => Self::Timeout,
            CoreError::Validation { message } => Self::Validation { message },
            CoreError::Api {
                code,
                text,
                status,
                method,
                url,
            } => Self::Api {
                code,
                text,
                method,
                url,
                status,
            },
            CoreError::ParseResponse { message, raw } => Self::ParseError { message, raw },
            CoreError::Config { message } => Self::Config { message },
            CoreError::Internal(message) => Self::Config { message },
        }
    }
}
