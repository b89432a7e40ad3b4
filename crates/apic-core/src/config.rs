// Fabric connection configuration.
//
// Consumers (the CLI, tests) build a `FabricConfig` and hand it to
// `ApicFabric::connect`. TLS verification mirrors apic-api's `TlsMode`
// without exposing transport types at this layer.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use apic_api::transport::{TlsMode, TransportConfig};

/// TLS verification policy for the controller connection.
#[derive(Debug, Clone)]
pub enum TlsVerification {
    /// Use the system certificate store.
    SystemDefaults,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (self-signed controllers).
    DangerAcceptInvalid,
}

/// Everything needed to reach and authenticate against one APIC.
#[derive(Debug, Clone)]
pub struct FabricConfig {
    /// Controller base URL, e.g. `https://apic1`.
    pub url: Url,
    pub username: String,
    pub password: SecretString,
    pub tls: TlsVerification,
    pub timeout: Duration,
}

impl FabricConfig {
    /// Translate into the transport layer's config.
    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
            cookie_jar: None,
        }
    }
}
