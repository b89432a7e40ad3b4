// ── Fabric abstraction ──
//
// The injected interface between the reconciler and the controller.
// `ApicFabric` is the production implementation over `apic_api::ApicClient`;
// tests substitute a mock. Keeping the trait surface to fetch/write/delete
// keeps the reconciler independent of HTTP concerns.

use tracing::debug;

use apic_api::dn::MoQuery;
use apic_api::models::ManagedObject;
use apic_api::ApicClient;

use crate::config::FabricConfig;
use crate::error::CoreError;

/// Read/write access to the fabric's object tree.
///
/// Any REST client implementation can satisfy this; the reconciler is
/// generic over it so tests can run against an in-memory mock.
#[allow(async_fn_in_trait)]
pub trait Fabric {
    /// Execute a read query. A missing object yields an empty vec.
    async fn fetch(&self, query: &MoQuery) -> Result<Vec<ManagedObject>, CoreError>;

    /// POST a configuration payload to the object at `dn`.
    async fn write(&self, dn: &str, payload: &ManagedObject) -> Result<(), CoreError>;

    /// DELETE the object at `dn`.
    async fn delete(&self, dn: &str) -> Result<(), CoreError>;
}

/// Production `Fabric` backed by the APIC REST client.
pub struct ApicFabric {
    client: ApicClient,
}

impl ApicFabric {
    /// Connect and authenticate against the controller.
    pub async fn connect(config: &FabricConfig) -> Result<Self, CoreError> {
        let client = ApicClient::new(config.url.clone(), &config.transport())?;
        client.login(&config.username, &config.password).await?;
        debug!(url = %config.url, "fabric session established");
        Ok(Self { client })
    }

    /// Wrap an already-authenticated client.
    pub fn from_client(client: ApicClient) -> Self {
        Self { client }
    }

    /// The underlying REST client.
    pub fn client(&self) -> &ApicClient {
        &self.client
    }
}

impl Fabric for ApicFabric {
    async fn fetch(&self, query: &MoQuery) -> Result<Vec<ManagedObject>, CoreError> {
        Ok(self.client.get(query).await?)
    }

    async fn write(&self, dn: &str, payload: &ManagedObject) -> Result<(), CoreError> {
        self.client.post(dn, payload).await?;
        Ok(())
    }

    async fn delete(&self, dn: &str) -> Result<(), CoreError> {
        self.client.delete(dn).await?;
        Ok(())
    }
}
