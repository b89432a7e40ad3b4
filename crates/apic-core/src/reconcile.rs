// ── Reconciliation engine ──
//
// Three terminal branches per invocation: ensure (idempotent upsert),
// remove (idempotent delete), query (read-only). One fetch, at most one
// write, no retries -- failures propagate unchanged to the caller.

use tracing::{debug, info};

use apic_api::dn::MoAddress;
use apic_api::models::{Attributes, ManagedObject};

use crate::diff;
use crate::error::CoreError;
use crate::fabric::Fabric;
use crate::task::TaskOutcome;

/// What one invocation should make true on the fabric.
#[derive(Debug, Clone)]
pub enum Plan {
    /// Upsert the object at `address` to carry exactly `attributes`
    /// (for the attributes provided; others are left untouched).
    Ensure {
        address: MoAddress,
        class: &'static str,
        attributes: Attributes,
    },
    /// Remove the object at `address` if it exists.
    Remove { address: MoAddress },
    /// Read whatever exists at the (possibly broadened) scope.
    Query { address: MoAddress },
}

/// Drives a `Plan` to completion against an injected `Fabric`.
pub struct Reconciler<F: Fabric> {
    fabric: F,
}

impl<F: Fabric> Reconciler<F> {
    pub fn new(fabric: F) -> Self {
        Self { fabric }
    }

    /// Run the plan. Single round trip for reads, at most one write.
    pub async fn run(&self, plan: Plan) -> Result<TaskOutcome, CoreError> {
        match plan {
            Plan::Ensure {
                address,
                class,
                attributes,
            } => self.ensure(&address, class, attributes).await,
            Plan::Remove { address } => self.remove(&address).await,
            Plan::Query { address } => self.query(&address).await,
        }
    }

    async fn ensure(
        &self,
        address: &MoAddress,
        class: &'static str,
        attributes: Attributes,
    ) -> Result<TaskOutcome, CoreError> {
        let dn = require_dn(address)?;

        let previous = self.fabric.fetch(&address.read_query(true)).await?;
        let proposed = ManagedObject::new(class, attributes);

        let patch = diff::diff_attributes(
            &proposed.attributes,
            previous.first().map(|mo| &mo.attributes),
        );

        let Some(patch) = patch else {
            debug!(%dn, "already in desired state, no write issued");
            return Ok(TaskOutcome {
                changed: false,
                current: previous.clone(),
                previous,
                proposed: Some(proposed),
                sent: None,
            });
        };

        let sent = ManagedObject::new(class, patch);
        self.fabric.write(&dn, &sent).await?;
        info!(%dn, "configuration pushed");

        let current = self.fabric.fetch(&address.read_query(true)).await?;
        Ok(TaskOutcome {
            changed: true,
            current,
            previous,
            proposed: Some(proposed),
            sent: Some(sent),
        })
    }

    async fn remove(&self, address: &MoAddress) -> Result<TaskOutcome, CoreError> {
        let dn = require_dn(address)?;

        let previous = self.fabric.fetch(&address.read_query(true)).await?;
        if previous.is_empty() {
            debug!(%dn, "object already absent, no delete issued");
            return Ok(TaskOutcome {
                changed: false,
                previous,
                ..TaskOutcome::default()
            });
        }

        self.fabric.delete(&dn).await?;
        info!(%dn, "object deleted");

        Ok(TaskOutcome {
            changed: true,
            previous,
            ..TaskOutcome::default()
        })
    }

    async fn query(&self, address: &MoAddress) -> Result<TaskOutcome, CoreError> {
        let query = address.read_query(false);
        debug!(query = %query, "querying fabric");
        let current = self.fabric.fetch(&query).await?;
        Ok(TaskOutcome::queried(current))
    }
}

/// Writes and deletes address exactly one object; every level must be named.
fn require_dn(address: &MoAddress) -> Result<String, CoreError> {
    address.dn().ok_or_else(|| CoreError::Validation {
        message: "every hierarchy level must be named to address a single object".into(),
    })
}
