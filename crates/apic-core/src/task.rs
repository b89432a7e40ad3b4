// Invocation result surface.
//
// Mirrors the four-way view a declarative run exposes: the state before
// (`previous`), the assembled desired state (`proposed`), the minimal
// patch transmitted (`sent`), and the state after (`current`).

use serde::Serialize;

use apic_api::models::ManagedObject;

/// Outcome of one reconciliation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskOutcome {
    /// Whether a write or delete was actually issued.
    pub changed: bool,

    /// Post-operation fetched state.
    pub current: Vec<ManagedObject>,

    /// Pre-operation fetched state.
    pub previous: Vec<ManagedObject>,

    /// Assembled desired state from the provided parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposed: Option<ManagedObject>,

    /// The minimal configuration actually transmitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent: Option<ManagedObject>,
}

impl TaskOutcome {
    /// A read-only outcome: `current` is the query result, nothing changed.
    pub fn queried(current: Vec<ManagedObject>) -> Self {
        Self {
            current,
            ..Self::default()
        }
    }
}
