// apic-core: Declarative reconciliation layer between apic-api and consumers.

pub mod config;
pub mod diff;
pub mod error;
pub mod fabric;
pub mod modules;
pub mod reconcile;
pub mod task;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{FabricConfig, TlsVerification};
pub use error::CoreError;
pub use fabric::{ApicFabric, Fabric};
pub use modules::match_as_path_regex_term::{TermParams, TermState};
pub use reconcile::{Plan, Reconciler};
pub use task::TaskOutcome;
