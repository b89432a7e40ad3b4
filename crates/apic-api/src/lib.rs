// apic-api: Async Rust client for the Cisco APIC object-tree REST API

pub mod auth;
pub mod dn;
pub mod error;
pub mod models;
pub mod rest;
pub mod transport;

pub use dn::{MoAddress, MoQuery};
pub use error::Error;
pub use models::{ManagedObject, MoRecord};
pub use rest::ApicClient;
pub use transport::{TlsMode, TransportConfig};
