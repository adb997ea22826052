//! hostbridge runtime - instance registry, transport interface, and the
//! machinery event-forwarding adapters are built on.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │  hostbridge  │  Per-callback-source adapters (view client, ...)
//! └──────┬───────┘
//!        │ built on
//! ┌──────▼───────┐
//! │   runtime    │  This crate
//! │  ┌────────┐  │
//! │  │Registry│  │  identity ↔ identifier, strong/weak holding
//! │  └────────┘  │
//! │  ┌────────┐  │
//! │  │ Proxy  │  │  identifier resolution + call forwarding
//! │  └────────┘  │
//! │  ┌────────┐  │
//! │  │Dispose │  │  remote release + entry removal
//! │  └────────┘  │
//! └──────┬───────┘
//!        │ sends through
//! ┌──────▼───────┐
//! │  Transport   │  External: send(message) -> pending reply
//! └──────────────┘
//! ```
//!
//! # Threading discipline
//!
//! Registry mutation and remote-call issuance belong to the bridge's tokio
//! context. Native callbacks originating on platform-owned threads must be
//! marshaled onto it (e.g. via `tokio::runtime::Handle::spawn`) rather than
//! calling in directly; the native contract's own completion mechanism
//! delivers the eventual result, so no platform thread ever blocks on a
//! reply.

pub mod completion;
pub mod dispose;
pub mod error;
pub mod instance;
pub mod proxy;
pub mod registry;
pub mod transport;

// Re-export key types at crate root
pub use completion::Completion;
pub use dispose::DisposalCoordinator;
pub use error::{Error, Result};
pub use instance::BridgedInstance;
pub use proxy::EventProxy;
pub use registry::{FIRST_IDENTIFIER, InstanceRegistry, ReferenceKind};
pub use transport::{ChannelTransport, PendingReply, Transport, TransportRequest};
