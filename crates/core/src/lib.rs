//! hostbridge: bridge native platform objects to a remote scripting runtime.
//!
//! The bridge gives every wrapped native object a stable, never-reused
//! identifier, forwards its callback invocations to the remote runtime as
//! asynchronous calls, translates replies back into the native callback's
//! completion, and releases remote state when the object goes away.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use hostbridge::{
//!     ChannelTransport, Completion, ContentView, InstanceRegistry, ReferenceKind, ViewClient,
//!     ViewClientProxy,
//! };
//!
//! # struct ChromeClient; struct WebView;
//! # impl hostbridge::BridgedInstance for ChromeClient {
//! #     fn type_name(&self) -> &'static str { "ChromeClient" }
//! # }
//! # impl hostbridge::BridgedInstance for WebView {
//! #     fn type_name(&self) -> &'static str { "WebView" }
//! # }
//! # impl ViewClient for ChromeClient {}
//! # impl ContentView for WebView {}
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = Arc::new(InstanceRegistry::new());
//!     let (transport, requests) = ChannelTransport::pair();
//!     // Hand `requests` to the embedded remote runtime...
//!
//!     let client = Arc::new(ChromeClient);
//!     let view = Arc::new(WebView);
//!     registry.register(&client, ReferenceKind::Strong);
//!     registry.register(&view, ReferenceKind::Strong);
//!
//!     let proxy = ViewClientProxy::new(Arc::clone(&registry), Some(Arc::new(transport)));
//!     let (completion, chosen) = Completion::channel();
//!     proxy.on_show_file_chooser(&client, &view, completion).await?;
//!     let uris = chosen.await?;
//!     Ok(())
//! }
//! ```

pub mod download;
pub mod resource;
pub mod view_client;

pub use download::{DownloadListener, DownloadListenerProxy};
pub use resource::ResourceUri;
pub use view_client::{ContentView, ViewClient, ViewClientProxy};

// Re-export the runtime and protocol surface adapters are built against.
pub use hostbridge_protocol::{CallMessage, DisposeMessage, OutboundMessage, ReplyMessage};
pub use hostbridge_runtime::{
    BridgedInstance, ChannelTransport, Completion, DisposalCoordinator, Error, EventProxy,
    FIRST_IDENTIFIER, InstanceRegistry, PendingReply, ReferenceKind, Result, Transport,
    TransportRequest,
};
