//! Shared machinery for event-forwarding adapters.
//!
//! One adapter exists per bridged callback-source type; each is built on an
//! [`EventProxy`], which resolves identifiers through the shared registry
//! and turns a native callback invocation into a remote call.

use std::sync::Arc;

use hostbridge_protocol::{CallMessage, OutboundMessage, ReplyMessage};
use serde_json::Value;

use crate::error::Result;
use crate::instance::BridgedInstance;
use crate::registry::InstanceRegistry;
use crate::transport::Transport;

/// Base every per-callback-source adapter is built on.
///
/// Holds the shared registry handle and the optional remote endpoint. The
/// endpoint is checked once per forwarded call; when no responder is
/// configured the default reply is substituted so the native callback
/// contract still completes.
pub struct EventProxy {
    registry: Arc<InstanceRegistry>,
    remote: Option<Arc<dyn Transport>>,
}

impl EventProxy {
    pub fn new(registry: Arc<InstanceRegistry>, remote: Option<Arc<dyn Transport>>) -> Self {
        Self { registry, remote }
    }

    pub fn registry(&self) -> &Arc<InstanceRegistry> {
        &self.registry
    }

    /// Resolves the identifier an already-registered instance must have.
    ///
    /// Used for `self` and every object-typed parameter before any remote
    /// communication is attempted. A miss means the instance reached the
    /// bridge without being registered - the error aborts the forwarding
    /// attempt and is surfaced to the caller, never swallowed.
    pub fn require_identifier<T: BridgedInstance>(&self, instance: &Arc<T>) -> Result<u64> {
        self.registry.identifier_for(instance)
    }

    /// Forwards one native callback invocation as a remote call and awaits
    /// the reply.
    ///
    /// With no remote endpoint configured, returns the default reply
    /// ([`ReplyMessage::Void`]) without touching the transport.
    pub async fn forward(
        &self,
        method: &str,
        self_id: u64,
        param_ids: Vec<u64>,
        args: Vec<Value>,
    ) -> Result<ReplyMessage> {
        let Some(remote) = &self.remote else {
            tracing::debug!(method, self_id, "no remote responder; substituting default reply");
            return Ok(ReplyMessage::Void);
        };

        let call = CallMessage {
            method: method.to_string(),
            self_id,
            param_ids,
            args,
        };
        tracing::debug!(method, self_id, "forwarding callback");
        remote.send(OutboundMessage::Call(call)).await
    }
}
