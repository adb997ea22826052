//! Disposal of bridged instances.

use std::sync::Arc;

use hostbridge_protocol::{DisposeMessage, OutboundMessage};

use crate::completion::Completion;
use crate::instance::BridgedInstance;
use crate::registry::InstanceRegistry;
use crate::transport::Transport;

/// Releases a native instance on both sides of the bridge.
///
/// Disposal is terminal: the entry is removed and its identifier never
/// reassigned. Disposing an unknown or already-disposed instance is not an
/// error - the completion fires immediately and no remote call is made.
pub struct DisposalCoordinator {
    registry: Arc<InstanceRegistry>,
    remote: Option<Arc<dyn Transport>>,
}

impl DisposalCoordinator {
    pub fn new(registry: Arc<InstanceRegistry>, remote: Option<Arc<dyn Transport>>) -> Self {
        Self { registry, remote }
    }

    /// Notifies the remote side (when the instance is tracked), completes
    /// the native disposal contract, then removes the registry entry.
    pub async fn dispose<T: BridgedInstance>(&self, instance: &Arc<T>, completion: Completion<()>) {
        if !self.registry.contains(instance) {
            completion.complete(());
            return;
        }

        let identifier = match self.registry.identifier_for(instance) {
            Ok(identifier) => identifier,
            Err(_) => {
                // The weak referent died between probe and lookup; there is
                // nothing left to tell the remote side about.
                completion.complete(());
                return;
            }
        };

        if let Some(remote) = &self.remote {
            let pending = remote.send(OutboundMessage::Dispose(DisposeMessage { identifier }));
            if let Err(error) = pending.await {
                tracing::warn!(identifier, %error, "dispose call failed; releasing entry anyway");
            }
        }

        completion.complete(());
        self.registry.remove(instance);
        tracing::debug!(identifier, "disposed instance");
    }
}
