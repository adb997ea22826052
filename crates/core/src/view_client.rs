//! Bridging of view-client callbacks to the remote runtime.
//!
//! A view client is the native object that owns a family of UI callbacks
//! for a content view: load-progress updates and file-chooser requests.
//! [`ViewClientProxy`] is the adapter for that family - it intercepts each
//! native callback invocation, resolves instance identifiers through the
//! shared registry, forwards an equivalent remote call, and translates the
//! reply back into the native callback's completion.

use std::sync::Arc;

use hostbridge_runtime::{
    BridgedInstance, Completion, DisposalCoordinator, EventProxy, InstanceRegistry, Result,
    Transport,
};
use serde_json::json;

use crate::resource::ResourceUri;

/// Capability set a view client must expose to be bridged.
pub trait ViewClient: BridgedInstance {}

/// Capability set a content view must expose to be bridged.
pub trait ContentView: BridgedInstance {}

/// Forwards view-client callbacks to the remote runtime.
///
/// One proxy per bridged client type, sharing the registry and remote
/// endpoint with every other adapter. With no remote endpoint configured,
/// every callback completes with its default reply - a native callback is
/// never left permanently unresolved by an absent responder.
pub struct ViewClientProxy {
    proxy: EventProxy,
    disposer: DisposalCoordinator,
}

impl ViewClientProxy {
    pub fn new(registry: Arc<InstanceRegistry>, remote: Option<Arc<dyn Transport>>) -> Self {
        Self {
            proxy: EventProxy::new(Arc::clone(&registry), remote.clone()),
            disposer: DisposalCoordinator::new(registry, remote),
        }
    }

    /// Forwards a load-progress update.
    ///
    /// Completes once the remote side has acknowledged the update, or
    /// immediately on a transport failure or absent responder. Fails
    /// without completing when either instance is unregistered - that is a
    /// lifetime-tracking bug the caller must see.
    pub async fn on_progress_changed<C, V>(
        &self,
        client: &Arc<C>,
        view: &Arc<V>,
        progress: u64,
        completion: Completion<()>,
    ) -> Result<()>
    where
        C: ViewClient,
        V: ContentView,
    {
        let client_id = self.proxy.require_identifier(client)?;
        let view_id = self.proxy.require_identifier(view)?;

        if let Err(error) = self
            .proxy
            .forward(
                "onProgressChanged",
                client_id,
                vec![view_id],
                vec![json!(progress)],
            )
            .await
        {
            tracing::warn!(%error, "progress forward failed; completing with default");
        }
        completion.complete(());
        Ok(())
    }

    /// Forwards a file-chooser request.
    ///
    /// The reply's ordered sequence of N path strings becomes a sequence of
    /// exactly N [`ResourceUri`]s: `uris[i]` derives from `paths[i]`, no
    /// reordering, no drops. A malformed reply or absent responder
    /// completes with the empty default instead.
    ///
    /// Returns `true` when the chooser request was consumed by the bridge.
    pub async fn on_show_file_chooser<C, V>(
        &self,
        client: &Arc<C>,
        view: &Arc<V>,
        completion: Completion<Vec<ResourceUri>>,
    ) -> Result<bool>
    where
        C: ViewClient,
        V: ContentView,
    {
        let client_id = self.proxy.require_identifier(client)?;
        let view_id = self.proxy.require_identifier(view)?;

        let reply = match self
            .proxy
            .forward("onShowFileChooser", client_id, vec![view_id], Vec::new())
            .await
        {
            Ok(reply) => reply,
            Err(error) => {
                tracing::warn!(%error, "file chooser forward failed; completing with default");
                completion.complete(Vec::new());
                return Ok(true);
            }
        };

        let uris = match reply.into_string_values() {
            Some(paths) => paths
                .iter()
                .map(|path| ResourceUri::from_file_path(path))
                .collect(),
            None => {
                tracing::warn!("file chooser reply was not a string sequence; completing with default");
                Vec::new()
            }
        };
        completion.complete(uris);
        Ok(true)
    }

    /// Tells the remote runtime the client reference is gone and removes
    /// the registry entry. Redundant disposes complete immediately.
    pub async fn dispose<C: ViewClient>(&self, client: &Arc<C>, completion: Completion<()>) {
        self.disposer.dispose(client, completion).await;
    }
}
