//! Bridging of download-listener callbacks to the remote runtime.

use std::sync::Arc;

use hostbridge_runtime::{
    BridgedInstance, Completion, DisposalCoordinator, EventProxy, InstanceRegistry, Result,
    Transport,
};
use serde_json::json;

/// Capability set a download listener must expose to be bridged.
pub trait DownloadListener: BridgedInstance {}

/// Forwards download-listener callbacks to the remote runtime.
pub struct DownloadListenerProxy {
    proxy: EventProxy,
    disposer: DisposalCoordinator,
}

impl DownloadListenerProxy {
    pub fn new(registry: Arc<InstanceRegistry>, remote: Option<Arc<dyn Transport>>) -> Self {
        Self {
            proxy: EventProxy::new(Arc::clone(&registry), remote.clone()),
            disposer: DisposalCoordinator::new(registry, remote),
        }
    }

    /// Forwards a download request notification.
    ///
    /// `content_length` is the server-declared length, `-1` when unknown.
    pub async fn on_download_start<L: DownloadListener>(
        &self,
        listener: &Arc<L>,
        url: &str,
        content_length: i64,
        completion: Completion<()>,
    ) -> Result<()> {
        let listener_id = self.proxy.require_identifier(listener)?;

        if let Err(error) = self
            .proxy
            .forward(
                "onDownloadStart",
                listener_id,
                Vec::new(),
                vec![json!(url), json!(content_length)],
            )
            .await
        {
            tracing::warn!(%error, "download forward failed; completing with default");
        }
        completion.complete(());
        Ok(())
    }

    /// Tells the remote runtime the listener reference is gone and removes
    /// the registry entry. Redundant disposes complete immediately.
    pub async fn dispose<L: DownloadListener>(&self, listener: &Arc<L>, completion: Completion<()>) {
        self.disposer.dispose(listener, completion).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostbridge_protocol::ReplyMessage;
    use hostbridge_runtime::{ChannelTransport, ReferenceKind};

    struct Listener;

    impl BridgedInstance for Listener {
        fn type_name(&self) -> &'static str {
            "Listener"
        }
    }

    impl DownloadListener for Listener {}

    #[tokio::test]
    async fn download_start_carries_url_and_length() {
        let registry = Arc::new(InstanceRegistry::new());
        let (transport, mut requests) = ChannelTransport::pair();
        let proxy = DownloadListenerProxy::new(Arc::clone(&registry), Some(Arc::new(transport)));

        let listener = Arc::new(Listener);
        let listener_id = registry.register(&listener, ReferenceKind::Strong);

        let responder = tokio::spawn(async move {
            let request = requests.recv().await.unwrap();
            let call = request.message.as_call().unwrap().clone();
            request.reply.send(ReplyMessage::Void).unwrap();
            call
        });

        let (completion, done) = Completion::channel();
        proxy
            .on_download_start(&listener, "https://example.com/a.zip", 1024, completion)
            .await
            .unwrap();
        done.await.unwrap();

        let sent = responder.await.unwrap();
        assert_eq!(sent.method, "onDownloadStart");
        assert_eq!(sent.self_id, listener_id);
        assert!(sent.param_ids.is_empty());
        assert_eq!(sent.args[0], "https://example.com/a.zip");
        assert_eq!(sent.args[1], 1024);
    }
}
