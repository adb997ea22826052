//! Transport interface to the remote runtime.
//!
//! The wire transport is an external collaborator; this module pins down
//! the contract the bridge relies on - `send` hands a message over and
//! returns the pending reply - and ships one in-process pairing used when
//! the remote runtime is embedded in the same process (and by tests).

use std::future::Future;
use std::pin::Pin;

use hostbridge_protocol::{OutboundMessage, ReplyMessage};
use tokio::sync::{mpsc, oneshot};

use crate::error::{Error, Result};

/// Pending reply for a message already handed to the transport.
///
/// Resolves exactly once and never before the message was handed over.
pub type PendingReply = Pin<Box<dyn Future<Output = Result<ReplyMessage>> + Send>>;

/// Asynchronous message channel to the remote runtime.
///
/// Assumed reliable while the remote runtime is alive. There is no timeout
/// layer: a reply the remote never produces leaves the pending future
/// unresolved indefinitely.
pub trait Transport: Send + Sync {
    /// Delivers a message to the remote runtime, returning its pending
    /// reply. The message is handed over before this returns.
    fn send(&self, message: OutboundMessage) -> PendingReply;
}

/// A message plus the single-use channel its reply travels back on.
pub struct TransportRequest {
    pub message: OutboundMessage,
    pub reply: oneshot::Sender<ReplyMessage>,
}

/// In-process transport half.
///
/// [`pair`](Self::pair) yields the transport and the request receiver the
/// embedded remote runtime (or a test responder task) consumes. Dropping a
/// request without replying reproduces the lost-reply gap at the caller;
/// a closed receiver surfaces as [`Error::ChannelClosed`].
pub struct ChannelTransport {
    outbound: mpsc::UnboundedSender<TransportRequest>,
}

impl ChannelTransport {
    pub fn pair() -> (Self, mpsc::UnboundedReceiver<TransportRequest>) {
        let (outbound, requests) = mpsc::unbounded_channel();
        (Self { outbound }, requests)
    }
}

impl Transport for ChannelTransport {
    fn send(&self, message: OutboundMessage) -> PendingReply {
        // Enqueued synchronously so the reply future cannot observe an
        // unsent message.
        let (tx, rx) = oneshot::channel();
        let queued = self.outbound.send(TransportRequest { message, reply: tx });

        Box::pin(async move {
            if queued.is_err() {
                tracing::warn!("remote runtime request receiver is gone");
                return Err(Error::ChannelClosed);
            }
            rx.await.map_err(|_| Error::ChannelClosed)
        })
    }
}
