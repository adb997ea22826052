//! Single-use completions for native callback contracts.

use tokio::sync::oneshot;

/// One-shot completion handed to the bridge by native callback glue.
///
/// Wraps whatever completion mechanism the native contract uses - a value
/// callback, a oneshot sender - as a value that can be fired exactly once.
/// Exactly-once is enforced by the type system: [`complete`](Self::complete)
/// consumes the completion.
pub struct Completion<T> {
    deliver: Box<dyn FnOnce(T) + Send>,
}

impl<T: Send + 'static> Completion<T> {
    /// Wraps a delivery closure.
    pub fn new(deliver: impl FnOnce(T) + Send + 'static) -> Self {
        Self {
            deliver: Box::new(deliver),
        }
    }

    /// Wraps a oneshot sender; delivery to a dropped receiver is a no-op.
    pub fn from_sender(sender: oneshot::Sender<T>) -> Self {
        Self::new(move |value| {
            let _ = sender.send(value);
        })
    }

    /// Builds a completion paired with the receiver its value arrives on.
    pub fn channel() -> (Self, oneshot::Receiver<T>) {
        let (tx, rx) = oneshot::channel();
        (Self::from_sender(tx), rx)
    }

    /// Delivers the value to the native side.
    pub fn complete(self, value: T) {
        (self.deliver)(value);
    }
}

impl<T> std::fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn delivers_through_a_channel() {
        let (completion, rx) = Completion::channel();
        completion.complete(42u64);
        assert_eq!(rx.await.unwrap(), 42);
    }

    #[test]
    fn closure_runs_exactly_once() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let completion = Completion::new(move |()| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        completion.complete(());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropped_receiver_is_tolerated() {
        let (completion, rx) = Completion::<u64>::channel();
        drop(rx);
        completion.complete(7);
    }
}
