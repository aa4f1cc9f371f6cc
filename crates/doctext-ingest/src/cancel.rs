//! Request cancellation.

use tokio::sync::watch;

/// Fires a cancellation observed by every clone of the paired signal.
#[derive(Debug)]
pub struct CancellationHandle {
    tx: watch::Sender<bool>,
}

/// Cheap, cloneable view of a cancellation flag.
#[derive(Debug, Clone)]
pub struct CancellationSignal {
    rx: watch::Receiver<bool>,
}

/// Create a connected handle/signal pair.
pub fn cancellation() -> (CancellationHandle, CancellationSignal) {
    let (tx, rx) = watch::channel(false);
    (CancellationHandle { tx }, CancellationSignal { rx })
}

impl CancellationHandle {
    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// A new signal tied to this handle.
    pub fn signal(&self) -> CancellationSignal {
        CancellationSignal {
            rx: self.tx.subscribe(),
        }
    }
}

impl CancellationSignal {
    /// A signal that is never cancelled.
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }
}
