//! Cooperative cancellation for pipeline runs.
//!
//! A `CancelHandle` fires once; every cloned `CancelToken` observes it. A
//! dropped handle that never fired means "never cancelled".

use tokio::sync::watch;

pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

#[derive(Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

/// Creates a connected handle/token pair.
pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

impl CancelHandle {
    pub fn cancel(&self) {
        // send_replace succeeds even when every token is gone.
        self.tx.send_replace(true);
    }
}

impl CancelToken {
    /// A token that can never be cancelled.
    #[cfg(test)]
    pub fn never() -> Self {
        cancel_pair().1
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation is requested; pends forever otherwise.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                // Handle dropped without firing.
                std::future::pending::<()>().await;
            }
        }
    }
}
