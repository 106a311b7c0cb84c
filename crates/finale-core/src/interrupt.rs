use std::future::Future;

use futures::FutureExt;
use futures::future::{self, BoxFuture};
use tokio::sync::oneshot;

/// Create a manually fired interrupt.
pub fn channel() -> (InterruptTrigger, Interrupt) {
    let (tx, rx) = oneshot::channel();

    let interrupt = Interrupt::from_future(async move {
        if rx.await.is_err() {
            log::warn!("Interrupt trigger dropped without firing");
            future::pending::<()>().await;
        }
    });

    (InterruptTrigger { tx }, interrupt)
}

/// One-shot external event that starts the finalizers.
pub struct Interrupt {
    event: BoxFuture<'static, ()>,
}

impl Interrupt {
    /// Bind any one-shot source, such as an OS signal.
    pub fn from_future<F>(event: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            event: event.boxed(),
        }
    }

    /// Already fired
    pub fn immediate() -> Self {
        Self::from_future(future::ready(()))
    }

    /// Never fires
    pub fn never() -> Self {
        Self::from_future(future::pending())
    }

    pub(crate) async fn wait(self) {
        self.event.await
    }
}

/// Fires the paired `Interrupt`. Dropping it unfired means the interrupt
/// never arrives.
pub struct InterruptTrigger {
    tx: oneshot::Sender<()>,
}

impl InterruptTrigger {
    pub fn fire(self) {
        let _ = self.tx.send(());
    }
}
