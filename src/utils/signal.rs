use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

#[cfg(not(unix))]
use futures::future::BoxFuture;
#[cfg(unix)]
use tokio::signal::unix::{Signal, SignalKind};

/// Resolves once the process receives a shutdown signal.
pub struct SignalHandler {
    #[cfg(unix)]
    signals: smallvec::SmallVec<[(SignalKind, Signal); 3]>,
    #[cfg(not(unix))]
    signals: BoxFuture<'static, std::io::Result<()>>,
}

impl SignalHandler {
    pub fn new() -> Self {
        trace!("registering signal listeners");

        #[cfg(unix)]
        {
            use tokio::signal::unix;

            let kinds = [
                SignalKind::interrupt(),
                SignalKind::terminate(),
                SignalKind::quit(),
            ];

            let signals = kinds
                .into_iter()
                .filter_map(|kind| {
                    unix::signal(kind)
                        .inspect_err(|error| {
                            error!("failed to initialize signal listener {kind:?}: {error}")
                        })
                        .ok()
                        .map(|signal| (kind, signal))
                })
                .collect();

            SignalHandler { signals }
        }

        #[cfg(not(unix))]
        {
            SignalHandler {
                signals: Box::pin(tokio::signal::ctrl_c()),
            }
        }
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Future for SignalHandler {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        #[cfg(unix)]
        {
            for (kind, signal) in &mut self.signals {
                if signal.poll_recv(cx).is_ready() {
                    info!("received {kind:?}, shutting down");
                    return Poll::Ready(());
                }
            }
        }

        #[cfg(not(unix))]
        {
            if self.signals.as_mut().poll(cx).is_ready() {
                info!("received ctrl-c, shutting down");
                return Poll::Ready(());
            }
        }

        Poll::Pending
    }
}
