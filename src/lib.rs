#[macro_use]
extern crate tracing;

pub mod config;
pub mod domain;
pub mod error;
mod extractors;
mod handlers;
mod middlewares;
pub mod service;
mod state;
pub mod storage;
mod utils;

use crate::{middlewares::middlewares, utils::SignalHandler};
use error::Error;
use extractors::{Json, ValidatedJson};
pub use state::*;
use std::{future::IntoFuture, sync::Arc, time::Duration};
use tokio::{net::TcpListener, sync::Notify};
pub use utils::panic;

/// Serves the API on `listener` until a shutdown signal arrives.
///
/// In-flight requests get `shutdown_timeout` to finish after the signal.
pub async fn run<S: StateTrait>(
    listener: TcpListener,
    state: S,
    shutdown_timeout: Duration,
) -> anyhow::Result<()> {
    info!("listening on {}", listener.local_addr()?);

    let routes = handlers::routes::<S>();
    let app = middlewares(state, routes);

    let shutdown = Arc::new(Notify::new());
    let signal = {
        let shutdown = shutdown.clone();
        async move {
            SignalHandler::new().await;
            shutdown.notify_one();
        }
    };

    let server = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(signal)
        .into_future();

    tokio::select! {
        result = server => result?,
        () = async {
            shutdown.notified().await;
            tokio::time::sleep(shutdown_timeout).await;
        } => warn!("graceful shutdown timed out after {shutdown_timeout:?}"),
    }

    Ok(())
}
