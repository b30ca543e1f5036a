use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use crate::config::ListenAddr;
use crate::error::ResultOkLogExt;
use crate::runtime::ContainerRuntime;

mod service;

pub use service::{Error, ReportService, Result};

async fn report<R: ContainerRuntime>(
    State(service): State<Arc<ReportService<R>>>,
    uri: Uri,
) -> Response {
    log::info!("{}", uri);
    match service.render().await {
        Ok(raw) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            raw,
        )
            .into_response(),
        Err(err) => {
            log::error!("error: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

/// Returns the router exposing the report endpoint.
pub fn router<R: ContainerRuntime>(service: Arc<ReportService<R>>) -> axum::Router {
    axum::Router::new()
        .route("/report", get(report::<R>))
        .with_state(service)
}

pub struct APIServer {
    router: axum::Router,
}

impl APIServer {
    pub fn new<R: ContainerRuntime>(service: ReportService<R>) -> Self {
        Self {
            router: router(Arc::new(service)),
        }
    }

    /// Serves reports on `addr` until `shutdown` resolves.
    ///
    /// Unix sockets are created fresh: a leftover socket file from an earlier run is
    /// replaced, and the file is removed again once the server stops.
    pub async fn listen(
        self,
        addr: &ListenAddr,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> std::io::Result<()> {
        match addr {
            ListenAddr::Tcp(addr) => {
                let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
                log::info!("Serving reports on http://{}", listener.local_addr()?);
                axum::serve(listener, self.router)
                    .with_graceful_shutdown(shutdown)
                    .await
            }
            ListenAddr::Unix(path) => {
                prepare_socket_path(path).await?;
                let listener = tokio::net::UnixListener::bind(path)?;
                log::info!("Serving reports on {}", addr);
                let result = axum::serve(listener, self.router)
                    .with_graceful_shutdown(shutdown)
                    .await;
                tokio::fs::remove_file(path)
                    .await
                    .ok_log_context("failed to remove report socket");
                result
            }
        }
    }
}

async fn prepare_socket_path(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            log::debug!("Removed stale socket `{}`", path.display());
            Ok(())
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}
