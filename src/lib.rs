//! EPA reporter: a topology plugin exposing the CPU affinity of every container on a host.
//!
//! On each request to `/report` the reporter lists all containers known to the local
//! Docker daemon, inspects their CPU-set restriction and answers with a topology document
//! the visualization host merges into its graph.
use tokio::signal::unix::{SignalKind, signal};

use error::ResultOkLogExt;

pub mod api;
pub mod config;
pub mod container;
pub mod error;
pub mod runtime;
pub mod topology;

/// Runs the reporter until it receives Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Possible errors include:
/// - Invalid configuration in the environment (e.g., an unsupported `DOCKER_HOST`).
/// - The container runtime not answering on its control socket at startup.
/// - Failure to bind the listen address.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::from_env()?;
    log::debug!("Config: {:?}", config);

    let mut runtime = runtime::DockerClient::new(&config.docker_socket);
    if let Some(ref version) = config.docker_api_version {
        runtime = runtime.with_api_version(version.as_str());
    }
    if let Err(err) = runtime.ping().await {
        log::error!(
            "Container runtime at `{}` is not reachable: {}",
            runtime.socket_path().display(),
            err
        );
        return Err(err.into());
    }

    let service = api::ReportService::new(runtime, topology::TopologyBuilder::default());
    api::APIServer::new(service)
        .listen(&config.listen, shutdown_signal())
        .await?;
    log::info!("Reporter stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c()
            .await
            .ok_log_context("failed to listen for Ctrl-C")
            .is_none()
        {
            std::future::pending::<()>().await;
        }
    };
    let terminate = async {
        match signal(SignalKind::terminate()).ok_log_context("failed to listen for SIGTERM") {
            Some(mut stream) => {
                stream.recv().await;
            }
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("Shutting down");
}
