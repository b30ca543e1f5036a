use std::path::{Path, PathBuf};

use http_body_util::{BodyExt, Empty};
use hyper::Request;
use hyper::body::Bytes;
use hyper::header::HOST;
use serde::de::DeserializeOwned;

use super::{
    ContainerRuntime, ContainerSummary, Error, HostConfig, RawContainerSummary, Result, socket,
    validate_summaries,
};
use crate::container::ContainerID;

/// Client for the Docker Engine API served on a local unix socket.
///
/// Every call opens its own connection; callers that need a consistent view across
/// several calls have to serialize access themselves.
#[derive(Debug, Clone)]
pub struct DockerClient {
    socket_path: PathBuf,
    api_version: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ContainerInspect {
    #[serde(rename = "HostConfig", default)]
    host_config: Option<HostConfig>,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorResponse {
    message: String,
}

impl DockerClient {
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
            api_version: None,
        }
    }

    /// Pins all requests to the given API version, e.g. `1.41`.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Checks that the daemon answers on its control socket.
    pub async fn ping(&self) -> Result<()> {
        let body = self.get("/_ping").await?;
        log::debug!(
            "Runtime at `{}` answered ping: {}",
            self.socket_path.display(),
            String::from_utf8_lossy(&body).trim()
        );
        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        match self.api_version {
            Some(ref version) => format!("/v{version}{path}"),
            None => path.to_owned(),
        }
    }

    async fn get(&self, path: &str) -> Result<Bytes> {
        let endpoint = self.endpoint(path);
        let request = Request::get(endpoint.as_str())
            .header(HOST, "docker")
            .body(Empty::<Bytes>::new())
            .map_err(|source| Error::Request {
                endpoint: endpoint.clone(),
                source,
            })?;

        let mut sender = socket::connect(&self.socket_path).await?;
        let response = sender
            .send_request(request)
            .await
            .map_err(|source| Error::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|source| Error::ReadBody {
                endpoint: endpoint.clone(),
                source,
            })?
            .to_bytes();
        log::trace!("GET {} -> {} ({} bytes)", endpoint, status, body.len());

        if !status.is_success() {
            return Err(Error::Status {
                endpoint,
                status,
                message: error_message(&body),
            });
        }

        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.get(path).await?;
        serde_json::from_slice(&body).map_err(|source| Error::Decode {
            endpoint: self.endpoint(path),
            source,
        })
    }
}

impl ContainerRuntime for DockerClient {
    async fn list_containers(&self) -> Result<Vec<ContainerSummary>> {
        let raw: Vec<RawContainerSummary> = self.get_json("/containers/json?all=true").await?;
        let listed = raw.len();
        let containers = validate_summaries(raw);
        log::debug!(
            "Found {} containers ({} skipped)",
            containers.len(),
            listed - containers.len()
        );
        Ok(containers)
    }

    async fn host_config(&self, id: &ContainerID) -> Result<HostConfig> {
        let inspect: ContainerInspect = self
            .get_json(&format!("/containers/{id}/json"))
            .await
            .map_err(|err| Error::inspect_failed(id, err))?;

        Ok(inspect.host_config.unwrap_or_default())
    }
}

/// Extracts the daemon's error message, falling back to the raw body.
fn error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(response) => response.message,
        Err(_) => String::from_utf8_lossy(body).trim().to_owned(),
    }
}
