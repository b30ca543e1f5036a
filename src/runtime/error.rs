use std::path::PathBuf;

use crate::container::ContainerID;

/// Errors raised while talking to the container runtime.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("container runtime unavailable at `{path}`: {source}")]
    RuntimeUnavailable {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("failed to build runtime request for `{endpoint}`: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: hyper::http::Error,
    },
    #[error("request `{endpoint}` to the container runtime failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: hyper::Error,
    },
    #[error("failed to read runtime response body for `{endpoint}`: {source}")]
    ReadBody {
        endpoint: String,
        #[source]
        source: hyper::Error,
    },
    #[error("container runtime answered `{endpoint}` with status {status}: {message}")]
    Status {
        endpoint: String,
        status: hyper::StatusCode,
        message: String,
    },
    #[error("failed to decode runtime response for `{endpoint}`: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to inspect container `{id}`: {source}")]
    InspectFailed {
        id: ContainerID,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wraps a failed inspect call for `id`.
    ///
    /// Connection failures stay [`Error::RuntimeUnavailable`] so callers can tell a dead
    /// runtime apart from a single container that could not be inspected.
    pub fn inspect_failed(id: &ContainerID, source: Error) -> Self {
        match source {
            err @ Error::RuntimeUnavailable { .. } => err,
            source => Error::InspectFailed {
                id: id.clone(),
                source: Box::new(source),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
