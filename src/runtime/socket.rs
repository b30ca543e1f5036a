use std::path::{Path, PathBuf};

use http_body_util::Empty;
use hyper::body::Bytes;
use hyper::client::conn::http1::SendRequest;
use hyper_util::rt::TokioIo;

use super::{Error, Result};

/// Opens a new HTTP/1 connection over the unix socket at `path`.
///
/// The connection driver is spawned onto the current runtime and finishes once the
/// returned [`SendRequest`] is dropped.
pub async fn connect(path: impl AsRef<Path>) -> Result<SendRequest<Empty<Bytes>>> {
    let path = path.as_ref();
    log::trace!("Connecting to {}...", path.display());
    let stream = tokio::net::UnixStream::connect(path)
        .await
        .map_err(|source| unavailable(path, source))?;

    let (sender, connection) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
        .await
        .map_err(|source| unavailable(path, source))?;
    log::trace!("Connected to {}.", path.display());

    let socket = path.to_path_buf();
    tokio::spawn(async move {
        if let Err(err) = connection.await {
            log::debug!("connection to `{}` closed: {}", socket.display(), err);
        }
    });

    Ok(sender)
}

fn unavailable(
    path: &Path,
    source: impl std::error::Error + Send + Sync + 'static,
) -> Error {
    Error::RuntimeUnavailable {
        path: PathBuf::from(path),
        source: Box::new(source),
    }
}
