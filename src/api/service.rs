use crate::runtime::{self, ContainerRuntime};
use crate::topology::TopologyBuilder;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to build report: {0}")]
    Build(#[from] runtime::Error),
    #[error("failed to serialize report: {0}")]
    Serialization(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Produces serialized reports, one at a time.
///
/// Concurrent callers queue on an internal lock, so the runtime queries of two reports
/// never interleave.
#[derive(Debug)]
pub struct ReportService<R> {
    runtime: R,
    builder: TopologyBuilder,
    lock: tokio::sync::Mutex<()>,
}

impl<R: ContainerRuntime> ReportService<R> {
    pub fn new(runtime: R, builder: TopologyBuilder) -> Self {
        Self {
            runtime,
            builder,
            lock: tokio::sync::Mutex::new(()),
        }
    }

    #[cfg(test)]
    pub(crate) fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Builds a fresh report and encodes it as JSON.
    pub async fn render(&self) -> Result<Vec<u8>> {
        let _guard = self.lock.lock().await;
        let report = self.builder.make_report(&self.runtime).await?;
        serde_json::to_vec(&report).map_err(Error::Serialization)
    }
}
