use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use super::{ContainerRuntime, ContainerSummary, Error, HostConfig, Result};
use crate::container::ContainerID;

/// In-memory runtime that records every call it receives.
#[derive(Debug, Default)]
pub(crate) struct MockRuntime {
    containers: Vec<(ContainerID, String)>,
    failing: Vec<ContainerID>,
    unavailable: bool,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
}

impl MockRuntime {
    pub(crate) fn new(containers: &[(&str, &str)]) -> Self {
        Self {
            containers: containers
                .iter()
                .map(|(id, cpuset)| (ContainerID::new(id).unwrap(), (*cpuset).to_owned()))
                .collect(),
            ..Self::default()
        }
    }

    pub(crate) fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub(crate) fn with_failing(mut self, id: &str) -> Self {
        self.failing.push(ContainerID::new(id).unwrap());
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(&self, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.unavailable {
            return Err(Error::RuntimeUnavailable {
                path: PathBuf::from("/mock/docker.sock"),
                source: "connection refused".into(),
            });
        }
        Ok(())
    }
}

impl ContainerRuntime for MockRuntime {
    async fn list_containers(&self) -> Result<Vec<ContainerSummary>> {
        self.record("list".to_owned()).await?;
        Ok(self
            .containers
            .iter()
            .map(|(id, _)| ContainerSummary {
                id: id.clone(),
                names: Vec::default(),
                state: "running".to_owned(),
            })
            .collect())
    }

    async fn host_config(&self, id: &ContainerID) -> Result<HostConfig> {
        self.record(format!("inspect {id}")).await?;
        if self.failing.contains(id) {
            return Err(Error::inspect_failed(
                id,
                Error::Status {
                    endpoint: format!("/containers/{id}/json"),
                    status: hyper::StatusCode::NOT_FOUND,
                    message: format!("No such container: {id}"),
                },
            ));
        }
        let cpuset_cpus = self
            .containers
            .iter()
            .find(|(container_id, _)| container_id == id)
            .map(|(_, cpuset)| cpuset.clone())
            .unwrap_or_default();
        Ok(HostConfig { cpuset_cpus })
    }
}
