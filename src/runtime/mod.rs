//! Access to the container runtime.
//!
//! The runtime is queried for the list of all containers (running or not) and, per
//! container, for the host configuration holding its CPU-set restriction.
mod docker;
mod error;
#[cfg(test)]
pub(crate) mod mock;
pub mod socket;

pub use docker::DockerClient;
pub use error::{Error, Result};

use crate::container::{self, ContainerID};
use crate::error::ResultOkLogExt;

/// Affinity reported for containers without an explicit CPU-set restriction.
pub const UNRESTRICTED_CPUSET: &str = "All";

/// One entry of the runtime's container list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSummary {
    pub id: ContainerID,
    pub names: Vec<String>,
    pub state: String,
}

/// A container list entry as the runtime sends it, before its id is validated.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawContainerSummary {
    #[serde(rename = "Id", default)]
    pub id: String,
    #[serde(rename = "Names", default)]
    pub names: Vec<String>,
    #[serde(rename = "State", default)]
    pub state: String,
}

impl TryFrom<RawContainerSummary> for ContainerSummary {
    type Error = container::Error;

    fn try_from(raw: RawContainerSummary) -> container::Result<Self> {
        Ok(Self {
            id: ContainerID::try_from(raw.id)?,
            names: raw.names,
            state: raw.state,
        })
    }
}

/// Validates raw list entries, logging and skipping those with an unusable id.
pub fn validate_summaries(raw: Vec<RawContainerSummary>) -> Vec<ContainerSummary> {
    raw.into_iter()
        .filter_map(|summary| ContainerSummary::try_from(summary).ok_log())
        .collect()
}

/// The host resource limits of a container, as far as the reporter cares about them.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct HostConfig {
    #[serde(rename = "CpusetCpus", default)]
    pub cpuset_cpus: String,
}

/// A queryable container runtime.
pub trait ContainerRuntime: Send + Sync + 'static {
    /// Lists all containers, including stopped ones.
    fn list_containers(&self) -> impl Future<Output = Result<Vec<ContainerSummary>>> + Send;

    /// Inspects a single container and returns its host configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RuntimeUnavailable`] if the runtime cannot be reached and
    /// [`Error::InspectFailed`] for any other failure concerning this container.
    fn host_config(&self, id: &ContainerID) -> impl Future<Output = Result<HostConfig>> + Send;

    /// Returns the CPU-set a container is pinned to, or [`UNRESTRICTED_CPUSET`].
    fn cpuset(&self, id: &ContainerID) -> impl Future<Output = Result<String>> + Send {
        async move {
            let host_config = self.host_config(id).await?;
            Ok(normalize_cpuset(host_config.cpuset_cpus))
        }
    }
}

/// Maps an empty CPU-set restriction to [`UNRESTRICTED_CPUSET`].
pub fn normalize_cpuset(cpuset: String) -> String {
    if cpuset.is_empty() {
        UNRESTRICTED_CPUSET.to_owned()
    } else {
        cpuset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_cpuset() {
        assert_eq!(normalize_cpuset(String::new()), "All");
        assert_eq!(normalize_cpuset(" ".to_owned()), " ");
        assert_eq!(normalize_cpuset("0-3".to_owned()), "0-3");
        assert_eq!(normalize_cpuset("0,2,4-7".to_owned()), "0,2,4-7");
    }

    #[test]
    fn test_decode_container_summary() {
        let raw = r#"[
            {"Id": "c1", "Names": ["/web"], "State": "running", "Image": "nginx"},
            {"Id": "c2", "Names": ["/db"], "State": "exited"}
        ]"#;
        let raw: Vec<RawContainerSummary> = serde_json::from_str(raw).unwrap();
        let containers = validate_summaries(raw);
        assert_eq!(containers.len(), 2);
        assert_eq!(containers[0].id.as_str(), "c1");
        assert_eq!(containers[0].names, vec!["/web".to_owned()]);
        assert_eq!(containers[1].state, "exited");
    }

    #[test]
    fn test_validate_summaries_skips_unusable_ids() {
        let raw = format!(
            r#"[{{"Id": "{}"}}, {{"Id": ""}}, {{"Names": ["/anonymous"]}}, {{"Id": "c1"}}]"#,
            "a".repeat(256)
        );
        let raw: Vec<RawContainerSummary> = serde_json::from_str(&raw).unwrap();
        let containers = validate_summaries(raw);

        let ids: Vec<&str> = containers.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1"]);
    }

    #[test]
    fn test_decode_host_config_without_cpuset() {
        let host_config: HostConfig = serde_json::from_str(r#"{"Memory": 0}"#).unwrap();
        assert_eq!(host_config, HostConfig::default());
    }

    #[tokio::test]
    async fn test_cpuset_normalizes_unrestricted_containers() {
        let runtime = mock::MockRuntime::new(&[("c1", "0-3"), ("c2", "")]);
        let c1 = ContainerID::new("c1").unwrap();
        let c2 = ContainerID::new("c2").unwrap();

        assert_eq!(runtime.cpuset(&c1).await.unwrap(), "0-3");
        assert_eq!(runtime.cpuset(&c2).await.unwrap(), "All");
    }
}
