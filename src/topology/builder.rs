use std::collections::{BTreeMap, HashMap};

use super::{MetadataTemplate, Node, PluginSpec, Report, Topology, resolve_affinity};
use crate::container::ContainerID;
use crate::runtime::{self, ContainerRuntime};

/// Attribute id of the CPU affinity attribute.
pub const AFFINITY: &str = "affinity";

/// Entity type tag appended to container ids to form node keys.
pub const CONTAINER_TAG: &str = ";<container>";

const METADATA_TEMPLATES: &[MetadataTemplate] = &[MetadataTemplate {
    id: AFFINITY,
    label: "CPU Affinity",
    format: "latest",
    priority: 0.1,
}];

const PLUGINS: &[PluginSpec] = &[PluginSpec {
    id: "epa",
    label: "epa",
    description: "Show EPA information for container",
    interfaces: &["reporter"],
    api_version: "1",
}];

/// Returns the node key of a container, e.g. `abc123;<container>`.
pub fn entity_key(id: &ContainerID) -> String {
    let mut key = String::with_capacity(id.as_str().len() + CONTAINER_TAG.len());
    key.push_str(id.as_str());
    key.push_str(CONTAINER_TAG);
    key
}

/// Assembles topology documents from a container runtime.
///
/// The metadata templates and plugin descriptors are fixed when the builder is created
/// and shared by every report it produces.
#[derive(Debug, Clone)]
pub struct TopologyBuilder {
    metadata_templates: BTreeMap<&'static str, MetadataTemplate>,
    plugins: Vec<PluginSpec>,
}

impl Default for TopologyBuilder {
    fn default() -> Self {
        Self {
            metadata_templates: METADATA_TEMPLATES
                .iter()
                .map(|template| (template.id, *template))
                .collect(),
            plugins: PLUGINS.to_vec(),
        }
    }
}

impl TopologyBuilder {
    /// Builds a fresh topology with one node per container known to the runtime.
    ///
    /// # Errors
    ///
    /// Fails as a whole if the container list or any single inspect call fails.
    pub async fn build_topology<R: ContainerRuntime>(
        &self,
        runtime: &R,
    ) -> runtime::Result<Topology> {
        let containers = runtime.list_containers().await?;
        let mut topology = Topology {
            nodes: HashMap::with_capacity(containers.len()),
            metadata_templates: self.metadata_templates.clone(),
        };

        for container in containers {
            log::trace!(
                "Resolving affinity of container `{}` (names={:?}, state={})",
                container.id,
                container.names,
                container.state
            );
            let cpuset = runtime.cpuset(&container.id).await?;
            let mut node = Node::default();
            node.latest.insert(AFFINITY, resolve_affinity(cpuset));
            topology.nodes.insert(entity_key(&container.id), node);
        }

        Ok(topology)
    }

    pub async fn make_report<R: ContainerRuntime>(&self, runtime: &R) -> runtime::Result<Report> {
        Ok(Report {
            container: self.build_topology(runtime).await?,
            plugins: self.plugins.clone(),
        })
    }
}
