//! Shapes container data into the topology document consumed by the visualization host.
mod builder;
mod models;
mod resolver;

pub use builder::{AFFINITY, CONTAINER_TAG, TopologyBuilder, entity_key};
pub use models::{LatestValue, MetadataTemplate, Node, PluginSpec, Report, Topology};
pub use resolver::resolve_affinity;
