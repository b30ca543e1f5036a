use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

/// A single point-in-time observation of one attribute.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LatestValue {
    pub date: DateTime<Utc>,
    pub value: String,
}

/// Latest attribute values of one entity, keyed by attribute id.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Node {
    pub latest: BTreeMap<&'static str, LatestValue>,
}

/// Describes how the host renders an attribute.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct MetadataTemplate {
    pub id: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub label: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub format: &'static str,
    #[serde(skip_serializing_if = "is_zero")]
    pub priority: f64,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Topology {
    pub nodes: HashMap<String, Node>,
    pub metadata_templates: BTreeMap<&'static str, MetadataTemplate>,
}

/// Self-description announced to the host in every report.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct PluginSpec {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub description: &'static str,
    pub interfaces: &'static [&'static str],
    #[serde(skip_serializing_if = "str::is_empty")]
    pub api_version: &'static str,
}

/// The full payload served on the report endpoint.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Report {
    #[serde(rename = "Container")]
    pub container: Topology,
    #[serde(rename = "Plugins")]
    pub plugins: Vec<PluginSpec>,
}

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}
