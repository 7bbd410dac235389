//! Shape detection for descriptor documents

use super::error::{DescriptorError, Result};
use super::service_graph::ServiceGraph;
use super::teleop::TeleopRoles;
use std::path::Path;

/// A loaded descriptor of either shape
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    ServiceGraph(ServiceGraph),
    TeleopRoles(TeleopRoles),
}

impl Descriptor {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DescriptorError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a document, choosing the shape from its top-level node
    pub fn from_yaml(content: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        let descriptor = match value {
            serde_yaml::Value::Mapping(_) => {
                Descriptor::ServiceGraph(serde_yaml::from_value(value)?)
            }
            serde_yaml::Value::Sequence(_) => {
                Descriptor::TeleopRoles(serde_yaml::from_value(value)?)
            }
            other => return Err(DescriptorError::UnknownShape(kind_of(&other))),
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Descriptor::ServiceGraph(graph) => graph.validate(),
            Descriptor::TeleopRoles(roles) => roles.validate(),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        match self {
            Descriptor::ServiceGraph(graph) => graph.to_yaml(),
            Descriptor::TeleopRoles(roles) => roles.to_yaml(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        let json = match self {
            Descriptor::ServiceGraph(graph) => serde_json::to_string_pretty(graph),
            Descriptor::TeleopRoles(roles) => serde_json::to_string_pretty(roles),
        };
        json.map_err(|e| DescriptorError::Serialize(e.to_string()))
    }

    /// Short human summary, used by the CLI
    pub fn summary(&self) -> String {
        match self {
            Descriptor::ServiceGraph(graph) => format!(
                "service graph '{}': {} nodes, {} topics, {} actions, {} edges",
                graph.name,
                graph.nodes.len(),
                graph.topics.len(),
                graph.actions.len(),
                graph.edges.len()
            ),
            Descriptor::TeleopRoles(roles) => {
                format!("teleop roles: {} ({})", roles.len(), roles.names().join(", "))
            }
        }
    }
}

fn kind_of(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}
