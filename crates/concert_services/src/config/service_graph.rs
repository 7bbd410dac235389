//! Service graph (link graph) YAML schema

use super::error::{DescriptorError, EdgeEnd, Result};
use super::rocon_uri::{RoconUri, UriError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Root of a service graph descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceGraph {
    /// Human-readable label
    pub name: String,

    /// Resource slots robots bind to
    pub nodes: Vec<GraphNode>,

    /// Communication channels
    pub topics: Vec<GraphTopic>,

    /// Action descriptors, kept opaque
    #[serde(default)]
    pub actions: Vec<serde_yaml::Value>,

    /// Connections between nodes and topics
    pub edges: Vec<GraphEdge>,
}

/// A resource slot with cardinality bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    /// Rocon URI pattern of resources that may bind here
    pub uri: String,
    pub min: i64,
    pub max: i64,
}

impl GraphNode {
    /// Parse the node's resource pattern
    pub fn rocon_uri(&self) -> std::result::Result<RoconUri, UriError> {
        RoconUri::parse(&self.uri)
    }
}

/// A named topic with its message type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphTopic {
    pub id: String,
    #[serde(rename = "type")]
    pub msg_type: String,
}

/// Directed connection carrying a remapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub start: String,
    pub finish: String,
    /// Local alias used by the node
    pub remap_from: String,
    /// Absolute name the alias is wired to
    pub remap_to: String,
}

/// What an edge endpoint resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Node(&'a GraphNode),
    Topic(&'a GraphTopic),
}

impl ServiceGraph {
    /// Load a service graph from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DescriptorError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a service graph from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let graph: ServiceGraph = serde_yaml::from_str(content)?;
        graph.validate()?;
        Ok(graph)
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| DescriptorError::Serialize(e.to_string()))
    }

    /// Check cardinalities and edge references
    pub fn validate(&self) -> Result<()> {
        for node in &self.nodes {
            if node.min < 0 {
                return Err(DescriptorError::Range {
                    entry: format!("Node '{}'", node.id),
                    reason: format!("min must be >= 0, got {}", node.min),
                });
            }
            if node.min > node.max {
                return Err(DescriptorError::Range {
                    entry: format!("Node '{}'", node.id),
                    reason: format!("min ({}) exceeds max ({})", node.min, node.max),
                });
            }
        }

        for (index, edge) in self.edges.iter().enumerate() {
            for (end, id) in [(EdgeEnd::Start, &edge.start), (EdgeEnd::Finish, &edge.finish)] {
                if self.resolve(id).is_none() {
                    return Err(DescriptorError::Reference {
                        edge: index,
                        end,
                        id: id.clone(),
                    });
                }
            }
        }

        self.lint();
        Ok(())
    }

    /// Log suspicious but accepted content
    fn lint(&self) {
        let mut seen = HashSet::new();
        let ids = self
            .nodes
            .iter()
            .map(|n| n.id.as_str())
            .chain(self.topics.iter().map(|t| t.id.as_str()));
        for id in ids {
            if !seen.insert(id) {
                log::warn!("Service graph '{}': id '{}' declared more than once", self.name, id);
            }
        }

        for edge in &self.edges {
            if !edge.remap_to.starts_with('/') {
                log::warn!(
                    "Service graph '{}': edge {} -> {} remaps to relative name '{}'",
                    self.name,
                    edge.start,
                    edge.finish,
                    edge.remap_to
                );
            }
        }
    }

    /// Look up a node by id
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Look up a topic by id
    pub fn topic(&self, id: &str) -> Option<&GraphTopic> {
        self.topics.iter().find(|t| t.id == id)
    }

    /// Resolve an edge endpoint, nodes first
    pub fn resolve(&self, id: &str) -> Option<Endpoint<'_>> {
        self.node(id)
            .map(Endpoint::Node)
            .or_else(|| self.topic(id).map(Endpoint::Topic))
    }

    /// Edges leaving `id`
    pub fn edges_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| e.start == id)
    }

    /// Edges arriving at `id`
    pub fn edges_to<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| e.finish == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAPH: &str = r#"
name: "Test graph"
nodes:
  - id: robot
    uri: rocon:/pc/*/hydro|indigo/precise|trusty#waypoint_nav/waypoint_nav
    min: 1
    max: 2
topics:
  - id: cmd
    type: std_msgs/String
actions: []
edges:
  - start: cmd
    finish: robot
    remap_from: cmd
    remap_to: /cmd
"#;

    #[test]
    fn test_parse_graph() {
        let graph = ServiceGraph::from_yaml(GRAPH).unwrap();
        assert_eq!(graph.name, "Test graph");
        assert_eq!(graph.nodes[0].max, 2);
        assert_eq!(graph.topics[0].msg_type, "std_msgs/String");
        assert!(graph.actions.is_empty());
    }

    #[test]
    fn test_dangling_edge() {
        let yaml = GRAPH.replace("finish: robot", "finish: ghost");
        let err = ServiceGraph::from_yaml(&yaml).unwrap_err();
        assert!(err.is_reference());
        match err {
            DescriptorError::Reference { edge, end, id } => {
                assert_eq!(edge, 0);
                assert_eq!(end, EdgeEnd::Finish);
                assert_eq!(id, "ghost");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_inverted_cardinality() {
        let yaml = GRAPH.replace("min: 1", "min: 2").replace("max: 2", "max: 1");
        let err = ServiceGraph::from_yaml(&yaml).unwrap_err();
        assert!(err.is_range());
    }

    #[test]
    fn test_negative_min() {
        let yaml = GRAPH.replace("min: 1", "min: -1");
        assert!(ServiceGraph::from_yaml(&yaml).unwrap_err().is_range());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let yaml = format!("{GRAPH}\ndescription: extra\nversion: 3\n");
        assert!(ServiceGraph::from_yaml(&yaml).is_ok());
    }

    #[test]
    fn test_missing_sections_rejected() {
        let err = ServiceGraph::from_yaml("name: empty\n").unwrap_err();
        assert!(matches!(err, DescriptorError::Parse(_)));
    }

    #[test]
    fn test_misspelled_section_rejected() {
        let yaml = GRAPH.replace("nodes:", "node:");
        let err = ServiceGraph::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, DescriptorError::Parse(_)));
    }

    #[test]
    fn test_empty_sections_allowed() {
        let graph =
            ServiceGraph::from_yaml("name: empty\nnodes: []\ntopics: []\nedges: []\n").unwrap();
        assert!(graph.nodes.is_empty());
        assert!(graph.actions.is_empty());
    }

    #[test]
    fn test_actions_round_trip() {
        let yaml = GRAPH.replace(
            "actions: []",
            "actions:\n  - id: dock\n    type: kobuki_msgs/AutoDocking\n    goals:\n      - near\n      - {x: 1.5, y: -2}\n  - [plain, list]",
        );
        let graph = ServiceGraph::from_yaml(&yaml).unwrap();
        assert_eq!(graph.actions.len(), 2);
        let reloaded = ServiceGraph::from_yaml(&graph.to_yaml().unwrap()).unwrap();
        assert_eq!(graph, reloaded);
        assert_eq!(reloaded.actions[0]["goals"][1]["x"], serde_yaml::Value::from(1.5));
    }

    #[test]
    fn test_lookups() {
        let graph = ServiceGraph::from_yaml(GRAPH).unwrap();
        assert!(matches!(graph.resolve("robot"), Some(Endpoint::Node(_))));
        assert!(matches!(graph.resolve("cmd"), Some(Endpoint::Topic(_))));
        assert!(graph.resolve("nothing").is_none());
        assert_eq!(graph.edges_to("robot").count(), 1);
        assert_eq!(graph.edges_from("robot").count(), 0);
    }

    #[test]
    fn test_type_field_name_preserved() {
        let graph = ServiceGraph::from_yaml(GRAPH).unwrap();
        let yaml = graph.to_yaml().unwrap();
        assert!(yaml.contains("type: std_msgs/String"));
        assert!(!yaml.contains("msg_type"));
    }
}
