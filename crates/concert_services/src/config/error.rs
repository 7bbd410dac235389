//! Errors raised while loading descriptors

use std::path::PathBuf;

/// Which side of an edge failed to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEnd {
    Start,
    Finish,
}

impl std::fmt::Display for EdgeEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Finish => write!(f, "finish"),
        }
    }
}

/// Errors that can occur when loading a descriptor
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("Failed to read descriptor '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse descriptor: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Failed to serialize descriptor: {0}")]
    Serialize(String),

    #[error("Descriptor must be a mapping (service graph) or a sequence (teleop roles), found {0}")]
    UnknownShape(&'static str),

    /// An edge endpoint names neither a node nor a topic
    #[error("Edge {edge} {end} references undeclared id '{id}'")]
    Reference { edge: usize, end: EdgeEnd, id: String },

    /// Inverted or negative cardinality
    #[error("{entry}: {reason}")]
    Range { entry: String, reason: String },
}

impl DescriptorError {
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference { .. })
    }

    pub fn is_range(&self) -> bool {
        matches!(self, Self::Range { .. })
    }
}

pub type Result<T> = std::result::Result<T, DescriptorError>;
