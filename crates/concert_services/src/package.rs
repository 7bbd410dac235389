//! Discovery of descriptor files in a services directory

use crate::config::{DescriptorError, ServiceGraph, TeleopRoles};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extension of service graph descriptors
pub const LINK_GRAPH_EXT: &str = "link_graph";
/// File extension of teleop role manifests
pub const INTERACTIONS_EXT: &str = "interactions";

/// All descriptors found under a services directory
#[derive(Debug, Default)]
pub struct ServicePackage {
    root: PathBuf,
    graphs: Vec<(PathBuf, ServiceGraph)>,
    teleop_roles: Vec<(PathBuf, TeleopRoles)>,
}

impl ServicePackage {
    /// Walk `dir` and load every known descriptor file
    pub fn scan(dir: impl AsRef<Path>) -> Result<Self, PackageError> {
        let root = dir.as_ref().to_path_buf();
        let mut package = ServicePackage {
            root: root.clone(),
            ..Default::default()
        };

        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry.map_err(|e| PackageError::Walk {
                path: root.clone(),
                message: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let load_err = |source| PackageError::Load {
                path: path.to_path_buf(),
                source,
            };

            match path.extension().and_then(|e| e.to_str()) {
                Some(LINK_GRAPH_EXT) => {
                    let graph = ServiceGraph::from_file(path).map_err(load_err)?;
                    log::debug!("Loaded service graph '{}' from {}", graph.name, path.display());
                    package.graphs.push((path.to_path_buf(), graph));
                }
                Some(INTERACTIONS_EXT) => {
                    let roles = TeleopRoles::from_file(path).map_err(load_err)?;
                    log::debug!("Loaded {} teleop roles from {}", roles.len(), path.display());
                    package.teleop_roles.push((path.to_path_buf(), roles));
                }
                _ => log::trace!("Skipping {}", path.display()),
            }
        }

        log::info!(
            "Scanned {}: {} service graphs, {} interaction files",
            root.display(),
            package.graphs.len(),
            package.teleop_roles.len()
        );
        Ok(package)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn graphs(&self) -> &[(PathBuf, ServiceGraph)] {
        &self.graphs
    }

    pub fn teleop_roles(&self) -> &[(PathBuf, TeleopRoles)] {
        &self.teleop_roles
    }

    /// Number of descriptor files loaded
    pub fn len(&self) -> usize {
        self.graphs.len() + self.teleop_roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("Failed to walk '{}': {message}", path.display())]
    Walk { path: PathBuf, message: String },

    #[error("Invalid descriptor '{}': {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: DescriptorError,
    },
}
