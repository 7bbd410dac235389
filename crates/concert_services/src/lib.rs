//! Concert Services
//!
//! Descriptors for a robot concert service package, plus the loader that
//! validates them before they are handed to the concert service manager.
//!
//! # Overview
//!
//! Two descriptor shapes are supported:
//! - a service graph (`*.link_graph`) wiring nodes to topics through
//!   remapped edges
//! - a teleoperation role list (`*.interactions`)
//!
//! # Example Service Graph
//!
//! ```yaml
//! name: "Waypoint navigation"
//! nodes:
//!   - id: robot
//!     uri: rocon:/pc/*/hydro|indigo/precise|trusty#waypoint_nav/waypoint_nav
//!     min: 1
//!     max: 1
//! topics:
//!   - id: nav_control
//!     type: yocs_msgs/NavigationControl
//! actions: []
//! edges:
//!   - start: nav_control
//!     finish: robot
//!     remap_from: nav_ctrl
//!     remap_to: /nav_ctrl
//! ```

pub mod cli;
pub mod config;
pub mod herd;
pub mod package;

pub use cli::CliArgs;
pub use config::{
    Descriptor, DescriptorError, EdgeEnd, Endpoint, GraphEdge, GraphNode, GraphTopic, ParamValue,
    RoconUri, ServiceGraph, TeleopRole, TeleopRoles, UriError, UriField,
};
pub use herd::{FlipRule, HerdConfig, HerdError, LaunchConfiguration};
pub use package::{PackageError, ServicePackage};
