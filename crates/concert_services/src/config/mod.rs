//! Descriptor schemas, loading and validation

mod descriptor;
mod error;
mod rocon_uri;
mod service_graph;
mod teleop;

pub use descriptor::*;
pub use error::*;
pub use rocon_uri::*;
pub use service_graph::*;
pub use teleop::*;
