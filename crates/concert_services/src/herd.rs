//! Turtle herd planning
//!
//! Computes what a herder hands to the concert: unique turtle names, the
//! `<concert>` launcher text for one client per turtle, and the gateway flip
//! rules exposing each turtle's command and pose topics. Nothing here talks to
//! a running system.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Write;

/// Defaults used when generating client launchers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HerdConfig {
    pub package: String,
    pub launcher: String,
    pub concert_whitelist: String,
    pub rapp_whitelist: String,
    /// Port of the first client; later clients count up from here
    pub base_port: u16,
}

impl Default for HerdConfig {
    fn default() -> Self {
        Self {
            package: "concert_service_turtlesim".to_string(),
            launcher: "turtle2.launch".to_string(),
            concert_whitelist: "Turtle Concert;Turtle Teleop Concert;Concert Tutorial".to_string(),
            rapp_whitelist: "[rocon_apps, turtle_concert]".to_string(),
            base_port: 11411,
        }
    }
}

/// One concert client to launch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchConfiguration {
    pub title: String,
    pub package: String,
    pub launcher: String,
    pub port: u16,
    pub args: Vec<(String, String)>,
}

/// Direction of a flipped connection, as seen from the remote gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Publisher,
    Subscriber,
}

/// A single gateway flip request entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlipRule {
    pub gateway: String,
    pub name: String,
    pub connection_type: ConnectionType,
    /// Empty matches any node
    pub node: String,
    pub cancel: bool,
}

/// Give every requested name a suffix that avoids `existing` and each other
///
/// A clashing `name` becomes `name_0`, then `name_1`, and so on.
pub fn establish_unique_names<S: AsRef<str>>(existing: &[S], requested: &[S]) -> Vec<String> {
    let mut taken: HashSet<String> = existing.iter().map(|s| s.as_ref().to_string()).collect();
    let mut unique = Vec::with_capacity(requested.len());

    for name in requested {
        let name = name.as_ref();
        let mut candidate = name.to_string();
        let mut count = 0;
        while taken.contains(&candidate) {
            candidate = format!("{name}_{count}");
            count += 1;
        }
        if candidate != name {
            log::debug!("Renamed turtle '{}' to '{}'", name, candidate);
        }
        taken.insert(candidate.clone());
        unique.push(candidate);
    }
    unique
}

/// One launch configuration per turtle, ports counting up from the base
pub fn launch_configurations<S: AsRef<str>>(
    names: &[S],
    config: &HerdConfig,
) -> Result<Vec<LaunchConfiguration>, HerdError> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let name = name.as_ref();
            let port = u16::try_from(index)
                .ok()
                .and_then(|offset| config.base_port.checked_add(offset))
                .ok_or_else(|| HerdError::PortsExhausted {
                    base_port: config.base_port,
                    requested: names.len(),
                })?;
            Ok(LaunchConfiguration {
                title: format!("{name}:{port}"),
                package: config.package.clone(),
                launcher: config.launcher.clone(),
                port,
                args: vec![
                    ("turtle_name".to_string(), name.to_string()),
                    (
                        "turtle_concert_whitelist".to_string(),
                        config.concert_whitelist.clone(),
                    ),
                    (
                        "turtle_rapp_whitelist".to_string(),
                        config.rapp_whitelist.clone(),
                    ),
                ],
            })
        })
        .collect()
}

/// Errors from herd planning
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HerdError {
    #[error("Cannot allocate {requested} client ports starting at {base_port}")]
    PortsExhausted { base_port: u16, requested: usize },
}

/// Render the `<concert>` launcher document
pub fn render_concert_launch(configurations: &[LaunchConfiguration]) -> String {
    let mut text = String::from("<concert>\n");
    for launch in configurations {
        writeln!(
            text,
            "  <launch title=\"{}\" package=\"{}\" name=\"{}\" port=\"{}\">",
            xml_escape(&launch.title),
            xml_escape(&launch.package),
            xml_escape(&launch.launcher),
            launch.port
        )
        .ok();
        for (name, value) in &launch.args {
            writeln!(
                text,
                "    <arg name=\"{}\" value=\"{}\"/>",
                xml_escape(name),
                xml_escape(value)
            )
            .ok();
        }
        text.push_str("  </launch>\n");
    }
    text.push_str("</concert>\n");
    text
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Flip rules exposing each turtle's cmd_vel and pose on its own gateway
pub fn flip_rules<S: AsRef<str>>(names: &[S], cancel: bool) -> Vec<FlipRule> {
    names
        .iter()
        .flat_map(|name| {
            let name = name.as_ref();
            [
                (ConnectionType::Subscriber, "cmd_vel"),
                (ConnectionType::Publisher, "pose"),
            ]
            .into_iter()
            .map(move |(connection_type, topic)| FlipRule {
                gateway: name.to_string(),
                name: format!("/services/turtlesim/{name}/{topic}"),
                connection_type,
                node: String::new(),
                cancel,
            })
        })
        .collect()
}
