//! Teleoperation role manifest schema

use super::error::{DescriptorError, Result};
use super::rocon_uri::{RoconUri, UriError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A selectable operator capability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeleopRole {
    /// Machine identifier (snake_case)
    pub name: String,

    /// Access-role label, e.g. "User"
    pub role: String,

    /// Rocon URI pattern of eligible platforms
    pub compatibility: String,

    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub description: String,

    /// Maximum concurrent instances
    pub max: i64,

    /// Default parameters, in declaration order
    #[serde(default)]
    pub parameters: IndexMap<String, ParamValue>,
}

impl TeleopRole {
    /// Parse the compatibility pattern
    pub fn rocon_uri(&self) -> std::result::Result<RoconUri, UriError> {
        RoconUri::parse(&self.compatibility)
    }

    fn validate(&self) -> Result<()> {
        if self.max < 0 {
            return Err(DescriptorError::Range {
                entry: format!("Role '{}'", self.name),
                reason: format!("max must be >= 0, got {}", self.max),
            });
        }
        Ok(())
    }
}

/// Parameter defaults can be booleans, numbers or strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Int(i) => write!(f, "{i}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::String(s) => f.write_str(s),
        }
    }
}

/// The role list as stored in an interactions file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeleopRoles(pub Vec<TeleopRole>);

impl TeleopRoles {
    /// Load roles from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DescriptorError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse roles from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let roles: TeleopRoles = serde_yaml::from_str(content)?;
        roles.validate()?;
        Ok(roles)
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| DescriptorError::Serialize(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        self.0.iter().try_for_each(TeleopRole::validate)
    }

    pub fn get(&self, name: &str) -> Option<&TeleopRole> {
        self.0.iter().find(|r| r.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TeleopRole> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a TeleopRoles {
    type Item = &'a TeleopRole;
    type IntoIter = std::slice::Iter<'a, TeleopRole>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
