//! Rocon URI compatibility patterns
//!
//! A rocon URI describes which platforms a resource may run on:
//!
//! ```text
//! rocon:/<hardware_platform>/<name>/<application_framework>/<operating_system>#<rapp>
//! ```
//!
//! Each field is either `*` or a `|`-separated list of alternatives, e.g.
//! `rocon:/pc/*/hydro|indigo/precise|trusty#waypoint_nav/waypoint_nav`.
//! Trailing fields may be omitted and default to `*`.

use std::fmt;

const SCHEME: &str = "rocon:/";
const FIELD_COUNT: usize = 4;

/// One field of a rocon URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriField {
    Any,
    OneOf(Vec<String>),
}

impl UriField {
    fn parse(segment: &str, position: usize) -> Result<Self, UriError> {
        if segment == "*" {
            return Ok(UriField::Any);
        }
        let alternatives: Vec<String> = segment.split('|').map(str::to_string).collect();
        if alternatives.iter().any(|a| a.is_empty() || a == "*") {
            return Err(UriError::InvalidField {
                position,
                segment: segment.to_string(),
            });
        }
        Ok(UriField::OneOf(alternatives))
    }

    /// True when some value satisfies both fields
    pub fn intersects(&self, other: &UriField) -> bool {
        match (self, other) {
            (UriField::Any, _) | (_, UriField::Any) => true,
            (UriField::OneOf(a), UriField::OneOf(b)) => a.iter().any(|x| b.contains(x)),
        }
    }

    /// True when `value` is allowed by this field
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            UriField::Any => true,
            UriField::OneOf(values) => values.iter().any(|v| v == value),
        }
    }
}

impl fmt::Display for UriField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UriField::Any => f.write_str("*"),
            UriField::OneOf(values) => f.write_str(&values.join("|")),
        }
    }
}

/// Parsed rocon URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoconUri {
    pub hardware_platform: UriField,
    pub name: UriField,
    pub application_framework: UriField,
    pub operating_system: UriField,
    /// Rapp fragment after `#`, not part of compatibility
    pub rapp: Option<String>,
}

impl RoconUri {
    pub fn parse(input: &str) -> Result<Self, UriError> {
        let rest = input
            .strip_prefix(SCHEME)
            .ok_or_else(|| UriError::MissingScheme(input.to_string()))?;

        let (path, rapp) = match rest.split_once('#') {
            Some((path, rapp)) if !rapp.is_empty() => (path, Some(rapp.to_string())),
            Some((path, _)) => (path, None),
            None => (rest, None),
        };

        let segments: Vec<&str> = if path.is_empty() {
            Vec::new()
        } else {
            path.split('/').collect()
        };
        if segments.len() > FIELD_COUNT {
            return Err(UriError::TooManySegments(input.to_string()));
        }

        let mut fields = [UriField::Any, UriField::Any, UriField::Any, UriField::Any];
        for (position, segment) in segments.iter().enumerate() {
            fields[position] = UriField::parse(segment, position)?;
        }
        let [hardware_platform, name, application_framework, operating_system] = fields;

        Ok(Self {
            hardware_platform,
            name,
            application_framework,
            operating_system,
            rapp,
        })
    }

    fn fields(&self) -> [&UriField; FIELD_COUNT] {
        [
            &self.hardware_platform,
            &self.name,
            &self.application_framework,
            &self.operating_system,
        ]
    }

    /// Two patterns are compatible when every field intersects
    pub fn matches(&self, other: &RoconUri) -> bool {
        self.fields()
            .iter()
            .zip(other.fields())
            .all(|(a, b)| a.intersects(b))
    }
}

impl std::str::FromStr for RoconUri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RoconUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}/{}/{}/{}",
            SCHEME,
            self.hardware_platform,
            self.name,
            self.application_framework,
            self.operating_system
        )?;
        if let Some(rapp) = &self.rapp {
            write!(f, "#{rapp}")?;
        }
        Ok(())
    }
}

/// Errors from rocon URI parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UriError {
    #[error("Rocon URI '{0}' must start with 'rocon:/'")]
    MissingScheme(String),

    #[error("Rocon URI '{0}' has more than four path segments")]
    TooManySegments(String),

    #[error("Invalid rocon URI field {position}: '{segment}'")]
    InvalidField { position: usize, segment: String },
}
