use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use std::path::Path;

use crate::utils::ConfigError;

/// One externally supplied `(name, scale)` pair for the body wind table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyOverride {
    #[serde(default)]
    pub name: String,
    /// String-encoded scale; numbers are accepted and stringified
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub scale: Option<String>,
}

impl BodyOverride {
    pub fn new(name: &str, scale: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            scale: scale.map(str::to_string),
        }
    }

    /// Scale as a number; empty, malformed or non-finite text yields 0.
    pub fn parsed_scale(&self) -> f64 {
        self.scale
            .as_deref()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|scale| scale.is_finite())
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Default, Deserialize)]
struct BodyOverrideFile {
    #[serde(default)]
    bodies: Vec<BodyOverride>,
}

/// Parse override records from a document of the form `bodies: [{ name, scale }]`.
pub fn parse_body_overrides(source: &str) -> Result<Vec<BodyOverride>, ConfigError> {
    if source.trim().is_empty() {
        return Ok(Vec::new());
    }
    let file: BodyOverrideFile = serde_yaml::from_str(source)?;
    Ok(file.bodies)
}

pub fn load_body_overrides<P: AsRef<Path>>(path: P) -> Result<Vec<BodyOverride>, ConfigError> {
    let source = std::fs::read_to_string(path)?;
    parse_body_overrides(&source)
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    })
}
