/// Hierarchical configuration addressed by dotted key paths
///
/// A path like `camera.fov_deg` walks nested tables. Paths are parsed once
/// into a [`KeyPath`]; lookups report the first prefix that is missing
/// rather than failing deep inside string splitting.
use std::collections::BTreeMap;
use std::path::Path;

use nom::{
    bytes::complete::take_while1, character::complete::char, multi::separated_list1, IResult,
};

use crate::error::ConfigError;

/// A parsed `segment ('.' segment)*` key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    segments: Vec<String>,
}

fn parse_segment(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-')(input)
}

fn parse_key_path(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(char('.'), parse_segment)(input)
}

impl KeyPath {
    pub fn parse(path: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidPath {
            path: path.to_string(),
            reason,
        };

        match parse_key_path(path) {
            Ok(("", segments)) => Ok(Self {
                segments: segments.into_iter().map(str::to_string).collect(),
            }),
            Ok((rest, _)) => Err(invalid(format!("unexpected {:?}", rest))),
            Err(_) => Err(invalid("expected a key segment".to_string())),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The first `len` segments joined back with dots.
    fn prefix(&self, len: usize) -> String {
        self.segments[..len].join(".")
    }
}

/// A node in the config tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Table(BTreeMap<String, ConfigValue>),
    List(Vec<ConfigValue>),
    Float(f64),
    Integer(i64),
    Bool(bool),
    Text(String),
}

impl ConfigValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Table(_) => "table",
            ConfigValue::List(_) => "list",
            ConfigValue::Float(_) => "float",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Bool(_) => "bool",
            ConfigValue::Text(_) => "text",
        }
    }
}

impl From<toml::Value> for ConfigValue {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => ConfigValue::Text(s),
            toml::Value::Integer(i) => ConfigValue::Integer(i),
            toml::Value::Float(f) => ConfigValue::Float(f),
            toml::Value::Boolean(b) => ConfigValue::Bool(b),
            toml::Value::Datetime(d) => ConfigValue::Text(d.to_string()),
            toml::Value::Array(items) => {
                ConfigValue::List(items.into_iter().map(ConfigValue::from).collect())
            }
            toml::Value::Table(table) => ConfigValue::Table(
                table
                    .into_iter()
                    .map(|(k, v)| (k, ConfigValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Tree of named values with typed, path-addressed access.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigTree {
    root: BTreeMap<String, ConfigValue>,
}

impl ConfigTree {
    pub fn new() -> Self {
        Self {
            root: BTreeMap::new(),
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = source.parse()?;
        let root = table
            .into_iter()
            .map(|(k, v)| (k, ConfigValue::from(v)))
            .collect();
        Ok(Self { root })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let tree = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), keys = tree.root.len(), "loaded config");
        Ok(tree)
    }

    pub fn get(&self, path: &str) -> Result<&ConfigValue, ConfigError> {
        let key = KeyPath::parse(path)?;
        let mut table = &self.root;

        for (depth, segment) in key.segments.iter().enumerate() {
            let value = table.get(segment).ok_or_else(|| ConfigError::KeyNotFound {
                path: key.prefix(depth + 1),
            })?;

            if depth + 1 == key.segments.len() {
                return Ok(value);
            }
            table = match value {
                ConfigValue::Table(inner) => inner,
                _ => {
                    return Err(ConfigError::NotATable {
                        path: key.prefix(depth + 1),
                    })
                }
            };
        }

        // separated_list1 guarantees at least one segment
        Err(ConfigError::KeyNotFound {
            path: path.to_string(),
        })
    }

    /// Store `value` at `path`. Every table above the final segment must
    /// already exist.
    pub fn set(&mut self, path: &str, value: ConfigValue) -> Result<(), ConfigError> {
        let key = KeyPath::parse(path)?;
        let (last, parents) = match key.segments.split_last() {
            Some(split) => split,
            None => {
                return Err(ConfigError::KeyNotFound {
                    path: path.to_string(),
                })
            }
        };

        let mut table = &mut self.root;
        for (depth, segment) in parents.iter().enumerate() {
            let entry = table
                .get_mut(segment)
                .ok_or_else(|| ConfigError::KeyNotFound {
                    path: key.prefix(depth + 1),
                })?;
            table = match entry {
                ConfigValue::Table(inner) => inner,
                _ => {
                    return Err(ConfigError::NotATable {
                        path: key.prefix(depth + 1),
                    })
                }
            };
        }

        table.insert(last.clone(), value);
        Ok(())
    }

    pub fn get_f32(&self, path: &str) -> Result<f32, ConfigError> {
        match self.get(path)? {
            ConfigValue::Float(f) => Ok(*f as f32),
            ConfigValue::Integer(i) => Ok(*i as f32),
            other => Err(mismatch(path, "float", other)),
        }
    }

    pub fn get_i64(&self, path: &str) -> Result<i64, ConfigError> {
        match self.get(path)? {
            ConfigValue::Integer(i) => Ok(*i),
            other => Err(mismatch(path, "integer", other)),
        }
    }

    pub fn get_bool(&self, path: &str) -> Result<bool, ConfigError> {
        match self.get(path)? {
            ConfigValue::Bool(b) => Ok(*b),
            other => Err(mismatch(path, "bool", other)),
        }
    }

    pub fn get_str(&self, path: &str) -> Result<&str, ConfigError> {
        match self.get(path)? {
            ConfigValue::Text(s) => Ok(s.as_str()),
            other => Err(mismatch(path, "text", other)),
        }
    }

    /// Like [`ConfigTree::get_f32`], but a missing key yields `default`.
    /// Type mismatches and malformed paths still fail.
    pub fn get_f32_or(&self, path: &str, default: f32) -> Result<f32, ConfigError> {
        match self.get_f32(path) {
            Err(ConfigError::KeyNotFound { .. }) => Ok(default),
            other => other,
        }
    }

    pub fn get_i64_or(&self, path: &str, default: i64) -> Result<i64, ConfigError> {
        match self.get_i64(path) {
            Err(ConfigError::KeyNotFound { .. }) => Ok(default),
            other => other,
        }
    }
}

fn mismatch(path: &str, expected: &'static str, found: &ConfigValue) -> ConfigError {
    ConfigError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: found.type_name(),
    }
}
