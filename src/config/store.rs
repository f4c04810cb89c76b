use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::foundation::error::{PlotError, PlotResult};

/// One or more sources for the external configuration store.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ConfigSource {
    /// No external configuration.
    #[default]
    None,
    /// An in-memory mapping, used as-is.
    Inline(Map<String, Value>),
    /// A JSON or YAML file, re-read every time the store is built.
    Path(PathBuf),
    /// Several sources merged left to right; later top-level keys win.
    List(Vec<ConfigSource>),
}

impl From<Map<String, Value>> for ConfigSource {
    fn from(v: Map<String, Value>) -> Self {
        Self::Inline(v)
    }
}

impl From<PathBuf> for ConfigSource {
    fn from(v: PathBuf) -> Self {
        Self::Path(v)
    }
}

impl From<&Path> for ConfigSource {
    fn from(v: &Path) -> Self {
        Self::Path(v.to_path_buf())
    }
}

impl From<&str> for ConfigSource {
    fn from(v: &str) -> Self {
        Self::Path(PathBuf::from(v))
    }
}

impl From<String> for ConfigSource {
    fn from(v: String) -> Self {
        Self::Path(PathBuf::from(v))
    }
}

impl<T: Into<ConfigSource>> From<Vec<T>> for ConfigSource {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ConfigSource>> From<Option<T>> for ConfigSource {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::None, Into::into)
    }
}

/// Merged external configuration: config key to configuration fragment.
///
/// Fragments are usually mappings with optional `plot`, `data`, and `args` keys, but the store
/// keeps whatever value the source held; interpretation happens during resolution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigStore {
    entries: Map<String, Value>,
}

impl ConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from `source`.
    ///
    /// File sources are loaded on every call. Load failures are fatal.
    pub fn build(source: &ConfigSource) -> PlotResult<Self> {
        match source {
            ConfigSource::None => Ok(Self::new()),
            ConfigSource::Inline(map) => Ok(Self::from(map.clone())),
            ConfigSource::Path(path) => Self::from_path(path),
            ConfigSource::List(sources) => {
                let mut store = Self::new();
                for s in sources {
                    store.merge(Self::build(s)?);
                }
                Ok(store)
            }
        }
    }

    /// Load a store from a JSON (`.json`) or YAML (any other extension) file.
    ///
    /// An empty file yields an empty store. The top level must otherwise be a mapping.
    pub fn from_path(path: impl AsRef<Path>) -> PlotResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            PlotError::config_source(format!("read config '{}': {e}", path.display()))
        })?;
        if text.trim().is_empty() {
            return Ok(Self::new());
        }

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let value: Value = if is_json {
            serde_json::from_str(&text).map_err(|e| {
                PlotError::config_source(format!("parse JSON config '{}': {e}", path.display()))
            })?
        } else {
            serde_yaml::from_str(&text).map_err(|e| {
                PlotError::config_source(format!("parse YAML config '{}': {e}", path.display()))
            })?
        };

        match value {
            Value::Object(entries) => Ok(Self { entries }),
            Value::Null => Ok(Self::new()),
            _ => Err(PlotError::config_source(format!(
                "config '{}' must contain a mapping at the top level",
                path.display()
            ))),
        }
    }

    /// Shallow merge: every top-level key of `other` replaces the same key here.
    pub fn merge(&mut self, other: ConfigStore) {
        for (k, v) in other.entries {
            self.entries.insert(k, v);
        }
    }

    /// Look up a fragment by config key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Insert or replace a fragment.
    pub fn insert(&mut self, key: impl Into<String>, fragment: Value) -> Option<Value> {
        self.entries.insert(key.into(), fragment)
    }

    /// Config keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of config keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrow the underlying mapping.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }
}

impl From<Map<String, Value>> for ConfigStore {
    fn from(entries: Map<String, Value>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/store.rs"]
mod tests;
