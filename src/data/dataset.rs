use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

/// Data handed to a draw operation.
///
/// The dispatcher only needs two capabilities from a dataset: a membership test used by
/// requirement checks, and key lookup returning a sub-dataset. Everything else is interpreted by
/// the draw operation itself.
pub trait Dataset: fmt::Debug + Send + Sync {
    /// Whether `key` can be looked up in this dataset.
    fn contains_key(&self, key: &str) -> bool;

    /// Look up a sub-dataset (column, array, or nested mapping) by key.
    fn get(&self, key: &str) -> Option<Cow<'_, Value>>;
}

/// Shared, immutable dataset reference.
pub type DataHandle = Arc<dyn Dataset>;

impl Dataset for Value {
    fn contains_key(&self, key: &str) -> bool {
        match self {
            Value::Object(map) => map.contains_key(key),
            // Membership over a list checks its elements.
            Value::Array(items) => items.iter().any(|v| v.as_str() == Some(key)),
            _ => false,
        }
    }

    fn get(&self, key: &str) -> Option<Cow<'_, Value>> {
        match self {
            Value::Object(map) => map.get(key).map(Cow::Borrowed),
            _ => None,
        }
    }
}

impl Dataset for Map<String, Value> {
    fn contains_key(&self, key: &str) -> bool {
        Map::contains_key(self, key)
    }

    fn get(&self, key: &str) -> Option<Cow<'_, Value>> {
        Map::get(self, key).map(Cow::Borrowed)
    }
}

impl Dataset for BTreeMap<String, Value> {
    fn contains_key(&self, key: &str) -> bool {
        BTreeMap::contains_key(self, key)
    }

    fn get(&self, key: &str) -> Option<Cow<'_, Value>> {
        BTreeMap::get(self, key).map(Cow::Borrowed)
    }
}

impl Dataset for HashMap<String, Value> {
    fn contains_key(&self, key: &str) -> bool {
        HashMap::contains_key(self, key)
    }

    fn get(&self, key: &str) -> Option<Cow<'_, Value>> {
        HashMap::get(self, key).map(Cow::Borrowed)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/dataset.rs"]
mod tests;
